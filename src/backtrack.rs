//! The backtracking backend, built on [`fancy_regex`].
//!
//! Supports look-around, backreferences and atomic groups. Searches can
//! take exponential time, so every search runs under a backtracking budget
//! ([`Options::backtrack_limit`]); running out of it is reported as
//! [`MatchError::BacktrackLimitExceeded`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CompileError, MatchError};
use crate::options::Options;
use crate::regex::{BackendKind, RegexImpl};
use crate::syntax;
use crate::util::{Input, Span};

pub struct Backtracking {
    regex: fancy_regex::Regex,
    pattern: String,
    options: Options,
    names: Arc<[Option<String>]>,
}

impl RegexImpl for Backtracking {
    fn compile(pattern: &str, options: &Options) -> Result<Self, CompileError> {
        if options.right_to_left {
            return Err(CompileError::UnsupportedOption {
                option: "right_to_left",
                backend: BackendKind::Backtracking,
            });
        }

        let source = with_inline_flags(&syntax::prepare(pattern, options), options);
        let mut builder = fancy_regex::RegexBuilder::new(&source);
        builder.case_insensitive(options.case_insensitive);
        if let Some(limit) = options.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        if let Some(limit) = options.size_limit {
            builder.delegate_size_limit(limit);
        }
        let regex = builder.build()?;

        let names: Arc<[Option<String>]> = regex
            .capture_names()
            .map(|name| name.map(str::to_owned))
            .collect();
        debug!(
            pattern,
            backend = %BackendKind::Backtracking,
            groups = names.len(),
            ?options,
            "compiled pattern"
        );

        Ok(Self {
            regex,
            pattern: pattern.to_owned(),
            options: options.clone(),
            names,
        })
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Backtracking
    }

    fn as_str(&self) -> &str {
        &self.pattern
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn capture_count(&self) -> usize {
        self.names.len()
    }

    fn capture_names(&self) -> Arc<[Option<String>]> {
        Arc::clone(&self.names)
    }

    fn exec(&self, input: Input<'_>, captures: &mut [Span]) -> Result<bool, MatchError> {
        let Input { subject, start } = input;

        if captures.len() <= 1 {
            let found = self
                .regex
                .find_from_pos(subject, start)
                .map_err(|e| self.runtime_error(e))?;
            let Some(m) = found else {
                return Ok(false);
            };
            if let Some(slot) = captures.first_mut() {
                *slot = Span::from(m.start()..m.end());
            }
            return Ok(true);
        }

        let found = self
            .regex
            .captures_from_pos(subject, start)
            .map_err(|e| self.runtime_error(e))?;
        let Some(caps) = found else {
            return Ok(false);
        };
        // fancy_regex reports a group that did not participate as `None`.
        for (i, slot) in captures.iter_mut().enumerate().take(caps.len()) {
            *slot = caps
                .get(i)
                .map_or(Span::invalid(), |m| Span::from(m.start()..m.end()));
        }
        Ok(true)
    }
}

/// The builder only exposes case folding, so the other mode options are
/// passed to the parser as a leading inline flag group.
fn with_inline_flags(source: &str, options: &Options) -> String {
    let mut flags = String::new();
    if options.multiline {
        flags.push('m');
    }
    if options.singleline {
        flags.push('s');
    }
    if options.extended {
        flags.push('x');
    }
    if flags.is_empty() {
        source.to_owned()
    } else {
        format!("(?{flags}){source}")
    }
}

impl Backtracking {
    fn runtime_error(&self, error: fancy_regex::Error) -> MatchError {
        let error = MatchError::from(error);
        if error == MatchError::BacktrackLimitExceeded {
            warn!(pattern = %self.pattern, "backtrack limit exceeded");
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_look_around_and_backreferences() {
        let re = Backtracking::compile(r"(\w)\1(?=!)", &Options::default()).unwrap();
        assert_eq!(re.find_first_index("ab cc!").unwrap(), Some([3, 5]));
    }

    #[test]
    fn look_behind_sees_text_before_start() {
        let re = Backtracking::compile(r"(?<=a)b", &Options::default()).unwrap();
        assert_eq!(re.find_all_indices("abab", 1).unwrap(), vec![[1, 2], [3, 4]]);
    }

    #[test]
    fn mode_options_reach_the_parser() {
        let options = Options::from_flags("msx").unwrap();
        let re = Backtracking::compile("^a . b$ # trailing", &options).unwrap();
        assert_eq!(re.find_all_indices("x\na\nb\ny", 0).unwrap(), vec![[2, 5]]);
        assert_eq!(with_inline_flags("a", &Options::default()), "a");
        assert_eq!(with_inline_flags("a", &options), "(?msx)a");
    }

    #[test]
    fn rejects_right_to_left() {
        let err = Backtracking::compile("a", &Options::default().right_to_left(true))
            .err()
            .unwrap();
        assert_eq!(
            err,
            CompileError::UnsupportedOption {
                option: "right_to_left",
                backend: BackendKind::Backtracking,
            }
        );
    }

    #[test]
    fn backtrack_limit_is_a_match_error() {
        let options = Options::default().backtrack_limit(1000);
        let re = Backtracking::compile(r"(?i)(a|b|ab)*(?=c)", &options).unwrap();
        let subject = "ab".repeat(28);
        assert_eq!(
            re.find_first_index(&subject),
            Err(crate::Error::Match(MatchError::BacktrackLimitExceeded))
        );
    }

    #[test]
    fn syntax_error_carries_engine_message() {
        let err = Backtracking::compile("a(", &Options::default()).err().unwrap();
        assert!(matches!(err, CompileError::Syntax(msg) if !msg.is_empty()));
    }
}
