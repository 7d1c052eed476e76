//! The linear backend, built on the [`regex`] crate.
//!
//! Search time is linear in the input. No look-around and no
//! backreferences; such patterns fail to compile.

use std::sync::Arc;

use tracing::debug;

use crate::error::{CompileError, MatchError};
use crate::options::Options;
use crate::regex::{BackendKind, RegexImpl};
use crate::syntax;
use crate::util::{Input, Span};

pub struct Linear {
    regex: regex::Regex,
    pattern: String,
    options: Options,
    names: Arc<[Option<String>]>,
}

impl RegexImpl for Linear {
    fn compile(pattern: &str, options: &Options) -> Result<Self, CompileError> {
        if options.right_to_left {
            return Err(CompileError::UnsupportedOption {
                option: "right_to_left",
                backend: BackendKind::Linear,
            });
        }

        let source = syntax::prepare(pattern, options);
        let mut builder = regex::RegexBuilder::new(&source);
        builder
            .case_insensitive(options.case_insensitive)
            .multi_line(options.multiline)
            .dot_matches_new_line(options.singleline)
            .ignore_whitespace(options.extended);
        if let Some(limit) = options.size_limit {
            builder.size_limit(limit);
        }
        let regex = builder.build()?;

        let names: Arc<[Option<String>]> = regex
            .capture_names()
            .map(|name| name.map(str::to_owned))
            .collect();
        debug!(
            pattern,
            backend = %BackendKind::Linear,
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
        BackendKind::Linear
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
            let Some(m) = self.regex.find_at(subject, start) else {
                return Ok(false);
            };
            if let Some(slot) = captures.first_mut() {
                *slot = Span::from(m.range());
            }
            return Ok(true);
        }

        let mut locations = self.regex.capture_locations();
        if self
            .regex
            .captures_read_at(&mut locations, subject, start)
            .is_none()
        {
            return Ok(false);
        }
        for (i, slot) in captures.iter_mut().enumerate().take(locations.len()) {
            *slot = locations.get(i).map_or(Span::invalid(), Span::from);
        }
        Ok(true)
    }
}
