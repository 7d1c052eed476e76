//! Pattern-level helpers that run before either engine sees the pattern.

use std::borrow::Cow;

use tracing::debug;

use crate::options::Options;
use crate::regex::BackendKind;

/// Turns every unnamed capture group into a non-capturing one, so only named
/// groups capture.
///
/// Escaped parentheses and parentheses inside a character class are left
/// alone, as is anything that already starts with `(?`. In extended mode
/// (`extended`, or an inline `(?x)` met along the way) `#` comments are
/// copied untouched up to the end of the line. Group syntax is the same in
/// both dialects, so this works for either backend.
pub fn strip_unnamed_captures(pattern: &str, extended: bool) -> Cow<'_, str> {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;
    let mut extended = extended;
    let mut changed = false;

    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '#' if extended && class_depth == 0 => {
                for commented in chars.by_ref() {
                    out.push(commented);
                    if commented == '\n' {
                        break;
                    }
                }
            }
            '[' => {
                class_depth += 1;
                // A `]` right after the opening bracket (or after `^`) is a
                // literal, not the end of the class.
                if chars.peek() == Some(&'^') {
                    out.extend(chars.next());
                }
                if chars.peek() == Some(&']') {
                    out.extend(chars.next());
                }
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '(' if class_depth == 0 && chars.peek() == Some(&'?') => {
                if let Some(value) = inline_extended(chars.clone()) {
                    extended = value;
                }
            }
            '(' if class_depth == 0 => {
                out.push_str("?:");
                changed = true;
            }
            _ => {}
        }
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(pattern)
    }
}

/// For a bare flag group such as `(?x)` or `(?i-x)`, whether it turns
/// extended mode on or off. `chars` starts at the `?`.
fn inline_extended(chars: impl Iterator<Item = char>) -> Option<bool> {
    let mut enabled = true;
    let mut extended = None;
    for c in chars.skip(1) {
        match c {
            ')' => return extended,
            '-' => enabled = false,
            'x' => extended = Some(enabled),
            c if c.is_ascii_alphabetic() => {}
            _ => return None,
        }
    }
    None
}

/// The pattern text actually handed to an engine for these options.
pub(crate) fn prepare<'p>(pattern: &'p str, options: &Options) -> Cow<'p, str> {
    if options.explicit_capture {
        strip_unnamed_captures(pattern, options.extended)
    } else {
        Cow::Borrowed(pattern)
    }
}

/// Picks the linear backend whenever it can express the pattern, and the
/// backtracking one otherwise (look-around, backreferences, atomic groups).
pub fn select_backend(pattern: &str, options: &Options) -> BackendKind {
    let source = prepare(pattern, options);
    let kind = match regex_syntax::ParserBuilder::from(options)
        .build()
        .parse(&source)
    {
        Ok(_) => BackendKind::Linear,
        Err(_) => BackendKind::Backtracking,
    };
    debug!(pattern, backend = %kind, "selected backend");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_unnamed_groups() {
        assert_eq!(strip_unnamed_captures("(a)(b)", false), "(?:a)(?:b)");
    }

    #[test]
    fn keeps_named_and_special_groups() {
        let pattern = r"(?P<x>a)(?<y>b)(?:c)(?=d)";
        assert!(matches!(strip_unnamed_captures(pattern, false), Cow::Borrowed(_)));
    }

    #[test]
    fn skips_escapes_and_classes() {
        assert_eq!(strip_unnamed_captures(r"\((a)\)", false), r"\((?:a)\)");
        assert_eq!(strip_unnamed_captures(r"[(](a)", false), r"[(](?:a)");
        assert_eq!(strip_unnamed_captures(r"[](](a)", false), r"[](](?:a)");
        assert_eq!(strip_unnamed_captures(r"[^]((](a)", false), r"[^]((](?:a)");
        assert_eq!(strip_unnamed_captures(r"[[:alpha:](](a)", false), r"[[:alpha:](](?:a)");
    }

    #[test]
    fn extended_comments_are_not_interpreted() {
        assert_eq!(
            strip_unnamed_captures("a # [note\n(b)", true),
            "a # [note\n(?:b)"
        );
        assert_eq!(
            strip_unnamed_captures("a # (note)\n(b)", true),
            "a # (note)\n(?:b)"
        );
        assert_eq!(
            strip_unnamed_captures("(?x)a # [note\n(b)", false),
            "(?x)a # [note\n(?:b)"
        );
        // Without extended mode `#` is a literal.
        assert_eq!(strip_unnamed_captures("#(a)", false), "#(?:a)");
        assert_eq!(
            strip_unnamed_captures("(?i-x)#[(a)", true),
            "(?i-x)#[(a)"
        );
    }

    #[test]
    fn selects_backend_by_features() {
        let options = Options::default();
        assert_eq!(select_backend(r"\d+", &options), BackendKind::Linear);
        assert_eq!(select_backend(r"a(?=b)", &options), BackendKind::Backtracking);
        assert_eq!(select_backend(r"(a)\1", &options), BackendKind::Backtracking);
    }
}
