#![allow(dead_code)]

use dual_regex::{Options, Regex, RegexImpl};
use regex as rust_regex;

/// Compile a given pattern on both backends. Return Some if it compiles
/// for both, or None if it fails to compile for both of them. Panics if
/// an inconcistency is detected.
pub fn compile_all(pattern: &str) -> Option<Vec<Regex>> {
    compile_all_with(pattern, &Options::default())
}

pub fn compile_all_with(pattern: &str, options: &Options) -> Option<Vec<Regex>> {
    let linear = dual_regex::Builder::new(pattern)
        .options(options.clone())
        .linear();
    let backtracking = dual_regex::Builder::new(pattern)
        .options(options.clone())
        .backtracking();

    match (linear, backtracking) {
        (Ok(linear), Ok(backtracking)) => Some(vec![linear, backtracking]),
        (Err(_), Err(_)) => None,
        (Ok(_), Err(e)) => panic!("Inconsistency detected: only backtracking failed: {e}"),
        (Err(e), Ok(_)) => panic!("Inconsistency detected: only linear failed: {e}"),
    }
}

/// Same as [`compile_all`], but the pattern must compile.
pub fn engines(pattern: &str) -> Vec<Regex> {
    compile_all(pattern).unwrap_or_else(|| panic!("{pattern:?} failed to compile"))
}

/// Where the next search starts after a match, stepping over one codepoint
/// after an empty match.
fn next_start(input: &str, start: usize, end: usize) -> usize {
    if start != end {
        end
    } else {
        end + input[end..].chars().next().map_or(1, char::len_utf8)
    }
}

/// All matches of the reference engine, resuming after empty matches the
/// same way the backends do.
fn reference_all(re: &rust_regex::Regex, input: &str) -> Vec<[usize; 2]> {
    let mut result = Vec::new();
    let mut pos = 0;
    while pos <= input.len() {
        let Some(m) = re.find_at(input, pos) else {
            break;
        };
        result.push([m.start(), m.end()]);
        pos = next_start(input, m.start(), m.end());
    }
    result
}

fn reference_all_captures<'s>(re: &rust_regex::Regex, input: &'s str) -> Vec<Vec<Option<&'s str>>> {
    let mut result = Vec::new();
    let mut locations = re.capture_locations();
    let mut pos = 0;
    while pos <= input.len() {
        let Some(m) = re.captures_read_at(&mut locations, input, pos) else {
            break;
        };
        result.push(
            (0..locations.len())
                .map(|i| locations.get(i).map(|(from, to)| &input[from..to]))
                .collect(),
        );
        pos = next_start(input, m.start(), m.end());
    }
    result
}

/// Match a pattern agains a given input on both backends,
/// including rust-regex, and compare the result of both compilation and execution.
pub fn check_all_engines(pattern: &str, input: &str) {
    // Reference engine
    let rust = rust_regex::Regex::new(pattern);
    let ours = compile_all(pattern);

    match (rust, ours) {
        (Ok(rust_re), Some(our_engines)) => {
            // find
            let rust_match = rust_re.find(input).map(|m| [m.start(), m.end()]);
            for engine in &our_engines {
                let my_match = engine.find_first_index(input).unwrap();
                assert_eq!(
                    my_match,
                    rust_match,
                    "Mismatch for pattern {:?} input {:?} on {} (find)",
                    pattern,
                    input,
                    engine.kind()
                );
            }

            // find_all
            let rust_all = reference_all(&rust_re, input);
            for engine in &our_engines {
                let my_all = engine.find_all_indices(input, 0).unwrap();
                assert_eq!(
                    my_all,
                    rust_all,
                    "Mismatch for pattern {:?} input {:?} on {} (find_all)",
                    pattern,
                    input,
                    engine.kind()
                );
            }

            // find_all_captures
            let rust_all_caps = reference_all_captures(&rust_re, input);
            for engine in &our_engines {
                let my_all_caps = engine.find_all_submatch_strings(input, 0).unwrap();
                assert_eq!(
                    my_all_caps,
                    rust_all_caps,
                    "Mismatch for pattern {:?} input {:?} on {} (find_all_captures)",
                    pattern,
                    input,
                    engine.kind()
                );
            }

            // both backends must agree on the index shape too
            let indices: Vec<_> = our_engines
                .iter()
                .map(|engine| engine.find_all_submatch_indices(input, 0).unwrap())
                .collect();
            assert_eq!(
                indices[0], indices[1],
                "Mismatch for pattern {:?} input {:?} (find_all_submatch_indices)",
                pattern, input
            );
        }
        (Err(_), None) => {} // All failed, that's good
        (Ok(_), None) => panic!("Our engines failed to compile but rust-regex succeeded"),
        (Err(e), Some(_)) => panic!("rust-regex failed to compile but our engines succeeded: {e}"),
    }
}
