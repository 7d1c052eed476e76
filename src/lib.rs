//! Two regex engines behind one matching contract.
//!
//! [`Backtracking`] wraps a backtracking engine (look-around,
//! backreferences), [`Linear`] a linear-time automaton engine. Both implement
//! [`RegexImpl`], so they return the same shapes: byte-index pairs, ordered
//! groups with one convention for groups that did not participate, and
//! find-all iteration that can resume from any offset. [`Regex`] picks one of
//! them at runtime.
//!
//! ```
//! use dual_regex::{Options, RegexImpl};
//!
//! let re = dual_regex::compile("ABC", &Options::from_flags("i")?)?;
//! assert_eq!(re.find_first_index("xabcx")?, Some([1, 4]));
//! # Ok::<(), dual_regex::Error>(())
//! ```

pub mod backtrack;
pub mod error;
pub mod linear;
pub mod options;
pub mod regex;
pub mod syntax;
pub mod util;

pub use backtrack::Backtracking;
pub use error::{CompileError, Error, MatchError, Result};
pub use linear::Linear;
pub use options::Options;
pub use self::regex::{BackendKind, Builder, Regex, RegexImpl};
pub use util::{Captures, Input, Match, Span};

/// Compiles `pattern` with whichever backend supports it, preferring the
/// linear one.
pub fn compile(pattern: &str, options: &Options) -> Result<Regex, CompileError> {
    Regex::compile(pattern, options)
}
