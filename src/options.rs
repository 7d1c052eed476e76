//! Compile-time options.
//!
//! Both backends take the same [`Options`]; each backend decides which of
//! them it can honor and rejects the rest with a
//! [`CompileError::UnsupportedOption`] when the pattern is compiled.

use std::str::FromStr;

use crate::error::CompileError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub case_insensitive: bool,
    /// `^` and `$` also match at line boundaries.
    pub multiline: bool,
    /// `.` also matches `\n`.
    pub singleline: bool,
    /// Ignore whitespace in the pattern and allow `#` comments.
    pub extended: bool,
    /// Accepted for compatibility. Case folding in both engines is already
    /// culture-invariant.
    pub culture_invariant: bool,
    /// Only named groups capture.
    pub explicit_capture: bool,
    pub right_to_left: bool,
    /// Backtracking steps allowed per search. `None` keeps the engine default.
    pub backtrack_limit: Option<usize>,
    /// Upper bound, in bytes, on the compiled program.
    pub size_limit: Option<usize>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses single-letter flags: `i`, `m`, `s`, `x` and `n`.
    pub fn from_flags(flags: &str) -> Result<Self, CompileError> {
        let mut options = Self::default();
        for flag in flags.chars() {
            match flag {
                'i' => options.case_insensitive = true,
                'm' => options.multiline = true,
                's' => options.singleline = true,
                'x' => options.extended = true,
                'n' => options.explicit_capture = true,
                other => return Err(CompileError::UnknownFlag(other)),
            }
        }
        Ok(options)
    }

    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    pub fn multiline(mut self, value: bool) -> Self {
        self.multiline = value;
        self
    }

    pub fn singleline(mut self, value: bool) -> Self {
        self.singleline = value;
        self
    }

    pub fn extended(mut self, value: bool) -> Self {
        self.extended = value;
        self
    }

    pub fn culture_invariant(mut self, value: bool) -> Self {
        self.culture_invariant = value;
        self
    }

    pub fn explicit_capture(mut self, value: bool) -> Self {
        self.explicit_capture = value;
        self
    }

    pub fn right_to_left(mut self, value: bool) -> Self {
        self.right_to_left = value;
        self
    }

    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }

    pub fn size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }
}

impl FromStr for Options {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_flags(s)
    }
}

impl From<&Options> for regex_syntax::ParserBuilder {
    fn from(value: &Options) -> Self {
        let mut builder = regex_syntax::ParserBuilder::new();
        builder
            .case_insensitive(value.case_insensitive)
            .multi_line(value.multiline)
            .dot_matches_new_line(value.singleline)
            .ignore_whitespace(value.extended);
        builder
    }
}
