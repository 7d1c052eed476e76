//! Error types shared by both backends.
//!
//! Compilation and matching fail in different ways and are kept apart:
//! a [`CompileError`] is only ever returned while building a pattern, a
//! [`MatchError`] only while searching. Not finding a match is never an
//! error.

use thiserror::Error;

use crate::regex::BackendKind;

/// Failure to turn a pattern into a compiled regex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The engine rejected the pattern. Holds the engine's own diagnostic.
    #[error("{0}")]
    Syntax(String),

    /// An option was requested that the backend cannot honor.
    #[error("option `{option}` is not supported by the {backend} backend")]
    UnsupportedOption {
        option: &'static str,
        backend: BackendKind,
    },

    /// A flag letter with no corresponding option.
    #[error("unknown regex flag `{0}`")]
    UnknownFlag(char),
}

impl From<regex::Error> for CompileError {
    fn from(value: regex::Error) -> Self {
        Self::Syntax(value.to_string())
    }
}

impl From<fancy_regex::Error> for CompileError {
    fn from(value: fancy_regex::Error) -> Self {
        Self::Syntax(value.to_string())
    }
}

/// Failure of the engine itself while searching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The backtracking budget ran out before the search finished.
    #[error("backtrack limit exceeded")]
    BacktrackLimitExceeded,

    /// Any other runtime failure reported by the engine.
    #[error("engine failure: {0}")]
    Engine(String),
}

impl From<fancy_regex::Error> for MatchError {
    fn from(value: fancy_regex::Error) -> Self {
        match value {
            fancy_regex::Error::RuntimeError(fancy_regex::RuntimeError::BacktrackLimitExceeded) => {
                Self::BacktrackLimitExceeded
            }
            other => Self::Engine(other.to_string()),
        }
    }
}

/// Any error the public API can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Match(#[from] MatchError),

    /// The resume offset is past the end of the input or splits a character.
    #[error("start offset {start} is not a valid position in an input of {len} bytes")]
    InvalidStart { start: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
