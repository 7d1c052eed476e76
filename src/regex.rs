//! Types and API for Regex matching
//!
//! This module defines the [`RegexImpl`] trait, the contract both backends
//! implement, and the [`Regex`] struct, which is a nice wrapper dispatching to
//! one of them at runtime.
//!
//! Backends only implement a single search step ([`RegexImpl::exec`]). All
//! queries, and in particular the find-all iteration with its handling of
//! empty matches, are written once on top of it, which is what makes the
//! backends interchangeable.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::backtrack::Backtracking;
use crate::error::{CompileError, Error, MatchError};
use crate::linear::Linear;
use crate::options::Options;
use crate::syntax;
use crate::util::{Captures, Input, Match, Span};

/// The engines available behind [`Regex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Backtracking engine with look-around and backreferences.
    Backtracking,
    /// Automaton engine, linear in the input, no look-around.
    Linear,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Backtracking => write!(f, "backtracking"),
            BackendKind::Linear => write!(f, "linear"),
        }
    }
}

/// The matching contract shared by every backend.
///
/// Defines the api implemented by every regex engine in this crate. The four
/// query methods are provided and shared by all implementations; an engine
/// only has to compile patterns and run one search step.
pub trait RegexImpl: Send + Sync {
    /// Compiles `pattern`. Options the engine cannot honor are rejected here,
    /// never at match time.
    fn compile(pattern: &str, options: &Options) -> Result<Self, CompileError>
    where
        Self: Sized;

    fn kind(&self) -> BackendKind;

    /// The pattern as written by the caller.
    fn as_str(&self) -> &str;

    fn options(&self) -> &Options;

    /// Number of groups, including the implicit group 0.
    fn capture_count(&self) -> usize;

    /// Group names in declaration order, `None` for unnamed groups.
    fn capture_names(&self) -> Arc<[Option<String>]>;

    /// Finds the leftmost match starting at or after `input.start`, and fills
    /// the provided capture group array.
    /// If the given array is of size n, then only the n-first capture groups
    /// will be written. Groups that did not participate are set to
    /// [`Span::invalid`].
    /// This method is enough to write all higher-level functionalities.
    fn exec(&self, input: Input<'_>, captures: &mut [Span]) -> Result<bool, MatchError>;

    /// Returns an iterator over all non-overlapping matches in the input.
    fn find_iter<'r, 's>(&'r self, input: Input<'s>) -> AllMatch<'r, 's, Self>
    where
        Self: Sized,
    {
        AllMatch {
            regex: self,
            input,
            spans: [Span::invalid()],
            done: false,
        }
    }

    /// Returns an iterator over all non-overlapping matches in the input, with
    /// their capture group bounds. If only the overall match is needed, you
    /// should prefer the use of `find_iter` since it can be faster.
    fn captures_iter<'r, 's>(&'r self, input: Input<'s>) -> AllCaptures<'r, 's, Self>
    where
        Self: Sized,
    {
        AllCaptures {
            regex: self,
            input,
            names: self.capture_names(),
            spans: vec![Span::invalid(); self.capture_count()].into_boxed_slice(),
            done: false,
        }
    }

    /// Bounds of the first match in `subject`, if any.
    fn find_first_index(&self, subject: &str) -> Result<Option<[usize; 2]>, Error> {
        let mut spans = [Span::invalid()];
        if self.exec(Input::new(subject), &mut spans)? {
            Ok(Some(spans[0].into()))
        } else {
            Ok(None)
        }
    }

    /// Bounds of every match from `start_at` on.
    fn find_all_indices(&self, subject: &str, start_at: usize) -> Result<Vec<[usize; 2]>, Error>
    where
        Self: Sized,
    {
        let input = Input::new(subject).start_at(start_at)?;
        self.find_iter(input)
            .map(|m| m.map(|m| m.span.into()))
            .collect()
    }

    /// Group substrings of every match from `start_at` on.
    fn find_all_submatch_strings<'s>(
        &self,
        subject: &'s str,
        start_at: usize,
    ) -> Result<Vec<Vec<Option<&'s str>>>, Error>
    where
        Self: Sized,
    {
        let input = Input::new(subject).start_at(start_at)?;
        self.captures_iter(input)
            .map(|caps| caps.map(|caps| caps.to_strings()))
            .collect()
    }

    /// Flat group bounds of every match from `start_at` on, `-1` for groups
    /// that did not participate.
    fn find_all_submatch_indices(
        &self,
        subject: &str,
        start_at: usize,
    ) -> Result<Vec<Vec<isize>>, Error>
    where
        Self: Sized,
    {
        let input = Input::new(subject).start_at(start_at)?;
        self.captures_iter(input)
            .map(|caps| caps.map(|caps| caps.to_indices()))
            .collect()
    }
}

/// A regular expression, compiled for one of the backends.
pub struct Regex {
    engine: RegexEngine,
}

impl Regex {
    pub fn backtracking(pattern: &str) -> Result<Self, CompileError> {
        Builder::new(pattern).backtracking()
    }

    pub fn linear(pattern: &str) -> Result<Self, CompileError> {
        Builder::new(pattern).linear()
    }

    /// Compiles with the linear backend when it supports the pattern, and the
    /// backtracking backend otherwise.
    pub fn new(pattern: &str) -> Result<Self, CompileError> {
        Builder::new(pattern).auto()
    }

    /// Returns true whenever the input matches the regex or not, without
    /// returning the bounds of the match.
    pub fn is_match(&self, subject: &str) -> Result<bool, Error> {
        Ok(self.exec(Input::new(subject), &mut [])?)
    }

    /// Match the regex against the input and returns the bounds of the match or
    /// None.
    pub fn find<'s>(&self, subject: &'s str) -> Result<Option<Match<'s>>, Error> {
        self.find_iter(Input::new(subject)).next().transpose()
    }

    /// Match the regex against the input and returns a match with all its
    /// capture groups bounds or None.
    pub fn captures<'s>(&self, subject: &'s str) -> Result<Option<Captures<'s>>, Error> {
        self.captures_iter(Input::new(subject)).next().transpose()
    }
}

impl RegexImpl for Regex {
    fn compile(pattern: &str, options: &Options) -> Result<Self, CompileError> {
        Builder::new(pattern).options(options.clone()).auto()
    }

    fn kind(&self) -> BackendKind {
        match &self.engine {
            RegexEngine::Backtracking(imp) => imp.kind(),
            RegexEngine::Linear(imp) => imp.kind(),
        }
    }

    fn as_str(&self) -> &str {
        match &self.engine {
            RegexEngine::Backtracking(imp) => imp.as_str(),
            RegexEngine::Linear(imp) => imp.as_str(),
        }
    }

    fn options(&self) -> &Options {
        match &self.engine {
            RegexEngine::Backtracking(imp) => imp.options(),
            RegexEngine::Linear(imp) => imp.options(),
        }
    }

    fn capture_count(&self) -> usize {
        match &self.engine {
            RegexEngine::Backtracking(imp) => imp.capture_count(),
            RegexEngine::Linear(imp) => imp.capture_count(),
        }
    }

    fn capture_names(&self) -> Arc<[Option<String>]> {
        match &self.engine {
            RegexEngine::Backtracking(imp) => imp.capture_names(),
            RegexEngine::Linear(imp) => imp.capture_names(),
        }
    }

    fn exec(&self, input: Input<'_>, captures: &mut [Span]) -> Result<bool, MatchError> {
        match &self.engine {
            RegexEngine::Backtracking(imp) => imp.exec(input, captures),
            RegexEngine::Linear(imp) => imp.exec(input, captures),
        }
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Regex")
            .field("pattern", &self.as_str())
            .field("backend", &self.kind())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Builder<'s> {
    pattern: &'s str,
    options: Options,
}

impl<'s> Builder<'s> {
    pub fn new(pattern: &'s str) -> Self {
        Self {
            pattern,
            options: Options::default(),
        }
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.options.case_insensitive = value;
        self
    }

    pub fn multiline(mut self, value: bool) -> Self {
        self.options.multiline = value;
        self
    }

    pub fn singleline(mut self, value: bool) -> Self {
        self.options.singleline = value;
        self
    }

    pub fn extended(mut self, value: bool) -> Self {
        self.options.extended = value;
        self
    }

    pub fn explicit_capture(mut self, value: bool) -> Self {
        self.options.explicit_capture = value;
        self
    }

    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.options.backtrack_limit = Some(limit);
        self
    }

    pub fn backtracking(self) -> Result<Regex, CompileError> {
        let imp = Backtracking::compile(self.pattern, &self.options)?;
        Ok(Regex {
            engine: RegexEngine::Backtracking(imp),
        })
    }

    pub fn linear(self) -> Result<Regex, CompileError> {
        let imp = Linear::compile(self.pattern, &self.options)?;
        Ok(Regex {
            engine: RegexEngine::Linear(imp),
        })
    }

    pub fn auto(self) -> Result<Regex, CompileError> {
        match syntax::select_backend(self.pattern, &self.options) {
            BackendKind::Linear => self.linear(),
            BackendKind::Backtracking => self.backtracking(),
        }
    }
}

/// Iterator over all match in a regex.
///
/// Stops after the first error.
pub struct AllMatch<'r, 's, R> {
    regex: &'r R,
    input: Input<'s>,
    spans: [Span; 1],
    done: bool,
}

impl<'r, 's, R: RegexImpl> Iterator for AllMatch<'r, 's, R> {
    type Item = Result<Match<'s>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.input.valid() {
            return None;
        }
        self.spans[0] = Span::invalid();
        match self.regex.exec(self.input, &mut self.spans) {
            Ok(true) => {}
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        }
        let result = Match::new(self.input.subject, self.spans[0]);
        debug_assert!(result.start() >= self.input.start);
        trace!(from = result.start(), to = result.end(), "match");
        self.input.start = result.next_match_start();
        Some(Ok(result))
    }
}

/// Iterator over all match and their capture groups.
///
/// Stops after the first error.
pub struct AllCaptures<'r, 's, R> {
    regex: &'r R,
    input: Input<'s>,
    names: Arc<[Option<String>]>,
    spans: Box<[Span]>,
    done: bool,
}

impl<'r, 's, R: RegexImpl> Iterator for AllCaptures<'r, 's, R> {
    type Item = Result<Captures<'s>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.input.valid() {
            return None;
        }
        self.spans.fill(Span::invalid());
        match self.regex.exec(self.input, &mut self.spans) {
            Ok(true) => {}
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        }
        let result = Captures::new(self.input.subject, self.spans.clone())
            .with_names(Arc::clone(&self.names));
        let group0 = result.group0();
        debug_assert!(group0.start() >= self.input.start);
        trace!(from = group0.start(), to = group0.end(), groups = result.group_len(), "captures");
        self.input.start = group0.next_match_start();
        Some(Ok(result))
    }
}

/// A regex implementation. Used to dispatch to
/// the right version at runtime.
pub(crate) enum RegexEngine {
    Backtracking(Backtracking),
    Linear(Linear),
}
