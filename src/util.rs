/*!
This modules contains the types shared by both backends: the search input,
spans, and the match and captures values handed back to callers.

All offsets are UTF-8 byte offsets into the subject string, on both backends.
*/

use std::ops::Range;
use std::sync::Arc;

use crate::error::Error;

/// Defines the input paramter of a single search step: the subject, and the
/// byte offset at which the search starts. Text before `start` is still
/// visible to anchors and look-behind.
#[derive(Clone, Copy, Debug)]
pub struct Input<'s> {
    /// The subject string against which the regex is matched
    pub subject: &'s str,
    /// Where the search begins.
    /// Default: 0
    pub start: usize,
}

impl<'s> Input<'s> {
    pub fn new(subject: &'s str) -> Self {
        Self { subject, start: 0 }
    }

    /// Returns an input starting at `start`, or an error if `start` is
    /// past the end of the subject or not on a char boundary.
    pub fn start_at(mut self, start: usize) -> Result<Self, Error> {
        if !self.subject.is_char_boundary(start) {
            return Err(Error::InvalidStart {
                start,
                len: self.subject.len(),
            });
        }
        self.start = start;
        Ok(self)
    }

    /// Whether the search position is still inside the subject.
    pub fn valid(&self) -> bool {
        self.start <= self.subject.len()
    }
}

/// A half-open span in a &str. Similar to [`std::ops::Range`], but
/// implements Copy.
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn empty(&self) -> bool {
        self.from == self.to
    }

    /// A span is valid iff `from <= to`. Every backend leaves the slot of a
    /// group that did not participate set to [`Span::invalid`].
    pub fn valid(&self) -> bool {
        self.from <= self.to
    }

    pub fn invalid() -> Span {
        Span { from: 1, to: 0 }
    }

    /// Index pair with `-1` standing in for both bounds of an invalid span.
    pub fn to_indices(self) -> [isize; 2] {
        if self.valid() {
            [self.from as isize, self.to as isize]
        } else {
            [-1, -1]
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Self {
            from: value.start,
            to: value.end,
        }
    }
}

impl From<(usize, usize)> for Span {
    fn from((from, to): (usize, usize)) -> Self {
        Self { from, to }
    }
}

impl From<Span> for [usize; 2] {
    fn from(val: Span) -> Self {
        [val.from, val.to]
    }
}

/// Successful non-capturing match. Contains only the bounds of the
/// overall match.
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub struct Match<'s> {
    pub subject: &'s str,
    pub span: Span,
}

impl<'s> Match<'s> {
    pub fn new(subject: &'s str, span: impl Into<Span>) -> Self {
        let span = span.into();
        Self { subject, span }
    }

    pub fn start(&self) -> usize {
        self.span.from
    }

    pub fn end(&self) -> usize {
        self.span.to
    }

    pub fn as_str(&self) -> &'s str {
        &self.subject[self.span.from..self.span.to]
    }

    /// Returns the byte-index where the next non-overlapping
    /// match could start. This take into account empty match.
    pub fn next_match_start(&self) -> usize {
        if !self.span.empty() {
            return self.span.to;
        }
        // Must advance past the next codepoint otherwise we would always
        // return the same empty match forever. At the end of the subject
        // this steps past it, which ends the iteration.
        self.span.to
            + self.subject[self.span.to..]
                .chars()
                .next()
                .map_or(1, char::len_utf8)
    }
}

/// Successful capturing match. Contains the bounds (if any) of all capture groups
/// defined in the pattern. In particular this include the implicit capture-group
/// 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures<'s> {
    subject: &'s str,
    spans: Box<[Span]>,
    names: Option<Arc<[Option<String>]>>,
}

impl<'s> Captures<'s> {
    pub fn new(subject: &'s str, spans: Box<[Span]>) -> Self {
        Self {
            subject,
            spans,
            names: None,
        }
    }

    pub(crate) fn with_names(mut self, names: Arc<[Option<String>]>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn get(&self, group_index: usize) -> Option<Match<'s>> {
        let span = *self.spans.get(group_index)?;
        if !span.valid() {
            return None;
        }

        Some(Match {
            subject: self.subject,
            span,
        })
    }

    /// Looks a group up by name. `None` if there is no such group or it did
    /// not participate.
    pub fn name(&self, name: &str) -> Option<Match<'s>> {
        let names = self.names.as_ref()?;
        let index = names.iter().position(|n| n.as_deref() == Some(name))?;
        self.get(index)
    }

    pub fn group0(&self) -> Match<'s> {
        // Group 0 is always written by a successful search.
        Match {
            subject: self.subject,
            span: self.spans[0],
        }
    }

    pub fn group_len(&self) -> usize {
        self.spans.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Match<'s>>> + '_ {
        (0..self.group_len()).map(|i| self.get(i))
    }

    /// Group substrings in declaration order, `None` for groups that did not
    /// participate.
    pub fn to_strings(&self) -> Vec<Option<&'s str>> {
        self.iter().map(|m| m.map(|m| m.as_str())).collect()
    }

    /// Flat `[start0, end0, start1, end1, ...]` list, with `-1, -1` for
    /// groups that did not participate.
    pub fn to_indices(&self) -> Vec<isize> {
        self.spans.iter().flat_map(|span| span.to_indices()).collect()
    }
}
