// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics for the Stable front-end.
//!
//! Lexical and syntactic errors never abort scanning or parsing; they are
//! appended to an [`ErrorList`] and production continues. The list can be
//! sorted by source position and thinned to one entry per line for
//! reporting. Both error types integrate with [`miette`] for rendering.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::Position;

/// An error found in Stable source text, lexical or syntactic.
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic)]
#[diagnostic()]
pub struct SyntaxError {
    /// Where the error was found.
    pub pos: Position,
    /// The error message.
    pub msg: EcoString,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.pos.filename.is_empty() || self.pos.is_valid() {
            write!(f, "{}: {}", self.pos, self.msg)
        } else {
            f.write_str(&self.msg)
        }
    }
}

impl std::error::Error for SyntaxError {}

/// An ordered list of [`SyntaxError`]s.
///
/// Errors are appended in order of first occurrence; [`ErrorList::sort`]
/// reorders them by source position for reporting.
#[derive(Debug, Clone, Default, Diagnostic)]
#[diagnostic()]
pub struct ErrorList {
    #[related]
    errors: Vec<SyntaxError>,
}

impl ErrorList {
    /// Creates an empty error list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error with the given position and message.
    pub fn add(&mut self, pos: Position, msg: impl Into<EcoString>) {
        self.errors.push(SyntaxError {
            pos,
            msg: msg.into(),
        });
    }

    /// Returns the number of errors in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Reports whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the errors in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, SyntaxError> {
        self.errors.iter()
    }

    /// Sorts the list by file name, line, column, and message.
    pub fn sort(&mut self) {
        self.errors.sort_by(|a, b| {
            a.pos
                .filename
                .cmp(&b.pos.filename)
                .then_with(|| a.pos.line.cmp(&b.pos.line))
                .then_with(|| a.pos.column.cmp(&b.pos.column))
                .then_with(|| a.msg.cmp(&b.msg))
        });
    }

    /// Sorts the list and keeps only the first error per `(file, line)`.
    pub fn remove_multiples(&mut self) {
        self.sort();
        let mut last: Option<(EcoString, usize)> = None;
        self.errors.retain(|e| match &last {
            Some((filename, line))
                if *filename == e.pos.filename && *line == e.pos.line =>
            {
                false
            }
            _ => {
                last = Some((e.pos.filename.clone(), e.pos.line));
                true
            }
        });
    }

    /// Converts the list into a result: `Ok(())` when empty, the list
    /// itself otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the list contains at least one error.
    pub fn err(self) -> Result<(), ErrorList> {
        if self.errors.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no errors"),
            [first] => first.fmt(f),
            [first, rest @ ..] => {
                write!(f, "{} (and {} more errors)", first, rest.len())
            }
        }
    }
}

impl std::error::Error for ErrorList {}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a SyntaxError;
    type IntoIter = std::slice::Iter<'a, SyntaxError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl std::ops::Index<usize> for ErrorList {
    type Output = SyntaxError;

    fn index(&self, index: usize) -> &SyntaxError {
        &self.errors[index]
    }
}

/// Failure to obtain source text, before any scanning happens.
///
/// Unlike [`SyntaxError`], these are infrastructure errors: the named file
/// could not be read, or a reader failed mid-stream.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    /// Reading the named source file from the filesystem failed.
    #[error("failed to read {path}")]
    Read {
        /// The path that could not be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A caller-supplied reader failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(filename: &str, line: usize, column: usize) -> Position {
        Position {
            filename: filename.into(),
            offset: 0,
            line,
            column,
        }
    }

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError {
            pos: pos("a.stb", 3, 7),
            msg: "expected ';'".into(),
        };
        assert_eq!(err.to_string(), "a.stb:3:7: expected ';'");

        let err = SyntaxError {
            pos: pos("", 3, 7),
            msg: "expected ';'".into(),
        };
        assert_eq!(err.to_string(), "3:7: expected ';'");

        let err = SyntaxError {
            pos: Position::default(),
            msg: "expected ';'".into(),
        };
        assert_eq!(err.to_string(), "expected ';'");
    }

    #[test]
    fn list_display() {
        let mut list = ErrorList::new();
        assert_eq!(list.to_string(), "no errors");
        assert!(list.clone().err().is_ok());

        list.add(pos("a.stb", 1, 1), "first");
        assert_eq!(list.to_string(), "a.stb:1:1: first");

        list.add(pos("a.stb", 2, 1), "second");
        list.add(pos("a.stb", 3, 1), "third");
        assert_eq!(list.to_string(), "a.stb:1:1: first (and 2 more errors)");
        assert!(list.err().is_err());
    }

    #[test]
    fn sort_orders_by_position() {
        let mut list = ErrorList::new();
        list.add(pos("b.stb", 1, 1), "later file");
        list.add(pos("a.stb", 2, 9), "line two");
        list.add(pos("a.stb", 2, 3), "line two early");
        list.add(pos("a.stb", 1, 1), "line one");
        list.sort();

        let msgs: Vec<&str> =
            list.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            msgs,
            ["line one", "line two early", "line two", "later file"]
        );
    }

    #[test]
    fn remove_multiples_keeps_first_per_line() {
        let mut list = ErrorList::new();
        list.add(pos("a.stb", 1, 5), "kept");
        list.add(pos("a.stb", 1, 9), "dropped");
        list.add(pos("a.stb", 2, 1), "kept too");
        list.add(pos("b.stb", 1, 1), "other file");
        list.remove_multiples();

        let msgs: Vec<&str> =
            list.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(msgs, ["kept", "kept too", "other file"]);
    }
}
