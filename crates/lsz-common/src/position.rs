//! Line/column source positions.
//!
//! Type errors produced by the property resolver carry a [`Location`] that
//! spans the indexing expression which failed. Lines and columns are
//! zero-based; [`Location`]'s `Display` renders them one-based, the way
//! editors and command-line diagnostics expect them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based line/column pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Shift the position right by `columns` on the same line.
    pub const fn shifted(self, columns: u32) -> Self {
        Self {
            line: self.line,
            column: self.column + columns,
        }
    }
}

/// A half-open source range `[begin, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub begin: Position,
    pub end: Position,
}

impl Location {
    pub const fn new(begin: Position, end: Position) -> Self {
        Self { begin, end }
    }

    /// Location covering `length` columns starting at `begin`.
    pub const fn with_length(begin: Position, length: u32) -> Self {
        Self {
            begin,
            end: begin.shifted(length),
        }
    }

    /// Returns `true` if `pos` lies inside this location.
    pub fn contains(&self, pos: Position) -> bool {
        self.begin <= pos && pos < self.end
    }

    /// Returns `true` if `other` is fully enclosed by this location.
    pub fn encloses(&self, other: &Location) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line + 1, self.column + 1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) - ({})", self.begin, self.end)
    }
}

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod tests;
