// Copyright (C) 2019-2026 The Runic Authors.
// This file is part of the Runic library.

// The Runic library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Runic library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Runic library. If not, see <https://www.gnu.org/licenses/>.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single point in source text: line and column are one-indexed, the
/// byte offset is zero-indexed into the file's UTF-8 bytes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub byte_offset: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32, byte_offset: u32) -> Self {
        Self { line, column, byte_offset }
    }

    /// The position one byte-offset past a single ASCII character at `self`.
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Position::new(self.line + 1, 1, self.byte_offset + ch.len_utf8() as u32)
        } else {
            Position::new(self.line, self.column + 1, self.byte_offset + ch.len_utf8() as u32)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[lo, hi)` between two positions. Every AST node
/// carries one; `hi` is always `>= lo`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub lo: Position,
    pub hi: Position,
}

impl Span {
    pub const fn new(lo: Position, hi: Position) -> Self {
        Self { lo, hi }
    }

    /// The smallest span enclosing both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        let lo = if self.lo.byte_offset <= other.lo.byte_offset { self.lo } else { other.lo };
        let hi = if self.hi.byte_offset >= other.hi.byte_offset { self.hi } else { other.hi };
        Span::new(lo, hi)
    }

    pub fn dummy() -> Span {
        Span::default()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_newlines() {
        let p = Position::new(1, 1, 0);
        let p = p.advance('a');
        assert_eq!(p, Position::new(1, 2, 1));
        let p = p.advance('\n');
        assert_eq!(p, Position::new(2, 1, 2));
    }

    #[test]
    fn merge_is_the_enclosing_span() {
        let a = Span::new(Position::new(1, 1, 0), Position::new(1, 5, 4));
        let b = Span::new(Position::new(2, 1, 10), Position::new(2, 3, 12));
        let m = a.merge(b);
        assert_eq!(m.lo, a.lo);
        assert_eq!(m.hi, b.hi);
    }

    #[test]
    fn every_span_has_hi_not_before_lo() {
        let s = Span::new(Position::new(3, 1, 5), Position::new(3, 1, 5));
        assert!(s.hi.byte_offset >= s.lo.byte_offset);
    }
}
