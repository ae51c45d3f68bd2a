//! Source spans and positions (§3.2, §6).
//!
//! The teacher represents spans as `rowan::TextRange` (byte offsets only) and
//! slices text from the source lazily. This spec's Token needs line/column
//! too (the external tokenizer contract carries `{byte, line, col}` per
//! endpoint), so `Span` generalizes `TextRange` with that extra pair while
//! keeping the same half-open, byte-offset backbone.

use std::cmp::{max, min};
use std::fmt;

/// A single point in the source: byte offset plus 1-based line/column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Position {
    pub byte: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(byte: u32, line: u32, column: u32) -> Self {
        Self { byte, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[start, end)` byte range with line/column endpoints attached.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `pos`, used for EOF sentinels and synthesized
    /// diagnostics that have no real source range.
    pub const fn empty(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn len(&self) -> u32 {
        self.end.byte.saturating_sub(self.start.byte)
    }

    pub fn is_empty(&self) -> bool {
        self.start.byte == self.end.byte
    }

    pub fn contains_span(&self, other: Span) -> bool {
        self.start.byte <= other.start.byte && other.end.byte <= self.end.byte
    }

    /// Smallest span covering both `self` and `other`. Used to build a
    /// joint span for a split `:=` token (Testable Property 3) and for
    /// synthesized parent spans.
    pub fn cover(self, other: Span) -> Span {
        let start = if self.start.byte <= other.start.byte {
            self.start
        } else {
            other.start
        };
        let end = if self.end.byte >= other.end.byte {
            self.end
        } else {
            other.end
        };
        Span::new(start, end)
    }

    /// True iff `self` and `other` are byte-contiguous (end of one equals
    /// start of the other), required by the walrus-split invariant.
    pub fn is_contiguous_with(&self, other: Span) -> bool {
        self.end.byte == other.start.byte || other.end.byte == self.start.byte
    }

    pub fn byte_range(&self) -> std::ops::Range<u32> {
        min(self.start.byte, self.end.byte)..max(self.start.byte, self.end.byte)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(b: u32, l: u32, c: u32) -> Position {
        Position::new(b, l, c)
    }

    #[test]
    fn cover_spans_joint_range() {
        let a = Span::new(pos(0, 1, 1), pos(1, 1, 2));
        let b = Span::new(pos(1, 1, 2), pos(2, 1, 3));
        assert!(a.is_contiguous_with(b));
        let joint = a.cover(b);
        assert_eq!(joint.start.byte, 0);
        assert_eq!(joint.end.byte, 2);
    }
}
