use std::fmt;

use crate::segment::SegmentId;

/// A location inside a segment chain: a segment plus an offset into it
///
/// An offset equal to the segment length is legal and means "one past the
/// last element of this segment". Positions only mean something relative to
/// the chain they came from; compare them through
/// [`Sequence::global_index`](crate::Sequence::global_index), since the end
/// of one segment and the start of the next name the same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    segment: SegmentId,
    offset: usize,
}

impl Position {
    pub const fn new(segment: SegmentId, offset: usize) -> Self {
        Position { segment, offset }
    }

    pub const fn segment(&self) -> SegmentId {
        self.segment
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) const fn forward(self, count: usize) -> Self {
        Position {
            segment: self.segment,
            offset: self.offset + count,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.segment, self.offset)
    }
}
