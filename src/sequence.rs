use std::fmt;

use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::cursors::{SequenceCursor, SliceCursor};
use crate::error::{Result, SequenceError};
use crate::position::Position;
use crate::segment::{Segment, SegmentChain, SegmentId};

/// A read-only window `[start, end)` over a segment chain
///
/// A sequence never copies element data: slicing produces another window over
/// the same chain, and the chain (with the buffers it borrows) must outlive
/// every sequence and cursor derived from it.
pub struct Sequence<'a, T> {
    chain: &'a SegmentChain<'a, T>,
    start: Position,
    end: Position,
}

impl<T> Clone for Sequence<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Sequence<'_, T> {}

impl<'a, T: Atomic> Sequence<'a, T> {
    /// Create a view from `first[start_offset]` up to `last[end_offset]`
    ///
    /// Both segments must belong to `chain` and `first` must not come after
    /// `last`. Violations are reported as [`SequenceError::SegmentOrder`] or
    /// [`SequenceError::InvertedBounds`] rather than truncating the view.
    pub fn new(
        chain: &'a SegmentChain<'a, T>,
        first: SegmentId,
        start_offset: usize,
        last: SegmentId,
        end_offset: usize,
    ) -> Result<Self> {
        Self::from_positions(
            chain,
            Position::new(first, start_offset),
            Position::new(last, end_offset),
        )
    }

    pub fn from_positions(
        chain: &'a SegmentChain<'a, T>,
        start: Position,
        end: Position,
    ) -> Result<Self> {
        chain.validate(start)?;
        chain.validate(end)?;

        if start.segment() > end.segment() {
            tracing::debug!(%start, %end, "rejected sequence with inverted segment order");
            return Err(SequenceError::SegmentOrder {
                first: start.segment(),
                last: end.segment(),
            });
        }
        if start.segment() == end.segment() && start.offset() > end.offset() {
            tracing::debug!(%start, %end, "rejected sequence with inverted offsets");
            return Err(SequenceError::InvertedBounds {
                start: chain.global_index(start),
                end: chain.global_index(end),
            });
        }

        Ok(Self::from_parts(chain, start, end))
    }

    /// Build a view from positions already validated against `chain`
    ///
    /// A start sitting one past the end of a segment is moved to the first
    /// element of the following segment, never beyond `end`'s segment.
    pub(crate) fn from_parts(
        chain: &'a SegmentChain<'a, T>,
        start: Position,
        end: Position,
    ) -> Self {
        let mut start = start;
        while start.segment() < end.segment() {
            match chain.segment(start.segment()) {
                Some(segment) if start.offset() == segment.len() => match segment.next() {
                    Some(next) => start = Position::new(next, 0),
                    None => break,
                },
                _ => break,
            }
        }
        Sequence { chain, start, end }
    }

    pub fn chain(&self) -> &'a SegmentChain<'a, T> {
        self.chain
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn len(&self) -> usize {
        self.chain.global_index(self.end) - self.chain.global_index(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of `position` counted from the start of the whole chain
    pub fn global_index(&self, position: Position) -> Result<usize> {
        self.chain.validate(position)?;
        Ok(self.chain.global_index(position))
    }

    /// The view from `from` to the end of this view
    pub fn slice(&self, from: Position) -> Result<Self> {
        self.slice_to(from, self.end)
    }

    /// The view `[from, to)`, which must lie inside this view
    pub fn slice_to(&self, from: Position, to: Position) -> Result<Self> {
        let from_index = self.global_index(from)?;
        let to_index = self.global_index(to)?;
        self.check_bounds(from_index)?;
        self.check_bounds(to_index)?;
        if to_index < from_index {
            return Err(SequenceError::InvertedBounds {
                start: from_index,
                end: to_index,
            });
        }

        // Equal indices may still name different segments.
        let to = if to_index == from_index { from } else { to };
        Ok(Self::from_parts(self.chain, from, to))
    }

    /// The position `offset` elements after the start of this view
    ///
    /// `offset == len()` yields [`Sequence::end`].
    pub fn get_position(&self, offset: usize) -> Result<Position> {
        let start_index = self.chain.global_index(self.start);
        let len = self.len();
        if offset > len {
            return Err(SequenceError::PositionOutOfBounds {
                index: start_index.saturating_add(offset),
                start: start_index,
                end: start_index + len,
            });
        }
        if offset == len {
            return Ok(self.end);
        }

        let target = start_index + offset;
        self.segment_ids()
            .find_map(|id| {
                let segment = self.chain.segment(id)?;
                (target < segment.end_index())
                    .then(|| Position::new(id, target - segment.running_index()))
            })
            .ok_or(SequenceError::PositionOutOfBounds {
                index: target,
                start: start_index,
                end: start_index + len,
            })
    }

    /// The view of `count` elements starting `offset` elements in
    pub fn slice_range(&self, offset: usize, count: usize) -> Result<Self> {
        let start = self.get_position(offset)?;
        let end = self.get_position(offset.saturating_add(count))?;
        Ok(Self::from_parts(self.chain, start, end))
    }

    /// Copy every element of the view into the front of `destination`
    pub fn copy_to(&self, destination: &mut [T]) -> Result<()> {
        let len = self.len();
        if destination.len() < len {
            return Err(SequenceError::DestinationTooShort {
                needed: len,
                available: destination.len(),
            });
        }

        let mut written = 0;
        let mut pieces = 0;
        for piece in self.segments() {
            destination[written..written + piece.len()].copy_from_slice(piece);
            written += piece.len();
            pieces += 1;
        }

        tracing::trace!(len, segments = pieces, "copied sequence");
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        for piece in self.segments() {
            out.extend_from_slice(piece);
        }
        out
    }

    /// Check whether every element of the view lives in the start segment
    ///
    /// An end stored as the first position of the next segment still counts.
    pub fn is_single_segment(&self) -> bool {
        self.chain
            .segment(self.start.segment())
            .is_some_and(|segment| self.chain.global_index(self.end) <= segment.end_index())
    }

    /// The underlying slice, without copying, when the view lies in one segment
    pub fn as_contiguous(&self) -> Option<&'a [T]> {
        if !self.is_single_segment() {
            return None;
        }
        let from = self.start.offset();
        self.chain
            .segment(self.start.segment())?
            .data()
            .get(from..from + self.len())
    }

    /// The first non-empty contiguous piece of the view
    pub fn first_span(&self) -> &'a [T] {
        self.segments()
            .find(|piece| !piece.is_empty())
            .unwrap_or_default()
    }

    /// The contiguous pieces of the view in chain order, zero-length ones included
    pub fn segments(&self) -> Segments<'a, T> {
        Segments {
            chain: self.chain,
            next: Some(self.start.segment()),
            start: self.start,
            end: self.end,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + use<'a, T> {
        self.segments().flat_map(|piece| piece.iter().copied())
    }

    /// Position of the first element equal to `value`
    pub fn position_of(&self, value: T) -> Option<Position> {
        let mut cursor = self.cursor();
        cursor
            .try_advance_to(value, false)
            .then(|| cursor.position())
    }

    pub fn cursor(&self) -> SequenceCursor<'a, T> {
        SequenceCursor::new(*self)
    }

    /// A cursor over the underlying slice when the view lies in one segment
    pub fn contiguous_cursor(&self) -> Option<SliceCursor<'a, T>> {
        self.as_contiguous().map(SliceCursor::new)
    }

    fn check_bounds(&self, index: usize) -> Result<()> {
        let start = self.chain.global_index(self.start);
        let end = self.chain.global_index(self.end);
        if index < start || index > end {
            return Err(SequenceError::PositionOutOfBounds { index, start, end });
        }
        Ok(())
    }

    fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + use<'a, T> {
        let chain = self.chain;
        let last = self.end.segment();
        std::iter::successors(Some(self.start.segment()), move |id| {
            if *id == last {
                None
            } else {
                chain.segment(*id).and_then(Segment::next)
            }
        })
    }
}

impl<T> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl<T: Atomic> fmt::Display for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Sequences compare by content, wherever their elements live
impl<'b, T: Atomic> PartialEq<Sequence<'b, T>> for Sequence<'_, T> {
    fn eq(&self, other: &Sequence<'b, T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

/// Iterator over the contiguous pieces of a [`Sequence`]
#[derive(Debug)]
pub struct Segments<'a, T> {
    chain: &'a SegmentChain<'a, T>,
    next: Option<SegmentId>,
    start: Position,
    end: Position,
}

impl<'a, T> Iterator for Segments<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let segment = self.chain.segment(id)?;
        let from = if id == self.start.segment() {
            self.start.offset()
        } else {
            0
        };
        let to = if id == self.end.segment() {
            self.end.offset()
        } else {
            segment.len()
        };
        self.next = if id == self.end.segment() {
            None
        } else {
            segment.next()
        };
        segment.data().get(from..to)
    }
}
