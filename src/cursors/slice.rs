use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::error::{Result, SequenceError};

/// Cursor over a single contiguous slice
///
/// This is the one-segment counterpart of
/// [`SequenceCursor`](crate::SequenceCursor): positions are plain indices and
/// [`Cursor::remaining`] hands back the unread subslice.
#[derive(Debug, Copy, Clone)]
pub enum SliceCursor<'a, T> {
    Valid { data: &'a [T], position: usize },
    End { data: &'a [T] },
}

impl<'a, T: Atomic> SliceCursor<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        if data.is_empty() {
            return SliceCursor::End { data };
        }
        SliceCursor::Valid { data, position: 0 }
    }

    pub fn source(&self) -> &'a [T] {
        match *self {
            SliceCursor::Valid { data, .. } | SliceCursor::End { data } => data,
        }
    }

    fn moved_to(self, position: usize) -> Self {
        let data = self.source();
        if position >= data.len() {
            SliceCursor::End { data }
        } else {
            SliceCursor::Valid { data, position }
        }
    }
}

impl<'a, T: Atomic> Cursor for SliceCursor<'a, T> {
    type Element = T;
    type Position = usize;
    type Remaining = &'a [T];

    fn at_end(&self) -> bool {
        matches!(self, SliceCursor::End { .. })
    }

    fn try_read(&mut self) -> Option<T> {
        let value = self.try_peek()?;
        *self = self.moved_to(self.position() + 1);
        Some(value)
    }

    fn try_peek(&self) -> Option<T> {
        match self {
            SliceCursor::Valid { data, position } => data.get(*position).copied(),
            SliceCursor::End { .. } => None,
        }
    }

    fn try_advance_to(&mut self, target: T, advance_past_match: bool) -> bool {
        let start = self.position();
        match self.remaining().iter().position(|value| *value == target) {
            Some(index) => {
                *self = self.moved_to(start + index + usize::from(advance_past_match));
                true
            }
            None => {
                *self = self.moved_to(self.source().len());
                false
            }
        }
    }

    fn advance(&mut self, count: usize) -> Result<()> {
        let remaining = self.remaining_len();
        if count > remaining {
            return Err(SequenceError::AdvancePastEnd {
                requested: count,
                remaining,
            });
        }
        *self = self.moved_to(self.position() + count);
        Ok(())
    }

    fn consumed(&self) -> usize {
        self.position()
    }

    fn remaining_len(&self) -> usize {
        self.source().len() - self.position()
    }

    fn position(&self) -> usize {
        match self {
            SliceCursor::Valid { position, .. } => *position,
            SliceCursor::End { data } => data.len(),
        }
    }

    fn remaining(&self) -> &'a [T] {
        let data = self.source();
        &data[self.position()..]
    }
}
