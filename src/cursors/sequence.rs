use crate::atomic::Atomic;
use crate::cursor::Cursor;
use crate::error::{Result, SequenceError};
use crate::position::Position;
use crate::sequence::Sequence;

/// Forward-only reader over a [`Sequence`]
///
/// The cursor keeps its own position, so any number of cursors can walk the
/// same sequence independently. Cloning a cursor gives a second reader that
/// continues from the same place.
///
/// ```rust
/// use segseq::{Cursor, SegmentChain};
///
/// let (one, two) = ([1, 2, 3], [4, 5]);
/// let chain = SegmentChain::from_buffers([&one[..], &two[..]]).unwrap();
/// let mut cursor = chain.sequence().cursor();
///
/// assert!(cursor.try_advance_to(3, true));
/// assert_eq!(cursor.try_read(), Some(4));
/// assert_eq!(cursor.remaining().to_vec(), vec![5]);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceCursor<'a, T> {
    sequence: Sequence<'a, T>,
    position: Position,
    consumed: usize,
    length: usize,
}

impl<'a, T: Atomic> SequenceCursor<'a, T> {
    pub fn new(sequence: Sequence<'a, T>) -> Self {
        let mut cursor = SequenceCursor {
            sequence,
            position: sequence.start(),
            consumed: 0,
            length: sequence.len(),
        };
        cursor.settle();
        cursor
    }

    /// The sequence this cursor was created over
    pub fn sequence(&self) -> Sequence<'a, T> {
        self.sequence
    }

    /// The unread part of the current segment
    ///
    /// Empty only when the cursor is at the end.
    pub fn unread_span(&self) -> &'a [T] {
        let chain = self.sequence.chain();
        let Some(segment) = chain.segment(self.position.segment()) else {
            return &[];
        };
        segment
            .data()
            .get(self.position.offset()..self.limit())
            .unwrap_or_default()
    }

    /// Skip every consecutive element equal to `value`, returning how many
    pub fn advance_past(&mut self, value: T) -> usize {
        let mut skipped = 0;
        while self.try_peek() == Some(value) {
            self.step(1);
            skipped += 1;
        }
        skipped
    }

    /// Check whether the next element is `value`, stepping past it if asked
    pub fn is_next(&mut self, value: T, advance_past: bool) -> bool {
        if self.try_peek() != Some(value) {
            return false;
        }
        if advance_past {
            self.step(1);
        }
        true
    }

    /// Read everything up to the next `delimiter`
    ///
    /// Returns the elements before the delimiter as a view and leaves the
    /// cursor on the delimiter, or past it when `advance_past_delimiter` is
    /// set. When no delimiter follows, returns `None` and does not move.
    pub fn try_read_to(
        &mut self,
        delimiter: T,
        advance_past_delimiter: bool,
    ) -> Option<Sequence<'a, T>> {
        let mut probe = self.clone();
        if !probe.try_advance_to(delimiter, false) {
            return None;
        }

        let read = Sequence::from_parts(self.sequence.chain(), self.position, probe.position);
        if advance_past_delimiter {
            probe.step(1);
        }
        *self = probe;
        Some(read)
    }

    /// Fill all of `destination` from the unread elements without moving
    ///
    /// Returns `false` and copies nothing if fewer elements remain than
    /// `destination` holds.
    pub fn try_copy_to(&self, destination: &mut [T]) -> bool {
        if destination.len() > self.remaining_len() {
            return false;
        }

        let mut written = 0;
        for piece in self.remaining().segments() {
            if written == destination.len() {
                break;
            }
            let count = piece.len().min(destination.len() - written);
            destination[written..written + count].copy_from_slice(&piece[..count]);
            written += count;
        }
        true
    }

    /// Offset just past the last readable element of the current segment
    fn limit(&self) -> usize {
        let end = self.sequence.end();
        if self.position.segment() == end.segment() {
            return end.offset();
        }
        self.sequence
            .chain()
            .segment(self.position.segment())
            .map_or(0, |segment| segment.len())
    }

    /// Move forward `count` elements within the current segment
    fn step(&mut self, count: usize) {
        self.position = self.position.forward(count);
        self.consumed += count;
        self.settle();
    }

    /// Hop over exhausted and zero-length segments so that the cursor either
    /// sits on a readable element or exactly on the sequence end.
    fn settle(&mut self) {
        if self.consumed >= self.length {
            self.position = self.sequence.end();
            return;
        }

        let chain = self.sequence.chain();
        while self.position.offset() >= self.limit() {
            match chain
                .segment(self.position.segment())
                .and_then(|segment| segment.next())
            {
                Some(next) => self.position = Position::new(next, 0),
                None => break,
            }
        }
    }
}

impl<'a, T: Atomic> Cursor for SequenceCursor<'a, T> {
    type Element = T;
    type Position = Position;
    type Remaining = Sequence<'a, T>;

    fn at_end(&self) -> bool {
        self.consumed >= self.length
    }

    fn try_read(&mut self) -> Option<T> {
        let value = *self.unread_span().first()?;
        self.step(1);
        Some(value)
    }

    fn try_peek(&self) -> Option<T> {
        self.unread_span().first().copied()
    }

    /// Scans one segment slice at a time instead of element by element
    fn try_advance_to(&mut self, target: T, advance_past_match: bool) -> bool {
        loop {
            let span = self.unread_span();
            if span.is_empty() {
                return false;
            }
            match span.iter().position(|value| *value == target) {
                Some(index) => {
                    self.step(index + usize::from(advance_past_match));
                    return true;
                }
                None => self.step(span.len()),
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

        let mut left = count;
        while left > 0 {
            let chunk = left.min(self.unread_span().len());
            if chunk == 0 {
                break;
            }
            self.step(chunk);
            left -= chunk;
        }
        Ok(())
    }

    fn consumed(&self) -> usize {
        self.consumed
    }

    fn remaining_len(&self) -> usize {
        self.length - self.consumed
    }

    fn position(&self) -> Position {
        self.position
    }

    fn remaining(&self) -> Sequence<'a, T> {
        Sequence::from_parts(self.sequence.chain(), self.position, self.sequence.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::SliceCursor;
    use crate::segment::{SegmentChain, SegmentId};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    static ONE: [i32; 5] = [0, 1, 2, 3, 4];
    static TWO: [i32; 5] = [5, 6, 7, 8, 9];
    static THREE: [i32; 5] = [10, 11, 12, 13, 14];

    fn three_segments() -> SegmentChain<'static, i32> {
        let mut chain = SegmentChain::new_head(&ONE[..]);
        let second = chain.append(chain.head(), &TWO).unwrap();
        chain.append(second, &THREE).unwrap();
        chain
    }

    fn drain<C: Cursor>(cursor: &mut C) -> Vec<C::Element> {
        let mut out = Vec::new();
        while let Some(value) = cursor.try_read() {
            out.push(value);
        }
        out
    }

    #[test]
    fn test_advance_to_then_drain() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();

        assert!(cursor.try_advance_to(6, false));
        assert_eq!(drain(&mut cursor), (6..15).collect::<Vec<_>>());
        assert!(cursor.at_end());
    }

    #[test]
    fn test_advance_to_then_copy_remaining() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();

        assert!(cursor.try_advance_to(6, false));
        let remaining = cursor.remaining();
        assert_eq!(remaining.len(), 9);

        let mut output = [0; 9];
        remaining.copy_to(&mut output).unwrap();
        assert_eq!(output, [6, 7, 8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(cursor.consumed(), 6);
    }

    #[test]
    fn test_advance_to_missing_value() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();

        assert!(!cursor.try_advance_to(99, false));
        assert!(cursor.at_end());
        assert_eq!(cursor.position(), chain.sequence().end());
        assert_eq!(drain(&mut cursor), Vec::<i32>::new());
    }

    #[test]
    fn test_advance_past_match_across_boundary() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();

        assert!(cursor.try_advance_to(9, true));
        assert_eq!(cursor.position(), Position::new(SegmentId::new(2), 0));
        assert_eq!(cursor.try_read(), Some(10));
    }

    #[test]
    fn test_advance_past_last_element() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();

        assert!(cursor.try_advance_to(14, true));
        assert!(cursor.at_end());
        assert!(cursor.remaining().is_empty());
    }

    #[test]
    fn test_exhausted_cursor_stays_exhausted() {
        let chain = three_segments();
        let mut cursor = chain.sequence().slice_range(12, 3).unwrap().cursor();

        drain(&mut cursor);
        for _ in 0..3 {
            assert!(cursor.at_end());
            assert_eq!(cursor.try_read(), None);
            assert_eq!(cursor.try_peek(), None);
            assert!(!cursor.try_advance_to(12, false));
            assert!(!cursor.try_advance_to(13, true));
            assert_eq!(cursor.advance(0), Ok(()));
        }
        assert_eq!(cursor.consumed(), 3);
    }

    #[test]
    fn test_position_never_moves_backwards() {
        let chain = three_segments();
        let sequence = chain.sequence();
        let mut cursor = sequence.cursor();
        let mut last = sequence.global_index(cursor.position()).unwrap();

        let targets = [3, 3, 7, 2, 11, 14, 0];
        for (step, target) in targets.into_iter().enumerate() {
            if step % 2 == 0 {
                cursor.try_advance_to(target, step % 3 == 0);
            } else {
                cursor.try_read();
            }
            let now = sequence.global_index(cursor.position()).unwrap();
            assert!(now >= last, "moved from {last} back to {now}");
            last = now;
        }
    }

    #[test_case(0, 15; "full chain")]
    #[test_case(0, 5; "first segment")]
    #[test_case(3, 9; "across two boundaries")]
    #[test_case(5, 5; "middle segment exactly")]
    #[test_case(14, 1; "last element")]
    #[test_case(7, 0; "empty")]
    fn test_len_equals_drain_count(offset: usize, count: usize) {
        let chain = three_segments();
        let sequence = chain.sequence().slice_range(offset, count).unwrap();

        let mut cursor = sequence.cursor();
        let drained = drain(&mut cursor);
        assert_eq!(drained.len(), sequence.len());

        let mut copied = vec![0; sequence.len()];
        sequence.copy_to(&mut copied).unwrap();
        assert_eq!(drained, copied);
    }

    #[test]
    fn test_independent_cursors() {
        let chain = three_segments();
        let sequence = chain.sequence();
        let mut first = sequence.cursor();
        let mut second = sequence.cursor();

        first.try_advance_to(8, false);
        assert_eq!(second.try_read(), Some(0));
        assert_eq!(first.try_read(), Some(8));

        let mut bookmark = first.clone();
        assert_eq!(first.try_read(), Some(9));
        assert_eq!(bookmark.try_read(), Some(9));
        assert_eq!(second.try_read(), Some(1));
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let empty: [i32; 0] = [];
        let chain =
            SegmentChain::from_buffers([&empty[..], &ONE[..2], &empty[..], &empty[..], &TWO[..1]])
                .unwrap();
        let mut cursor = chain.sequence().cursor();

        assert_eq!(cursor.position(), Position::new(SegmentId::new(1), 0));
        assert_eq!(drain(&mut cursor), vec![0, 1, 5]);
        assert_eq!(cursor.position(), chain.sequence().end());
    }

    #[test]
    fn test_empty_chain() {
        let empty: [i32; 0] = [];
        let chain = SegmentChain::new_head(&empty[..]);
        let mut cursor = chain.sequence().cursor();

        assert!(cursor.at_end());
        assert_eq!(cursor.try_read(), None);
        assert!(!cursor.try_advance_to(1, true));
    }

    #[test]
    fn test_advance_by_count() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();

        cursor.advance(7).unwrap();
        assert_eq!(cursor.try_peek(), Some(7));
        cursor.advance(3).unwrap();
        assert_eq!(cursor.position(), Position::new(SegmentId::new(2), 0));

        assert_eq!(
            cursor.advance(6),
            Err(SequenceError::AdvancePastEnd {
                requested: 6,
                remaining: 5,
            })
        );
        assert_eq!(cursor.consumed(), 10);
        cursor.advance(5).unwrap();
        assert!(cursor.at_end());
    }

    #[test]
    fn test_advance_past_and_is_next() {
        let one = [7, 7, 7];
        let two = [7, 1, 2];
        let chain = SegmentChain::from_buffers([&one[..], &two[..]]).unwrap();
        let mut cursor = chain.sequence().cursor();

        assert_eq!(cursor.advance_past(7), 4);
        assert!(!cursor.is_next(2, true));
        assert!(cursor.is_next(1, false));
        assert_eq!(cursor.try_peek(), Some(1));
        assert!(cursor.is_next(1, true));
        assert_eq!(cursor.try_read(), Some(2));
        assert_eq!(cursor.advance_past(7), 0);
    }

    #[test]
    fn test_try_read_to() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();
        cursor.advance(2).unwrap();

        let read = cursor.try_read_to(7, true).unwrap();
        assert_eq!(read.to_vec(), vec![2, 3, 4, 5, 6]);
        assert_eq!(cursor.try_peek(), Some(8));

        let read = cursor.try_read_to(11, false).unwrap();
        assert_eq!(read.to_vec(), vec![8, 9, 10]);
        assert_eq!(cursor.try_peek(), Some(11));

        let before = cursor.position();
        assert!(cursor.try_read_to(42, true).is_none());
        assert_eq!(cursor.position(), before);
    }

    #[test]
    fn test_try_copy_to_does_not_move() {
        let chain = three_segments();
        let mut cursor = chain.sequence().cursor();
        cursor.advance(3).unwrap();

        let mut destination = [0; 4];
        assert!(cursor.try_copy_to(&mut destination));
        assert_eq!(destination, [3, 4, 5, 6]);
        assert_eq!(cursor.consumed(), 3);

        let mut too_big = [0; 13];
        assert!(!cursor.try_copy_to(&mut too_big));
        assert_eq!(too_big, [0; 13]);
    }

    #[test]
    fn test_unread_span() {
        let chain = three_segments();
        let mut cursor = chain.sequence().slice_range(3, 8).unwrap().cursor();

        assert_eq!(cursor.unread_span(), &[3, 4]);
        cursor.advance(2).unwrap();
        assert_eq!(cursor.unread_span(), &[5, 6, 7, 8, 9]);
        cursor.advance(5).unwrap();
        assert_eq!(cursor.unread_span(), &[10]);
        cursor.advance(1).unwrap();
        assert_eq!(cursor.unread_span(), &[] as &[i32]);
    }

    #[test]
    fn test_matches_slice_cursor() {
        let flat: Vec<i32> = (0..15).collect();
        let chain = three_segments();

        for target in [0, 4, 5, 6, 10, 14, 99] {
            for past in [false, true] {
                let mut segmented = chain.sequence().cursor();
                let mut contiguous = SliceCursor::new(&flat[..]);

                let found = segmented.try_advance_to(target, past);
                assert_eq!(found, contiguous.try_advance_to(target, past));
                assert_eq!(segmented.consumed(), contiguous.consumed());
                assert_eq!(segmented.remaining().to_vec(), contiguous.remaining());
            }
        }
    }
}
