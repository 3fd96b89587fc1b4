use crate::atomic::Atomic;
use crate::error::Result;

/// Forward-only reader over a run of elements
///
/// A cursor starts at the first element of whatever it reads and only ever
/// moves towards the end. Once [`Cursor::at_end`] is true it stays true: reads
/// return `None`, seeks return `false`, and there is no way back.
///
/// Cursors are single-owner state. Several cursors can read the same data at
/// once, but one cursor must not be driven from several threads.
pub trait Cursor {
    /// The type of elements this cursor reads
    type Element: Atomic;

    /// Bookmark type returned by [`Cursor::position`]
    type Position: Copy;

    /// View of the unread elements returned by [`Cursor::remaining`]
    type Remaining;

    /// Check if every element has been consumed
    fn at_end(&self) -> bool;

    /// Read the current element and step past it
    ///
    /// Returns `None` without moving when at the end
    fn try_read(&mut self) -> Option<Self::Element>;

    /// Get the current element without moving
    fn try_peek(&self) -> Option<Self::Element>;

    /// Seek forward to the first element equal to `target`
    ///
    /// On a match the cursor stops on it, or just past it when
    /// `advance_past_match` is set, and `true` is returned. Otherwise the
    /// cursor ends up at the end and `false` is returned.
    fn try_advance_to(&mut self, target: Self::Element, advance_past_match: bool) -> bool {
        while let Some(value) = self.try_peek() {
            if value == target {
                if advance_past_match {
                    self.try_read();
                }
                return true;
            }
            self.try_read();
        }
        false
    }

    /// Skip exactly `count` elements
    ///
    /// Fails without moving if fewer than `count` elements remain
    fn advance(&mut self, count: usize) -> Result<()>;

    /// Number of elements consumed so far
    fn consumed(&self) -> usize;

    /// Number of elements left to read
    fn remaining_len(&self) -> usize;

    /// Get the current position, usable later to slice the source
    fn position(&self) -> Self::Position;

    /// The unread elements, without copying
    fn remaining(&self) -> Self::Remaining;
}
