use crate::segment::SegmentId;

/// Errors raised while building chains, constructing or slicing views, and
/// moving cursors by an explicit count.
///
/// A cursor failing to find a delimiter is not an error; see
/// [`Cursor::try_advance_to`](crate::Cursor::try_advance_to).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SequenceError {
    #[error("segment {segment} does not belong to this chain")]
    UnknownSegment { segment: SegmentId },

    #[error("offset {offset} is out of range for segment {segment} of length {len}")]
    OffsetOutOfRange {
        segment: SegmentId,
        offset: usize,
        len: usize,
    },

    /// The first segment of a view comes after its last segment
    #[error("segment {first} comes after segment {last} in chain order")]
    SegmentOrder { first: SegmentId, last: SegmentId },

    #[error("inverted bounds: start index {start} is past end index {end}")]
    InvertedBounds { start: usize, end: usize },

    #[error("index {index} is outside of the view [{start}, {end}]")]
    PositionOutOfBounds {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("destination holds {available} elements but {needed} are required")]
    DestinationTooShort { needed: usize, available: usize },

    #[error("cannot advance {requested} elements, only {remaining} remain")]
    AdvancePastEnd { requested: usize, remaining: usize },

    /// Appending after a segment that already has a successor would fork the chain
    #[error("segment {segment} is not the tail of its chain")]
    NotTail { segment: SegmentId },
}

pub type Result<T, E = SequenceError> = std::result::Result<T, E>;
