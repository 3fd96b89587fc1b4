pub mod sequence;
pub mod slice;

pub use sequence::SequenceCursor;
pub use slice::SliceCursor;
