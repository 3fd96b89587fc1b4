//! # segseq - Segmented Read-Only Sequences
//!
//! Presents several disjoint, borrowed buffers as one logically contiguous
//! sequence, and reads it with forward-only cursors that can seek a delimiter.
//!
//! The crate is built from a few small pieces:
//!
//! - **[`SegmentChain`]**: an ordered, singly linked list of borrowed chunks, each
//!   knowing its running index from the start of the chain
//! - **[`Sequence`]**: a `[start, end)` window over a chain that slices and copies
//!   without ever duplicating element data
//! - **[`Cursor`]**: the forward-only reading contract, implemented by
//!   [`SequenceCursor`] for chains and [`SliceCursor`] for plain slices
//!
//! ```rust
//! use segseq::{Cursor, SegmentChain, Sequence};
//!
//! let (one, two, three) = ([0, 1, 2, 3, 4], [5, 6, 7, 8, 9], [10, 11, 12, 13, 14]);
//! let mut chain = SegmentChain::new_head(&one[..]);
//! let second = chain.append(chain.head(), &two).unwrap();
//! let last = chain.append(second, &three).unwrap();
//!
//! let sequence = Sequence::new(&chain, chain.head(), 0, last, three.len()).unwrap();
//! let mut cursor = sequence.cursor();
//! assert!(cursor.try_advance_to(6, false));
//!
//! let remaining = cursor.remaining();
//! let mut output = vec![0; remaining.len()];
//! remaining.copy_to(&mut output).unwrap();
//! assert_eq!(output, (6..15).collect::<Vec<_>>());
//! ```

pub mod atomic;
pub mod cursor;
pub mod cursors;
pub mod error;
pub mod position;
pub mod segment;
pub mod sequence;

pub use atomic::Atomic;
pub use cursor::Cursor;
pub use cursors::{SequenceCursor, SliceCursor};
pub use error::{Result, SequenceError};
pub use position::Position;
pub use segment::{Segment, SegmentChain, SegmentId};
pub use sequence::{Segments, Sequence};
