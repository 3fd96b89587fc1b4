use std::fmt;

use crate::atomic::Atomic;
use crate::error::{Result, SequenceError};
use crate::position::Position;
use crate::sequence::Sequence;

/// Index of a segment inside the arena of its [`SegmentChain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(usize);

impl SegmentId {
    pub const fn new(index: usize) -> Self {
        SegmentId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One contiguous, borrowed chunk of a chain
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a, T> {
    data: &'a [T],
    /// Number of elements in all prior segments
    running_index: usize,
    next: Option<SegmentId>,
}

impl<'a, T> Segment<'a, T> {
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn running_index(&self) -> usize {
        self.running_index
    }

    /// Global index one past this segment's last element
    pub fn end_index(&self) -> usize {
        self.running_index + self.data.len()
    }

    pub fn next(&self) -> Option<SegmentId> {
        self.next
    }
}

/// An ordered, singly linked list of borrowed buffers
///
/// The chain owns its segment records in an arena; each record links to its
/// successor by [`SegmentId`]. Segments are only ever added at the tail and
/// nothing is mutated afterwards except the forward link of the old tail.
///
/// ```rust
/// use segseq::SegmentChain;
///
/// let mut chain = SegmentChain::new_head(&[0, 1, 2]);
/// let second = chain.append(chain.head(), &[3, 4]).unwrap();
/// assert_eq!(chain.segment(second).unwrap().running_index(), 3);
/// assert_eq!(chain.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentChain<'a, T> {
    segments: Vec<Segment<'a, T>>,
}

impl<'a, T: Atomic> SegmentChain<'a, T> {
    /// Create a chain whose first segment starts at running index 0
    pub fn new_head(buffer: &'a [T]) -> Self {
        SegmentChain {
            segments: vec![Segment {
                data: buffer,
                running_index: 0,
                next: None,
            }],
        }
    }

    /// Build a chain from buffers in order, or `None` if there are none
    pub fn from_buffers<I>(buffers: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        let mut buffers = buffers.into_iter();
        let mut chain = SegmentChain::new_head(buffers.next()?);
        for buffer in buffers {
            chain.push(buffer);
        }
        Some(chain)
    }

    /// Link a new segment after `tail`
    ///
    /// The new segment's running index is `tail`'s running index plus its
    /// length. `tail` must be the current last segment.
    pub fn append(&mut self, tail: SegmentId, buffer: &'a [T]) -> Result<SegmentId> {
        let previous = self
            .segment(tail)
            .ok_or(SequenceError::UnknownSegment { segment: tail })?;
        if previous.next.is_some() {
            return Err(SequenceError::NotTail { segment: tail });
        }

        Ok(self.link(buffer))
    }

    /// Append after the current tail
    pub fn push(&mut self, buffer: &'a [T]) -> SegmentId {
        self.link(buffer)
    }

    /// Push a segment after the last one in the arena and point the old tail at it
    fn link(&mut self, buffer: &'a [T]) -> SegmentId {
        let id = SegmentId::new(self.segments.len());
        let running_index = self.segments.last().map_or(0, Segment::end_index);
        if let Some(last) = self.segments.last_mut() {
            last.next = Some(id);
        }
        self.segments.push(Segment {
            data: buffer,
            running_index,
            next: None,
        });

        tracing::trace!(
            segment = %id,
            running_index,
            len = buffer.len(),
            "appended segment"
        );
        id
    }

    /// A view over every element of the chain
    pub fn sequence(&self) -> Sequence<'_, T> {
        let tail = self.tail();
        let end = Position::new(tail, self.segments[tail.index()].len());
        Sequence::from_parts(self, Position::new(self.head(), 0), end)
    }
}

impl<'a, T> SegmentChain<'a, T> {
    pub fn head(&self) -> SegmentId {
        SegmentId::new(0)
    }

    pub fn tail(&self) -> SegmentId {
        SegmentId::new(self.segments.len() - 1)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment<'a, T>> {
        self.segments.get(id.index())
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total number of elements across all segments
    pub fn len(&self) -> usize {
        self.segments.last().map_or(0, Segment::end_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Segments in link order, starting from the head
    pub fn iter(&self) -> impl Iterator<Item = &Segment<'a, T>> + '_ {
        std::iter::successors(self.segment(self.head()), |segment| {
            segment.next.and_then(|next| self.segment(next))
        })
    }

    /// Check that `position` points into (or one past) an existing segment
    pub(crate) fn validate(&self, position: Position) -> Result<&Segment<'a, T>> {
        let segment = self
            .segment(position.segment())
            .ok_or(SequenceError::UnknownSegment {
                segment: position.segment(),
            })?;
        if position.offset() > segment.len() {
            return Err(SequenceError::OffsetOutOfRange {
                segment: position.segment(),
                offset: position.offset(),
                len: segment.len(),
            });
        }
        Ok(segment)
    }

    /// Chain-global index of a position already known to be valid
    pub(crate) fn global_index(&self, position: Position) -> usize {
        self.segments[position.segment().index()].running_index + position.offset()
    }
}
