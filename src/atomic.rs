use std::fmt::Debug;

/// Trait for atomic elements that can be stored in a segment chain
///
/// Elements are copied out of the chain on read and compared by value when a
/// cursor seeks a delimiter, so anything `Copy + PartialEq + Debug` qualifies.
pub trait Atomic: Copy + PartialEq + Debug {}

impl<T> Atomic for T where T: Copy + PartialEq + Debug {}
