//! Node identities and their allocators.
//!
//! Parent and leaf nodes are numbered independently, densely from zero in
//! construction order. Each widget instance owns its own allocators, so two
//! pages built in the same process never share counters.

use std::fmt;
use std::marker::PhantomData;

/// Identity of a parent (expandable) node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParentId(pub usize);

/// Identity of a leaf (navigable) node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LeafId(pub usize);

impl ParentId {
    /// Position of this node in id order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl LeafId {
    /// Position of this node in id order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ParentId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<usize> for LeafId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parent #{}", self.0)
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaf #{}", self.0)
    }
}

/// Monotonic allocator handing out dense ids starting at zero.
#[derive(Debug)]
pub(crate) struct IdAllocator<T> {
    next: usize,
    _marker: PhantomData<T>,
}

impl<T> Default for IdAllocator<T> {
    fn default() -> Self {
        Self {
            next: 0,
            _marker: PhantomData,
        }
    }
}

impl<T: From<usize>> IdAllocator<T> {
    /// Hand out the next id.
    pub(crate) fn allocate(&mut self) -> T {
        let id = T::from(self.next);
        self.next += 1;
        id
    }

    /// Number of ids allocated so far.
    pub(crate) fn count(&self) -> usize {
        self.next
    }
}
