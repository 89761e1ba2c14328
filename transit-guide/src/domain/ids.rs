//! Dense integer identifiers.

use std::fmt;

/// Identifier types allocated densely from zero by a name index.
pub trait DenseId: Copy + Eq + fmt::Debug {
    /// Build an id from its position in the index.
    fn from_index(index: usize) -> Self;

    /// Position of this id in the index.
    fn index(self) -> usize;
}

/// Dense identifier of a stop.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(pub usize);

/// Dense identifier of a bus line.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusId(pub usize);

impl DenseId for StopId {
    fn from_index(index: usize) -> Self {
        StopId(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

impl DenseId for BusId {
    fn from_index(index: usize) -> Self {
        BusId(index)
    }

    fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Debug for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusId({})", self.0)
    }
}
