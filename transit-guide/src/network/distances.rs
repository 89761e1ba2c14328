//! Road distances between stops.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::StopId;

/// How a distance entry came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// Declared for this direction.
    Explicit(u32),
    /// Copied from the opposite direction.
    Mirrored(u32),
}

impl Entry {
    fn meters(self) -> u32 {
        match self {
            Entry::Explicit(m) | Entry::Mirrored(m) => m,
        }
    }
}

/// Sparse directed road distance matrix, in metres.
///
/// Declaring `A -> B` also fills `B -> A` unless that direction has its own
/// declaration. An explicit declaration always replaces a mirrored value but
/// never another explicit one, so the first declaration of a direction wins
/// regardless of the order declarations arrive in.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(StopId, StopId), Entry>,
}

impl DistanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the road distance from `from` to `to`.
    pub fn declare(&mut self, from: StopId, to: StopId, meters: u32) {
        match self.entries.get(&(from, to)) {
            Some(Entry::Explicit(existing)) => {
                trace!(?from, ?to, existing, ignored = meters, "distance already declared");
            }
            _ => {
                self.entries.insert((from, to), Entry::Explicit(meters));
            }
        }

        self.entries
            .entry((to, from))
            .or_insert(Entry::Mirrored(meters));
    }

    /// Road distance from `from` to `to`, if declared in either direction.
    pub fn get(&self, from: StopId, to: StopId) -> Option<u32> {
        self.entries.get(&(from, to)).map(|entry| entry.meters())
    }

    /// Returns the number of directed entries, mirrored ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no distances have been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
