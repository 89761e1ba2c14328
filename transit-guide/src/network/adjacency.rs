//! Stop adjacency along expanded bus routes.

use crate::domain::{BusId, StopId};

/// One stop directly connected to another by a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentStop {
    pub stop: StopId,
    pub bus: BusId,

    /// True when `stop` follows the key stop on the route, false when it
    /// precedes it.
    pub is_forward: bool,
}

/// Per-stop list of neighbours along every expanded bus route.
///
/// Each consecutive pair `(a, b)` on a route records `b` as a forward
/// neighbour of `a` and `a` as a backward neighbour of `b`.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    neighbours: Vec<Vec<AdjacentStop>>,
}

impl AdjacencyIndex {
    /// Create an index over `stop_count` stops with no connections.
    pub fn new(stop_count: usize) -> Self {
        Self {
            neighbours: vec![Vec::new(); stop_count],
        }
    }

    /// Record every consecutive pair of an expanded route.
    pub fn add_route(&mut self, bus: BusId, route: &[StopId]) {
        for pair in route.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            self.neighbours[from.0].push(AdjacentStop {
                stop: to,
                bus,
                is_forward: true,
            });
            self.neighbours[to.0].push(AdjacentStop {
                stop: from,
                bus,
                is_forward: false,
            });
        }
    }

    /// All neighbours of `stop`, in route order of insertion.
    pub fn neighbours(&self, stop: StopId) -> &[AdjacentStop] {
        &self.neighbours[stop.0]
    }

    /// Neighbours that follow `stop` on some route.
    pub fn forward(&self, stop: StopId) -> impl Iterator<Item = &AdjacentStop> {
        self.neighbours(stop).iter().filter(|adj| adj.is_forward)
    }
}
