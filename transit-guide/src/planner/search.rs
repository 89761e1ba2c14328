//! Shortest-path search over the route graph.
//!
//! Dijkstra's algorithm from a single origin, with the full tree cached per
//! origin so later queries from the same stop are a path walk only.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::domain::StopId;

use super::cache::RouteCache;
use super::config::CacheConfig;
use super::graph::{EdgeId, RouteGraph};

/// Result of a route query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    /// Sum of edge weights, in minutes.
    pub weight: f64,

    /// Edges to ride, in order.
    pub edges: Vec<EdgeId>,
}

impl RouteInfo {
    /// The route from a stop to itself.
    pub fn empty() -> Self {
        Self {
            weight: 0.0,
            edges: Vec::new(),
        }
    }
}

/// Single-source shortest-path tree.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    origin: StopId,
    distances: Vec<f64>,
    previous: Vec<Option<EdgeId>>,
}

impl ShortestPathTree {
    /// A tree where nothing but the origin is reached.
    pub fn unreached(origin: StopId, stop_count: usize) -> Self {
        let mut distances = vec![f64::INFINITY; stop_count];
        distances[origin.0] = 0.0;
        Self {
            origin,
            distances,
            previous: vec![None; stop_count],
        }
    }

    /// Run Dijkstra from `origin`.
    ///
    /// A label is only replaced by a strictly shorter one, and the heap
    /// breaks cost ties by stop id, so the same graph always yields the same
    /// tree.
    pub fn compute(graph: &RouteGraph, origin: StopId) -> Self {
        let mut tree = Self::unreached(origin, graph.stop_count());
        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            cost: 0.0,
            stop: origin,
        });

        while let Some(Candidate { cost, stop }) = heap.pop() {
            // Stale entry, a shorter label was already settled
            if cost > tree.distances[stop.0] {
                continue;
            }

            for &edge_id in graph.outgoing(stop) {
                let edge = graph.edge(edge_id);
                let next = cost + edge.weight;
                if next < tree.distances[edge.to.0] {
                    tree.distances[edge.to.0] = next;
                    tree.previous[edge.to.0] = Some(edge_id);
                    heap.push(Candidate {
                        cost: next,
                        stop: edge.to,
                    });
                }
            }
        }

        tree
    }

    /// Shortest distance to `to`, if reachable.
    pub fn distance(&self, to: StopId) -> Option<f64> {
        let distance = self.distances[to.0];
        distance.is_finite().then_some(distance)
    }

    /// Edges from the origin to `to`, in riding order.
    pub fn path_to(&self, graph: &RouteGraph, to: StopId) -> Option<Vec<EdgeId>> {
        self.distance(to)?;

        let mut edges = Vec::new();
        let mut current = to;
        while let Some(edge_id) = self.previous[current.0] {
            edges.push(edge_id);
            current = graph.edge(edge_id).from;
        }
        assert_eq!(
            current, self.origin,
            "shortest-path tree does not lead back to its origin"
        );

        edges.reverse();
        Some(edges)
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the cheapest first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cost: f64,
    stop: StopId,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.stop.cmp(&self.stop))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Shortest-path engine owning the route graph and the per-origin cache.
pub struct ShortestPathEngine {
    graph: RouteGraph,
    cache: RouteCache,
}

impl ShortestPathEngine {
    /// Create a new engine over a built graph.
    pub fn new(graph: RouteGraph, cache_config: &CacheConfig) -> Self {
        Self {
            graph,
            cache: RouteCache::new(cache_config),
        }
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// Cheapest route from `from` to `to`.
    ///
    /// A stop routes to itself with an empty route and no search. Returns
    /// `None` when `to` cannot be reached.
    pub fn find_route(&self, from: StopId, to: StopId) -> Option<RouteInfo> {
        if from == to {
            return Some(RouteInfo::empty());
        }

        let tree = match self.cache.get(&from) {
            Some(tree) => {
                trace!(?from, "shortest-path tree cache hit");
                tree
            }
            None => self.cache.get_with(from, || {
                let tree = ShortestPathTree::compute(&self.graph, from);
                debug!(
                    ?from,
                    cached = self.cache.entry_count(),
                    "computed shortest-path tree"
                );
                tree
            }),
        };

        let weight = tree.distance(to)?;
        let edges = tree.path_to(&self.graph, to)?;
        Some(RouteInfo { weight, edges })
    }
}
