//! The route graph.
//!
//! Every edge is one uninterrupted bus ride: board at one stop, stay on
//! board for `span_count` hops, alight. Each route contributes an edge for
//! every ordered pair of positions along it, so the search never has to
//! special-case staying on the same bus.

use tracing::info;

use crate::domain::{BuildError, BusId, StopId};
use crate::network::TransitNetwork;

use super::config::RoutingSettings;

/// Index of an edge in a `RouteGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub usize);

/// One uninterrupted ride on a bus.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEdge {
    pub from: StopId,
    pub to: StopId,

    /// Wait time plus ride time, in minutes.
    pub weight: f64,

    pub bus: BusId,

    /// Number of stop-to-stop hops ridden.
    pub span_count: usize,

    /// Position of `from` in the bus's expanded route.
    pub board_index: usize,
}

/// Directed weighted graph over stop ids.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    edges: Vec<RouteEdge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl RouteGraph {
    /// Create a graph over `stop_count` stops with no edges.
    pub fn new(stop_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            outgoing: vec![Vec::new(); stop_count],
        }
    }

    /// Add an edge and return its id.
    pub fn add_edge(&mut self, edge: RouteEdge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.outgoing[edge.from.0].push(id);
        self.edges.push(edge);
        id
    }

    pub fn edge(&self, id: EdgeId) -> &RouteEdge {
        &self.edges[id.0]
    }

    /// Edges leaving `stop`, in insertion order.
    pub fn outgoing(&self, stop: StopId) -> &[EdgeId] {
        &self.outgoing[stop.0]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn stop_count(&self) -> usize {
        self.outgoing.len()
    }
}

/// Builds a `RouteGraph` from a network and routing settings.
pub struct RouteGraphBuilder<'a> {
    network: &'a TransitNetwork,
    settings: &'a RoutingSettings,
}

impl<'a> RouteGraphBuilder<'a> {
    pub fn new(network: &'a TransitNetwork, settings: &'a RoutingSettings) -> Self {
        Self { network, settings }
    }

    /// Emit one edge per ordered pair of positions on every route.
    ///
    /// Fails if two consecutive stops on a route have no road distance in
    /// either direction.
    pub fn build(&self) -> Result<RouteGraph, BuildError> {
        let mut graph = RouteGraph::new(self.network.stop_count());
        let wait_time = self.settings.wait_time();

        for (bus, _) in self.network.buses() {
            let route = self.network.route(bus);

            // Hop times are looked up once per route, not once per pair
            let hop_times = route
                .windows(2)
                .map(|pair| {
                    self.network
                        .road_distance(pair[0], pair[1])
                        .map(|meters| self.settings.ride_time(meters))
                })
                .collect::<Result<Vec<_>, _>>()?;

            for board_index in 0..route.len() {
                let mut weight = wait_time;
                for alight_index in (board_index + 1)..route.len() {
                    weight += hop_times[alight_index - 1];
                    graph.add_edge(RouteEdge {
                        from: route[board_index],
                        to: route[alight_index],
                        weight,
                        bus,
                        span_count: alight_index - board_index,
                        board_index,
                    });
                }
            }
        }

        info!(
            stops = graph.stop_count(),
            edges = graph.edge_count(),
            "route graph built"
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusDescription, StopDescription};

    fn network(buses: Vec<BusDescription>) -> TransitNetwork {
        TransitNetwork::build(
            vec![
                StopDescription::new("A", 0.0, 0.0).with_distance("B", 600),
                StopDescription::new("B", 0.0, 0.01).with_distance("C", 1200),
                StopDescription::new("C", 0.0, 0.02).with_distance("B", 1800),
            ],
            buses,
        )
        .unwrap()
    }

    #[test]
    fn single_ride_edge() {
        let network = network(vec![BusDescription::new("1", ["A", "B"], true)]);
        let settings = RoutingSettings::new(5, 36.0);
        let graph = RouteGraphBuilder::new(&network, &settings).build().unwrap();

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge(EdgeId(0));
        assert_eq!(edge.from, StopId(0));
        assert_eq!(edge.to, StopId(1));
        assert_eq!(edge.weight, 6.0);
        assert_eq!(edge.span_count, 1);
        assert_eq!(edge.board_index, 0);
    }

    #[test]
    fn cumulative_weights_along_route() {
        let network = network(vec![BusDescription::new("1", ["A", "B", "C"], false)]);
        let settings = RoutingSettings::new(5, 36.0);
        let graph = RouteGraphBuilder::new(&network, &settings).build().unwrap();

        // Route A B C B A has 5 positions
        assert_eq!(graph.edge_count(), 10);

        // A -> C rides A->B (1 min) then B->C (2 min)
        let a_to_c = graph
            .outgoing(StopId(0))
            .iter()
            .map(|id| graph.edge(*id))
            .find(|edge| edge.to == StopId(2))
            .unwrap();
        assert_eq!(a_to_c.weight, 8.0);
        assert_eq!(a_to_c.span_count, 2);

        // C -> B uses the explicit 1800 m, not the 1200 m of B -> C
        let c_to_b = graph
            .outgoing(StopId(2))
            .iter()
            .map(|id| graph.edge(*id))
            .find(|edge| edge.to == StopId(1))
            .unwrap();
        assert_eq!(c_to_b.weight, 8.0);
    }

    #[test]
    fn missing_distance_is_build_error() {
        let network = TransitNetwork::build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 0.0, 0.01),
            ],
            vec![BusDescription::new("1", ["A", "B"], true)],
        )
        .unwrap();
        let settings = RoutingSettings::default();

        let err = RouteGraphBuilder::new(&network, &settings)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingDistance {
                from: "A".into(),
                to: "B".into()
            }
        );
    }

    #[test]
    fn outgoing_lists_cover_every_edge() {
        let network = network(vec![
            BusDescription::new("1", ["A", "B", "C"], false),
            BusDescription::new("2", ["C", "B"], true),
        ]);
        let settings = RoutingSettings::default();
        let graph = RouteGraphBuilder::new(&network, &settings).build().unwrap();

        let total: usize = (0..graph.stop_count())
            .map(|stop| graph.outgoing(StopId(stop)).len())
            .sum();
        assert_eq!(total, graph.edge_count());
        assert_eq!(graph.edge_count(), 10 + 1);
    }
}
