//! Itineraries: alternating waits and rides.

use serde::Serialize;

use crate::domain::{BusId, StopId};
use crate::network::TransitNetwork;

use super::config::RoutingSettings;
use super::graph::RouteGraph;
use super::search::RouteInfo;

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItineraryItem {
    /// Waiting at a stop before boarding.
    Wait {
        stop_name: String,
        /// Minutes.
        time: f64,
    },

    /// One uninterrupted ride.
    #[serde(rename = "Bus")]
    Ride {
        bus: String,
        span_count: usize,
        /// Minutes.
        time: f64,
    },
}

impl ItineraryItem {
    /// Duration of this item in minutes.
    pub fn time(&self) -> f64 {
        match self {
            ItineraryItem::Wait { time, .. } | ItineraryItem::Ride { time, .. } => *time,
        }
    }
}

/// A cheapest itinerary between two stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Minutes.
    pub total_time: f64,
    pub items: Vec<ItineraryItem>,
}

/// A ride with the stops it passes, for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RideLeg {
    pub bus: BusId,

    /// Boarding stop through alighting stop.
    pub stops: Vec<StopId>,
}

/// Turns graph routes into human-facing itineraries.
pub struct ItineraryReconstructor<'a> {
    network: &'a TransitNetwork,
    graph: &'a RouteGraph,
    settings: &'a RoutingSettings,
}

impl<'a> ItineraryReconstructor<'a> {
    pub fn new(
        network: &'a TransitNetwork,
        graph: &'a RouteGraph,
        settings: &'a RoutingSettings,
    ) -> Self {
        Self {
            network,
            graph,
            settings,
        }
    }

    /// Emit a wait then a ride for every edge of the route.
    ///
    /// Ride time is the edge weight minus the wait, so the items always sum
    /// to the route weight.
    pub fn itinerary(&self, route: &RouteInfo) -> Itinerary {
        let wait_time = self.settings.wait_time();
        let mut items = Vec::with_capacity(route.edges.len() * 2);

        for edge_id in &route.edges {
            let edge = self.graph.edge(*edge_id);
            items.push(ItineraryItem::Wait {
                stop_name: self.network.stop_name(edge.from).to_string(),
                time: wait_time,
            });
            items.push(ItineraryItem::Ride {
                bus: self.network.bus_name(edge.bus).to_string(),
                span_count: edge.span_count,
                time: edge.weight - wait_time,
            });
        }

        Itinerary {
            total_time: route.weight,
            items,
        }
    }

    /// The stops passed on every ride of the route.
    pub fn legs(&self, route: &RouteInfo) -> Vec<RideLeg> {
        route
            .edges
            .iter()
            .map(|edge_id| {
                let edge = self.graph.edge(*edge_id);
                let stops = &self.network.route(edge.bus)
                    [edge.board_index..=edge.board_index + edge.span_count];
                RideLeg {
                    bus: edge.bus,
                    stops: stops.to_vec(),
                }
            })
            .collect()
    }
}
