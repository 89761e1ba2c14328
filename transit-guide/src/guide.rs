//! The query facade over a built transit network.
//!
//! `TransitGuide` owns the network, the route planner and the render
//! settings. Stop and bus summaries are computed once at build time;
//! itineraries are searched on demand and diagrams are drawn per request.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::info;

use crate::domain::{BuildError, BusDescription, BusId, StopDescription};
use crate::network::TransitNetwork;
use crate::planner::{CacheConfig, Itinerary, RoutingSettings, TransitRouter};
use crate::render::{CoordinateCompactor, Diagram, RenderSettings, map_diagram, route_diagram};

/// Buses serving a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopSummary {
    /// Names of every bus whose route passes the stop, sorted.
    pub buses: BTreeSet<String>,
}

/// Statistics of one bus line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusSummary {
    /// Stops on the expanded route, repeats included.
    pub stop_count: usize,
    pub unique_stop_count: usize,

    /// Road length of the expanded route, in metres.
    pub route_length: u64,

    /// Road length over great-circle length.
    pub curvature: f64,
}

/// Answers stop, bus, itinerary and diagram queries.
pub struct TransitGuide {
    network: TransitNetwork,
    router: TransitRouter,
    render_settings: RenderSettings,
    stop_summaries: Vec<StopSummary>,
    bus_summaries: Vec<BusSummary>,
}

impl TransitGuide {
    /// Build a guide with the default route cache.
    pub fn new(
        stops: Vec<StopDescription>,
        buses: Vec<BusDescription>,
        routing_settings: RoutingSettings,
        render_settings: RenderSettings,
    ) -> Result<Self, BuildError> {
        Self::with_cache_config(
            stops,
            buses,
            routing_settings,
            render_settings,
            &CacheConfig::default(),
        )
    }

    /// Build a guide, failing on any integrity or settings error.
    pub fn with_cache_config(
        stops: Vec<StopDescription>,
        buses: Vec<BusDescription>,
        routing_settings: RoutingSettings,
        render_settings: RenderSettings,
        cache_config: &CacheConfig,
    ) -> Result<Self, BuildError> {
        render_settings.validate()?;

        let network = TransitNetwork::build(stops, buses)?;
        let router = TransitRouter::build(&network, routing_settings, cache_config)?;

        let mut stop_summaries = vec![
            StopSummary {
                buses: BTreeSet::new(),
            };
            network.stop_count()
        ];
        let mut bus_summaries = Vec::with_capacity(network.bus_count());
        for (bus, line) in network.buses() {
            let route = network.route(bus);
            for stop in route {
                stop_summaries[stop.0].buses.insert(line.name.clone());
            }
            bus_summaries.push(summarize_bus(&network, bus)?);
        }

        info!(
            stops = network.stop_count(),
            buses = network.bus_count(),
            edges = router.graph().edge_count(),
            "transit guide ready"
        );

        Ok(Self {
            network,
            router,
            render_settings,
            stop_summaries,
            bus_summaries,
        })
    }

    /// Buses serving the named stop; `None` if no such stop exists.
    pub fn stop(&self, name: &str) -> Option<&StopSummary> {
        let id = self.network.stop_id(name)?;
        Some(&self.stop_summaries[id.0])
    }

    /// Statistics of the named bus; `None` if no such bus exists.
    pub fn bus(&self, name: &str) -> Option<&BusSummary> {
        let id = self.network.bus_id(name)?;
        Some(&self.bus_summaries[id.0])
    }

    /// Cheapest itinerary between two named stops.
    ///
    /// `None` if either stop is unknown or `to` cannot be reached.
    pub fn route(&self, from: &str, to: &str) -> Option<Itinerary> {
        let from = self.network.stop_id(from)?;
        let to = self.network.stop_id(to)?;
        self.router.itinerary(&self.network, from, to)
    }

    /// Diagram of the whole network.
    pub fn map(&self) -> Diagram {
        let layout = CoordinateCompactor::new(&self.network, &self.render_settings).compact();
        map_diagram(&self.network, &layout, &self.render_settings)
    }

    /// Diagram of the network with the cheapest itinerary highlighted.
    pub fn route_map(&self, from: &str, to: &str) -> Option<Diagram> {
        let from = self.network.stop_id(from)?;
        let to = self.network.stop_id(to)?;
        let legs = self.router.legs(&self.network, from, to)?;

        let layout = CoordinateCompactor::new(&self.network, &self.render_settings).compact();
        Some(route_diagram(
            &self.network,
            &layout,
            &self.render_settings,
            &legs,
        ))
    }
}

fn summarize_bus(network: &TransitNetwork, bus: BusId) -> Result<BusSummary, BuildError> {
    let route = network.route(bus);
    let route_length = network.route_length(bus)?;
    let geodesic_length = network.geodesic_length(bus);
    let curvature = if geodesic_length > 0.0 {
        route_length as f64 / geodesic_length
    } else {
        1.0
    };

    Ok(BusSummary {
        stop_count: route.len(),
        unique_stop_count: route.iter().collect::<HashSet<_>>().len(),
        route_length,
        curvature,
    })
}
