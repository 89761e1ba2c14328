//! Route planner tying the graph, search and itinerary together.

use crate::domain::{BuildError, StopId};
use crate::network::TransitNetwork;

use super::config::{CacheConfig, RoutingSettings};
use super::graph::{RouteGraph, RouteGraphBuilder};
use super::itinerary::{Itinerary, ItineraryReconstructor, RideLeg};
use super::search::ShortestPathEngine;

/// Route planner over a built network.
pub struct TransitRouter {
    settings: RoutingSettings,
    engine: ShortestPathEngine,
}

impl TransitRouter {
    /// Validate the settings and build the route graph.
    pub fn build(
        network: &TransitNetwork,
        settings: RoutingSettings,
        cache_config: &CacheConfig,
    ) -> Result<Self, BuildError> {
        settings.validate()?;
        let graph = RouteGraphBuilder::new(network, &settings).build()?;

        Ok(Self {
            settings,
            engine: ShortestPathEngine::new(graph, cache_config),
        })
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn graph(&self) -> &RouteGraph {
        self.engine.graph()
    }

    /// Cheapest itinerary from `from` to `to`, `None` if unreachable.
    pub fn itinerary(
        &self,
        network: &TransitNetwork,
        from: StopId,
        to: StopId,
    ) -> Option<Itinerary> {
        let route = self.engine.find_route(from, to)?;
        Some(self.reconstructor(network).itinerary(&route))
    }

    /// Rides of the cheapest itinerary with the stops each one passes.
    pub fn legs(&self, network: &TransitNetwork, from: StopId, to: StopId) -> Option<Vec<RideLeg>> {
        let route = self.engine.find_route(from, to)?;
        Some(self.reconstructor(network).legs(&route))
    }

    fn reconstructor<'a>(&'a self, network: &'a TransitNetwork) -> ItineraryReconstructor<'a> {
        ItineraryReconstructor::new(network, self.engine.graph(), &self.settings)
    }
}
