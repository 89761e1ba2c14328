//! Route planner using shortest paths over a ride graph.
//!
//! This module answers "what is the cheapest way from stop A to stop B?".
//! Each bus route is expanded into edges for every boarding/alighting pair,
//! Dijkstra finds the cheapest chain of rides, and the chain is turned into
//! alternating waits and rides.

mod cache;
mod config;
mod graph;
mod itinerary;
mod router;
mod search;

pub use cache::RouteCache;
pub use config::{CacheConfig, RoutingSettings};
pub use graph::{EdgeId, RouteEdge, RouteGraph, RouteGraphBuilder};
pub use itinerary::{Itinerary, ItineraryItem, ItineraryReconstructor, RideLeg};
pub use router::TransitRouter;
pub use search::{RouteInfo, ShortestPathEngine, ShortestPathTree};
