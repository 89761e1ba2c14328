//! The built transit network.
//!
//! A `TransitNetwork` is the source of record for every query: stops, bus
//! lines with their expanded routes, road distances and adjacency, all keyed
//! by dense ids. It is built once from the ingestion records and never
//! mutated afterwards.

mod adjacency;
mod distances;
mod names;

pub use adjacency::{AdjacencyIndex, AdjacentStop};
pub use distances::DistanceTable;
pub use names::NameIndex;

use tracing::debug;

use crate::domain::{
    BuildError, BusDescription, BusId, BusLine, Stop, StopDescription, StopId,
};

/// Immutable stop and bus data keyed by dense ids.
#[derive(Debug, Clone)]
pub struct TransitNetwork {
    stop_names: NameIndex<StopId>,
    bus_names: NameIndex<BusId>,
    stops: Vec<Stop>,
    buses: Vec<BusLine>,
    routes: Vec<Vec<StopId>>,
    distances: DistanceTable,
    adjacency: AdjacencyIndex,
}

impl TransitNetwork {
    /// Validate the descriptions and build the network.
    ///
    /// Ids are allocated in name order for both stops and buses. Any
    /// reference to an undeclared stop aborts the build.
    pub fn build(
        mut stop_descriptions: Vec<StopDescription>,
        bus_descriptions: Vec<BusDescription>,
    ) -> Result<Self, BuildError> {
        stop_descriptions.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = stop_descriptions
            .windows(2)
            .find(|pair| pair[0].name == pair[1].name)
        {
            return Err(BuildError::DuplicateStop(pair[0].name.clone()));
        }

        let mut bus_lines = bus_descriptions
            .into_iter()
            .map(BusLine::from_description)
            .collect::<Result<Vec<_>, _>>()?;
        bus_lines.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = bus_lines.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(BuildError::DuplicateBus(pair[0].name.clone()));
        }

        let mut stop_names = NameIndex::new();
        for description in &stop_descriptions {
            stop_names.insert(&description.name);
        }
        let mut bus_names = NameIndex::new();
        for line in &bus_lines {
            bus_names.insert(&line.name);
        }

        let mut distances = DistanceTable::new();
        for description in &stop_descriptions {
            let from = stop_names.insert(&description.name);
            for (to_name, meters) in &description.road_distances {
                let to = stop_names
                    .id(to_name)
                    .ok_or_else(|| BuildError::UnknownDistanceTarget {
                        from: description.name.clone(),
                        to: to_name.clone(),
                    })?;
                distances.declare(from, to, *meters);
            }
        }

        let mut routes = Vec::with_capacity(bus_lines.len());
        let mut adjacency = AdjacencyIndex::new(stop_names.len());
        for line in &bus_lines {
            let route = line
                .route()
                .iter()
                .map(|stop| {
                    stop_names.id(stop).ok_or_else(|| BuildError::UnknownStop {
                        bus: line.name.clone(),
                        stop: stop.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            adjacency.add_route(bus_names.insert(&line.name), &route);
            routes.push(route);
        }

        let stops = stop_descriptions
            .into_iter()
            .map(|description| Stop {
                coordinates: description.coordinates(),
                name: description.name,
            })
            .collect();

        debug!(
            stops = stop_names.len(),
            buses = bus_names.len(),
            distances = distances.len(),
            "transit network built"
        );

        Ok(Self {
            stop_names,
            bus_names,
            stops,
            buses: bus_lines,
            routes,
            distances,
            adjacency,
        })
    }

    /// Look up a stop id by name.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_names.id(name)
    }

    /// Look up a bus id by name.
    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_names.id(name)
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    pub fn bus(&self, id: BusId) -> &BusLine {
        &self.buses[id.0]
    }

    pub fn stop_name(&self, id: StopId) -> &str {
        self.stop_names.name(id)
    }

    pub fn bus_name(&self, id: BusId) -> &str {
        self.bus_names.name(id)
    }

    /// Expanded route of a bus as stop ids.
    pub fn route(&self, bus: BusId) -> &[StopId] {
        &self.routes[bus.0]
    }

    /// Terminals of a line: its first stop, plus the turnaround stop of an
    /// out-and-back line.
    pub fn terminals(&self, bus: BusId) -> (StopId, Option<StopId>) {
        let route = self.route(bus);
        let turnaround = (!self.bus(bus).is_roundtrip).then(|| route[route.len() / 2]);
        (route[0], turnaround)
    }

    /// Whether `stop` is a terminal of `bus`.
    pub fn is_terminal(&self, bus: BusId, stop: StopId) -> bool {
        let (first, turnaround) = self.terminals(bus);
        stop == first || turnaround == Some(stop)
    }

    /// All stops with their ids, in name order.
    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(index, stop)| (StopId(index), stop))
    }

    /// All bus lines with their ids, in name order.
    pub fn buses(&self) -> impl Iterator<Item = (BusId, &BusLine)> {
        self.buses
            .iter()
            .enumerate()
            .map(|(index, bus)| (BusId(index), bus))
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// Road distance between two stops, failing if none was declared.
    pub fn road_distance(&self, from: StopId, to: StopId) -> Result<u32, BuildError> {
        self.distances
            .get(from, to)
            .ok_or_else(|| BuildError::MissingDistance {
                from: self.stop_name(from).to_string(),
                to: self.stop_name(to).to_string(),
            })
    }

    /// Road length of a bus route in metres.
    pub fn route_length(&self, bus: BusId) -> Result<u64, BuildError> {
        self.route(bus)
            .windows(2)
            .map(|pair| self.road_distance(pair[0], pair[1]).map(u64::from))
            .sum()
    }

    /// Great-circle length of a bus route in metres.
    pub fn geodesic_length(&self, bus: BusId) -> f64 {
        self.route(bus)
            .windows(2)
            .map(|pair| {
                self.stop(pair[0])
                    .coordinates
                    .distance_to(&self.stop(pair[1]).coordinates)
            })
            .sum()
    }
}
