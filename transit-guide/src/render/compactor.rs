//! Schematic coordinate compaction.
//!
//! Real coordinates make dense areas unreadable and sparse areas wasteful.
//! The compactor replaces them with a layout that keeps the order of stops
//! along each axis but spaces them by rank:
//!
//! 1. Secondary stops (visited by a single line, not a terminal) are moved
//!    onto the straight segment between the main stops around them.
//! 2. Each axis is ranked independently. Stops sharing a coordinate share a
//!    rank, and a stop sits one rank beyond the highest-ranked neighbour
//!    that precedes it on that axis.
//!
//! The network is never modified; compaction works on its own copy of the
//! coordinates.

use tracing::{debug, trace};

use crate::domain::{BusId, Coordinates, StopId};
use crate::network::TransitNetwork;

use super::settings::{Color, Point, RenderSettings};

/// Departures on the same line after which a stop counts as a junction.
const MAIN_STOP_SAME_BUS_VISITS: usize = 3;

/// Lines leaving a stop after which it counts as a junction.
const MAIN_STOP_BUSES: usize = 2;

/// Display positions for stops and colors for bus lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactedLayout {
    positions: Vec<Point>,
    bus_colors: Vec<Color>,
}

impl CompactedLayout {
    pub fn position(&self, stop: StopId) -> Point {
        self.positions[stop.0]
    }

    pub fn bus_color(&self, bus: BusId) -> &Color {
        &self.bus_colors[bus.0]
    }
}

/// Computes a `CompactedLayout` for a network.
pub struct CoordinateCompactor<'a> {
    network: &'a TransitNetwork,
    settings: &'a RenderSettings,
}

impl<'a> CoordinateCompactor<'a> {
    pub fn new(network: &'a TransitNetwork, settings: &'a RenderSettings) -> Self {
        Self { network, settings }
    }

    /// Smooth, rank and rescale every stop; assign palette colors.
    pub fn compact(&self) -> CompactedLayout {
        let coordinates = self.smoothed_coordinates();

        let longitudes: Vec<f64> = coordinates.iter().map(|c| c.longitude).collect();
        let latitudes: Vec<f64> = coordinates.iter().map(|c| c.latitude).collect();
        let x_ranks = self.ranks(&longitudes);
        let y_ranks = self.ranks(&latitudes);

        let max_x = x_ranks.iter().copied().max().unwrap_or(0);
        let max_y = y_ranks.iter().copied().max().unwrap_or(0);
        let padding = self.settings.padding;
        let x_step = step(self.settings.width, padding, max_x);
        let y_step = step(self.settings.height, padding, max_y);

        debug!(max_x, max_y, "compacted stop coordinates");

        let positions = x_ranks
            .iter()
            .zip(&y_ranks)
            .map(|(&x, &y)| {
                Point::new(
                    padding + x_step * x as f64,
                    self.settings.height - padding - y_step * y as f64,
                )
            })
            .collect();

        let bus_colors = self
            .network
            .buses()
            .map(|(bus, _)| self.settings.bus_color(bus.0).clone())
            .collect();

        CompactedLayout {
            positions,
            bus_colors,
        }
    }

    /// Stop coordinates with secondary stops spread evenly between the main
    /// stops around them, line by line in name order.
    pub fn smoothed_coordinates(&self) -> Vec<Coordinates> {
        let mut coordinates: Vec<Coordinates> = self
            .network
            .stops()
            .map(|(_, stop)| stop.coordinates)
            .collect();

        for (bus, _) in self.network.buses() {
            let route = self.network.route(bus);
            let mut previous_main = route[0];
            let mut secondary: Vec<StopId> = Vec::new();

            for &stop in &route[1..] {
                if !self.is_main_stop(stop, bus) {
                    secondary.push(stop);
                    continue;
                }

                let from = self.network.stop(previous_main).coordinates;
                let to = self.network.stop(stop).coordinates;
                let segments = (secondary.len() + 1) as f64;
                for (i, between) in secondary.drain(..).enumerate() {
                    let fraction = (i + 1) as f64 / segments;
                    coordinates[between.0] = Coordinates::new(
                        from.latitude + (to.latitude - from.latitude) * fraction,
                        from.longitude + (to.longitude - from.longitude) * fraction,
                    );
                }
                previous_main = stop;
            }
        }

        coordinates
    }

    /// Whether `stop` anchors the drawing of `bus`.
    ///
    /// Terminals are main stops. So is any stop the line leaves at least
    /// three times, or that another line also leaves.
    pub fn is_main_stop(&self, stop: StopId, bus: BusId) -> bool {
        if self.network.is_terminal(bus, stop) {
            return true;
        }

        let mut same_bus = 0;
        let mut buses = 1;
        for adjacent in self.network.adjacency().forward(stop) {
            if adjacent.bus == bus {
                same_bus += 1;
            } else {
                buses += 1;
            }
            if same_bus >= MAIN_STOP_SAME_BUS_VISITS || buses >= MAIN_STOP_BUSES {
                return true;
            }
        }
        false
    }

    /// Rank of every stop along one axis, indexed by stop id.
    ///
    /// Stops are grouped by exactly equal `values`, groups taken in
    /// ascending order. A group ranks one above its highest-ranked
    /// neighbour from an earlier group, or 0 if it has none.
    pub fn ranks(&self, values: &[f64]) -> Vec<usize> {
        let mut order: Vec<StopId> = (0..values.len()).map(StopId).collect();
        order.sort_by(|a, b| values[a.0].total_cmp(&values[b.0]));

        let mut ranks: Vec<Option<usize>> = vec![None; values.len()];
        for group in order.chunk_by(|a, b| values[a.0] == values[b.0]) {
            let rank = group
                .iter()
                .flat_map(|stop| self.network.adjacency().neighbours(*stop))
                .filter_map(|adjacent| ranks[adjacent.stop.0])
                .max()
                .map_or(0, |highest| highest + 1);

            trace!(value = values[group[0].0], size = group.len(), rank, "ranked group");
            for stop in group {
                ranks[stop.0] = Some(rank);
            }
        }

        ranks.into_iter().map(|rank| rank.unwrap_or(0)).collect()
    }
}

/// Canvas distance between consecutive ranks.
fn step(extent: f64, padding: f64, max_rank: usize) -> f64 {
    if max_rank == 0 {
        0.0
    } else {
        (extent - 2.0 * padding) / max_rank as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusDescription, StopDescription};

    fn settings() -> RenderSettings {
        RenderSettings {
            width: 300.0,
            height: 200.0,
            padding: 50.0,
            ..RenderSettings::default()
        }
    }

    fn build(stops: Vec<StopDescription>, buses: Vec<BusDescription>) -> TransitNetwork {
        TransitNetwork::build(stops, buses).unwrap()
    }

    #[test]
    fn chain_spreads_across_canvas() {
        let network = build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 0.001, 0.5),
                StopDescription::new("C", 0.002, 0.51),
            ],
            vec![BusDescription::new("1", ["A", "B", "C"], true)],
        );
        let settings = settings();
        let layout = CoordinateCompactor::new(&network, &settings).compact();

        assert_eq!(layout.position(StopId(0)), Point::new(50.0, 150.0));
        assert_eq!(layout.position(StopId(1)), Point::new(150.0, 100.0));
        assert_eq!(layout.position(StopId(2)), Point::new(250.0, 50.0));
    }

    #[test]
    fn equal_coordinates_share_a_rank() {
        let network = build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 0.0, 1.0),
                StopDescription::new("C", 1.0, 1.0),
            ],
            vec![BusDescription::new("1", ["A", "B", "C"], false)],
        );
        let settings = settings();
        let compactor = CoordinateCompactor::new(&network, &settings);

        assert_eq!(compactor.ranks(&[0.0, 1.0, 1.0]), vec![0, 1, 1]);
        assert_eq!(compactor.ranks(&[0.0, 0.0, 1.0]), vec![0, 0, 1]);
    }

    #[test]
    fn unconnected_group_collapses_to_baseline() {
        let network = build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 0.0, 1.0),
                StopDescription::new("C", 0.0, 2.0),
            ],
            vec![BusDescription::new("1", ["A", "B"], false)],
        );
        let settings = settings();
        let compactor = CoordinateCompactor::new(&network, &settings);

        // C has no neighbours at all, so it drops back to rank 0
        assert_eq!(compactor.ranks(&[0.0, 1.0, 2.0]), vec![0, 1, 0]);
    }

    #[test]
    fn single_rank_sits_on_padding() {
        let network = build(vec![StopDescription::new("A", 10.0, 10.0)], vec![]);
        let settings = settings();
        let layout = CoordinateCompactor::new(&network, &settings).compact();

        assert_eq!(layout.position(StopId(0)), Point::new(50.0, 150.0));
    }

    #[test]
    fn secondary_stops_are_interpolated() {
        let network = build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 5.0, 1.0),
                StopDescription::new("C", 2.0, 2.0),
            ],
            vec![BusDescription::new("1", ["A", "B", "C"], false)],
        );
        let settings = settings();
        let compactor = CoordinateCompactor::new(&network, &settings);
        let smoothed = compactor.smoothed_coordinates();

        assert_eq!(smoothed[0], Coordinates::new(0.0, 0.0));
        assert_eq!(smoothed[1], Coordinates::new(1.0, 1.0));
        assert_eq!(smoothed[2], Coordinates::new(2.0, 2.0));

        // The source of record is untouched
        assert_eq!(network.stop(StopId(1)).coordinates, Coordinates::new(5.0, 1.0));
    }

    #[test]
    fn main_stop_classification() {
        let network = build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 0.0, 1.0),
                StopDescription::new("C", 0.0, 2.0),
                StopDescription::new("D", 1.0, 1.0),
            ],
            vec![
                BusDescription::new("1", ["A", "B", "C"], false),
                BusDescription::new("2", ["B", "D"], true),
                BusDescription::new("3", ["A", "C", "A", "C", "A"], true),
            ],
        );
        let settings = settings();
        let compactor = CoordinateCompactor::new(&network, &settings);
        let (a, b, c, d) = (StopId(0), StopId(1), StopId(2), StopId(3));
        let (one, two, three) = (BusId(0), BusId(1), BusId(2));

        // Terminals
        assert!(compactor.is_main_stop(a, one));
        assert!(compactor.is_main_stop(c, one));
        assert!(compactor.is_main_stop(b, two));
        // B is also left by bus 2
        assert!(compactor.is_main_stop(b, one));
        // D is only arrived at by bus 2
        assert!(!compactor.is_main_stop(d, two));
        // Bus 3 leaves C twice only, but bus 1 leaves it too
        assert!(compactor.is_main_stop(c, three));
    }

    #[test]
    fn repeated_departures_make_a_main_stop() {
        let network = build(
            vec![
                StopDescription::new("A", 0.0, 0.0),
                StopDescription::new("B", 0.0, 1.0),
                StopDescription::new("C", 0.0, 2.0),
                StopDescription::new("D", 0.0, 3.0),
            ],
            vec![BusDescription::new(
                "1",
                ["A", "B", "C", "B", "D", "B", "A"],
                true,
            )],
        );
        let settings = settings();
        let compactor = CoordinateCompactor::new(&network, &settings);

        assert!(compactor.is_main_stop(StopId(1), BusId(0)));
        assert!(!compactor.is_main_stop(StopId(2), BusId(0)));
    }

    #[test]
    fn colors_follow_bus_order() {
        let network = build(
            vec![StopDescription::new("A", 0.0, 0.0)],
            vec![
                BusDescription::new("b", ["A"], true),
                BusDescription::new("a", ["A"], true),
            ],
        );
        let settings = RenderSettings {
            color_palette: vec![Color::named("red"), Color::named("blue")],
            ..settings()
        };
        let layout = CoordinateCompactor::new(&network, &settings).compact();

        assert_eq!(layout.bus_color(network.bus_id("a").unwrap()), &Color::named("red"));
        assert_eq!(layout.bus_color(network.bus_id("b").unwrap()), &Color::named("blue"));
    }
}
