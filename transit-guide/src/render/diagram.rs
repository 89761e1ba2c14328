//! Diagram scenes built from a compacted layout.
//!
//! A `Diagram` is a flat list of scene items in drawing order. Each
//! configured `Layer` contributes its items in turn; the mapping from layer
//! to drawing function is fixed, so the only configurable part is which
//! layers are drawn and in what order.

use serde::Serialize;
use tracing::debug;

use crate::domain::StopId;
use crate::network::TransitNetwork;
use crate::planner::RideLeg;

use super::compactor::CompactedLayout;
use super::settings::{Color, Layer, Point, RenderSettings};

/// One element of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagramItem {
    /// Fills a rectangle, used to fade the base map behind an itinerary.
    Backdrop {
        top_left: Point,
        width: f64,
        height: f64,
        color: Color,
    },
    BusLine {
        bus: String,
        color: Color,
        points: Vec<Point>,
    },
    BusLabel {
        bus: String,
        color: Color,
        position: Point,
    },
    StopPoint {
        stop: String,
        position: Point,
    },
    StopLabel {
        stop: String,
        position: Point,
    },
}

/// A rendered network diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub width: f64,
    pub height: f64,
    pub items: Vec<DiagramItem>,
}

impl Diagram {
    fn new(settings: &RenderSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            items: Vec::new(),
        }
    }
}

/// Everything a map layer needs to draw the whole network.
struct MapScene<'a> {
    network: &'a TransitNetwork,
    layout: &'a CompactedLayout,
}

/// Everything a route layer needs to draw one itinerary.
struct RouteScene<'a> {
    network: &'a TransitNetwork,
    layout: &'a CompactedLayout,
    legs: &'a [RideLeg],
}

type MapLayerFn = fn(&MapScene<'_>, &mut Vec<DiagramItem>);
type RouteLayerFn = fn(&RouteScene<'_>, &mut Vec<DiagramItem>);

fn map_layer(layer: Layer) -> MapLayerFn {
    match layer {
        Layer::BusLines => map_bus_lines,
        Layer::BusLabels => map_bus_labels,
        Layer::StopPoints => map_stop_points,
        Layer::StopLabels => map_stop_labels,
    }
}

fn route_layer(layer: Layer) -> RouteLayerFn {
    match layer {
        Layer::BusLines => route_bus_lines,
        Layer::BusLabels => route_bus_labels,
        Layer::StopPoints => route_stop_points,
        Layer::StopLabels => route_stop_labels,
    }
}

/// Draw the whole network in the configured layer order.
pub fn map_diagram(
    network: &TransitNetwork,
    layout: &CompactedLayout,
    settings: &RenderSettings,
) -> Diagram {
    let scene = MapScene { network, layout };
    let mut diagram = Diagram::new(settings);
    for layer in &settings.layers {
        map_layer(*layer)(&scene, &mut diagram.items);
    }
    debug!(items = diagram.items.len(), "drew network diagram");
    diagram
}

/// Draw an itinerary over a faded copy of the network diagram.
pub fn route_diagram(
    network: &TransitNetwork,
    layout: &CompactedLayout,
    settings: &RenderSettings,
    legs: &[RideLeg],
) -> Diagram {
    let mut diagram = map_diagram(network, layout, settings);
    let margin = settings.outer_margin;
    diagram.items.push(DiagramItem::Backdrop {
        top_left: Point::new(-margin, -margin),
        width: settings.width + 2.0 * margin,
        height: settings.height + 2.0 * margin,
        color: settings.underlayer_color.clone(),
    });

    let scene = RouteScene {
        network,
        layout,
        legs,
    };
    for layer in &settings.layers {
        route_layer(*layer)(&scene, &mut diagram.items);
    }
    debug!(
        rides = legs.len(),
        items = diagram.items.len(),
        "drew itinerary diagram"
    );
    diagram
}

fn map_bus_lines(scene: &MapScene<'_>, items: &mut Vec<DiagramItem>) {
    for (bus, line) in scene.network.buses() {
        items.push(DiagramItem::BusLine {
            bus: line.name.clone(),
            color: scene.layout.bus_color(bus).clone(),
            points: scene
                .network
                .route(bus)
                .iter()
                .map(|stop| scene.layout.position(*stop))
                .collect(),
        });
    }
}

fn map_bus_labels(scene: &MapScene<'_>, items: &mut Vec<DiagramItem>) {
    for (bus, line) in scene.network.buses() {
        let (first, turnaround) = scene.network.terminals(bus);
        let labelled = std::iter::once(first).chain(turnaround.filter(|stop| *stop != first));
        for stop in labelled {
            items.push(DiagramItem::BusLabel {
                bus: line.name.clone(),
                color: scene.layout.bus_color(bus).clone(),
                position: scene.layout.position(stop),
            });
        }
    }
}

fn map_stop_points(scene: &MapScene<'_>, items: &mut Vec<DiagramItem>) {
    for (stop, data) in scene.network.stops() {
        items.push(DiagramItem::StopPoint {
            stop: data.name.clone(),
            position: scene.layout.position(stop),
        });
    }
}

fn map_stop_labels(scene: &MapScene<'_>, items: &mut Vec<DiagramItem>) {
    for (stop, data) in scene.network.stops() {
        items.push(DiagramItem::StopLabel {
            stop: data.name.clone(),
            position: scene.layout.position(stop),
        });
    }
}

fn route_bus_lines(scene: &RouteScene<'_>, items: &mut Vec<DiagramItem>) {
    for leg in scene.legs {
        items.push(DiagramItem::BusLine {
            bus: scene.network.bus_name(leg.bus).to_string(),
            color: scene.layout.bus_color(leg.bus).clone(),
            points: leg
                .stops
                .iter()
                .map(|stop| scene.layout.position(*stop))
                .collect(),
        });
    }
}

fn route_bus_labels(scene: &RouteScene<'_>, items: &mut Vec<DiagramItem>) {
    for leg in scene.legs {
        for stop in &leg.stops {
            if scene.network.is_terminal(leg.bus, *stop) {
                items.push(DiagramItem::BusLabel {
                    bus: scene.network.bus_name(leg.bus).to_string(),
                    color: scene.layout.bus_color(leg.bus).clone(),
                    position: scene.layout.position(*stop),
                });
            }
        }
    }
}

fn route_stop_points(scene: &RouteScene<'_>, items: &mut Vec<DiagramItem>) {
    for leg in scene.legs {
        for stop in &leg.stops {
            items.push(DiagramItem::StopPoint {
                stop: scene.network.stop_name(*stop).to_string(),
                position: scene.layout.position(*stop),
            });
        }
    }
}

/// Labels the departure stop and every stop where a ride ends.
fn route_stop_labels(scene: &RouteScene<'_>, items: &mut Vec<DiagramItem>) {
    let Some(departure) = scene.legs.first().and_then(|leg| leg.stops.first()) else {
        return;
    };
    let alightings = scene.legs.iter().filter_map(|leg| leg.stops.last());

    for stop in std::iter::once(departure).chain(alightings) {
        push_stop_label(scene, *stop, items);
    }
}

fn push_stop_label(scene: &RouteScene<'_>, stop: StopId, items: &mut Vec<DiagramItem>) {
    items.push(DiagramItem::StopLabel {
        stop: scene.network.stop_name(stop).to_string(),
        position: scene.layout.position(stop),
    });
}
