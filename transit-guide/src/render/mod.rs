//! Schematic network diagrams.
//!
//! Stop coordinates are first compacted into an order-preserving layout,
//! then each configured layer adds its scene items. Actual drawing (SVG or
//! otherwise) is left to whoever consumes the `Diagram`.

mod compactor;
mod diagram;
mod settings;

pub use compactor::{CompactedLayout, CoordinateCompactor};
pub use diagram::{Diagram, DiagramItem, map_diagram, route_diagram};
pub use settings::{Color, Layer, Point, RenderSettings};
