//! Domain types for the transit guide.
//!
//! This module contains the value types that describe a transit network.
//! Validated types enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod coordinates;
mod description;
mod error;
mod ids;

pub use coordinates::{Coordinates, EARTH_RADIUS_METERS};
pub use description::{BusDescription, BusLine, Stop, StopDescription};
pub use error::{BuildError, InvalidSettings};
pub use ids::{BusId, DenseId, StopId};
