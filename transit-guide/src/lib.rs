//! Transit guide.
//!
//! Answers questions about a bus network: which buses serve a stop, how
//! long and winding a line is, the quickest itinerary between two stops,
//! and a schematic diagram of the network.

pub mod domain;
pub mod guide;
pub mod network;
pub mod planner;
pub mod render;
pub mod requests;
