//! Domain error types.
//!
//! These errors describe an input description that cannot be turned into a
//! network. They are fatal at build time and distinct from lookup misses,
//! which are reported as `None`.

/// A settings value outside its valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid settings: {field} {reason}")]
pub struct InvalidSettings {
    pub field: &'static str,
    pub reason: &'static str,
}

impl InvalidSettings {
    pub fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

/// Integrity and configuration errors raised while building the network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// Two stops share a name
    #[error("duplicate stop: {0}")]
    DuplicateStop(String),

    /// Two bus lines share a name
    #[error("duplicate bus: {0}")]
    DuplicateBus(String),

    /// A bus line references a stop that was never declared
    #[error("bus {bus} references unknown stop {stop}")]
    UnknownStop { bus: String, stop: String },

    /// A stop declares a road distance to a stop that was never declared
    #[error("stop {from} declares a distance to unknown stop {to}")]
    UnknownDistanceTarget { from: String, to: String },

    /// A bus line has no stops
    #[error("bus {0} has an empty route")]
    EmptyRoute(String),

    /// Consecutive stops on a route have no road distance in either direction
    #[error("no road distance between {from} and {to}")]
    MissingDistance { from: String, to: String },

    /// Routing or render settings are out of range
    #[error(transparent)]
    InvalidSettings(#[from] InvalidSettings),
}
