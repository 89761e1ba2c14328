//! Stop and bus line descriptions.
//!
//! `StopDescription` and `BusDescription` are the records handed over by
//! ingestion. `Stop` and `BusLine` are the validated forms kept by the
//! network; a `BusLine` always carries its expanded route.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::coordinates::Coordinates;
use super::error::BuildError;

/// A stop as declared by the input description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopDescription {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Road distances in metres to other named stops, in this direction.
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

impl StopDescription {
    /// Create a stop with no declared distances.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            road_distances: BTreeMap::new(),
        }
    }

    /// Declare a road distance to another stop.
    pub fn with_distance(mut self, to: impl Into<String>, meters: u32) -> Self {
        self.road_distances.insert(to.into(), meters);
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A bus line as declared by the input description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BusDescription {
    pub name: String,
    pub stops: Vec<String>,

    /// Circular lines are driven as listed; others go out and back.
    pub is_roundtrip: bool,
}

impl BusDescription {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        stops: impl IntoIterator<Item = S>,
        is_roundtrip: bool,
    ) -> Self {
        Self {
            name: name.into(),
            stops: stops.into_iter().map(Into::into).collect(),
            is_roundtrip,
        }
    }
}

/// A validated stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub coordinates: Coordinates,
}

/// A validated bus line with its expanded route.
///
/// For a non-circular line declared as `[s0, .., sn-1]` the route is
/// `[s0, .., sn-1, sn-2, .., s0]`, so downstream code never needs to know
/// whether a line is circular to follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct BusLine {
    pub name: String,
    pub is_roundtrip: bool,
    route: Vec<String>,
}

impl BusLine {
    /// Validate a description and expand its route.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_guide::domain::{BusDescription, BusLine};
    ///
    /// let line = BusLine::from_description(BusDescription::new("750", ["A", "B", "C"], false)).unwrap();
    /// assert_eq!(line.route(), ["A", "B", "C", "B", "A"]);
    /// ```
    pub fn from_description(description: BusDescription) -> Result<Self, BuildError> {
        let BusDescription {
            name,
            mut stops,
            is_roundtrip,
        } = description;

        if stops.is_empty() {
            return Err(BuildError::EmptyRoute(name));
        }

        if !is_roundtrip {
            let declared = stops.len();
            stops.reserve(declared - 1);
            for i in (0..declared - 1).rev() {
                let stop = stops[i].clone();
                stops.push(stop);
            }
        }

        Ok(Self {
            name,
            is_roundtrip,
            route: stops,
        })
    }

    /// Stop names in riding order, return leg included.
    pub fn route(&self) -> &[String] {
        &self.route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_route_is_kept() {
        let line =
            BusLine::from_description(BusDescription::new("256", ["A", "B", "C", "A"], true))
                .unwrap();
        assert_eq!(line.route(), ["A", "B", "C", "A"]);
    }

    #[test]
    fn out_and_back_is_expanded() {
        let line =
            BusLine::from_description(BusDescription::new("750", ["A", "B", "C"], false)).unwrap();
        assert_eq!(line.route(), ["A", "B", "C", "B", "A"]);
    }

    #[test]
    fn single_stop_line() {
        let line = BusLine::from_description(BusDescription::new("1", ["A"], false)).unwrap();
        assert_eq!(line.route(), ["A"]);
    }

    #[test]
    fn empty_route_rejected() {
        let err = BusLine::from_description(BusDescription::new("1", Vec::<String>::new(), true))
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyRoute("1".into()));
    }

    #[test]
    fn stop_description_builder() {
        let stop = StopDescription::new("A", 1.0, 2.0).with_distance("B", 100);
        assert_eq!(stop.road_distances.get("B"), Some(&100));
        assert_eq!(stop.coordinates(), Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn deserialize_stop_without_distances() {
        let stop: StopDescription =
            serde_json::from_str(r#"{"name": "A", "latitude": 1.5, "longitude": 2.5}"#).unwrap();
        assert!(stop.road_distances.is_empty());
    }
}
