//! Geographic coordinates and great-circle distance.

/// Mean Earth radius used for geodesic lengths, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in metres (spherical law of cosines).
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_guide::domain::Coordinates;
    ///
    /// let a = Coordinates::new(55.0, 37.0);
    /// assert_eq!(a.distance_to(&a), 0.0);
    /// ```
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        // Rounding can push the cosine just outside [-1, 1] for near-identical points
        let cos = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lon.cos())
            .clamp(-1.0, 1.0);

        EARTH_RADIUS_METERS * cos.acos()
    }
}
