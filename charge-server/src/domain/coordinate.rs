//! Geographic coordinate type.

use std::fmt;

use super::DomainError;

/// Mean Earth radius in kilometers, for spherical distance.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A WGS84 geographic coordinate in decimal degrees.
///
/// Any `Coordinate` value is finite and within bounds by construction:
/// latitude in [-90, 90], longitude in [-180, 180].
///
/// # Examples
///
/// ```
/// use charge_server::domain::Coordinate;
///
/// let paris = Coordinate::new(48.8566, 2.3522).unwrap();
/// assert_eq!(paris.lat(), 48.8566);
///
/// // Out-of-range latitude is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, validating bounds and finiteness.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(DomainError::InvalidCoordinate { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another coordinate, in kilometers.
    ///
    /// Uses the haversine formula on a spherical Earth.
    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
