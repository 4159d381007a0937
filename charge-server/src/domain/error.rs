//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors and are detected before any
//! planning work starts.

/// Domain-level errors for validation and preconditions.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude outside WGS84 bounds, or non-finite
    #[error("invalid coordinate: lat {lat}, lon {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// A route polyline needs at least two points
    #[error("route needs at least 2 points, got {0}")]
    RouteTooShort(usize),

    /// SOC window bounds are inconsistent
    #[error("invalid SOC window: {0}")]
    InvalidSocWindow(&'static str),

    /// Vehicle average range is zero or non-finite, so the consumption
    /// rate is undefined
    #[error("vehicle average range is degenerate ({average_km} km)")]
    DegenerateRange { average_km: f64 },

    /// Station identifier is empty or blank
    #[error("invalid station id: {0}")]
    InvalidStationId(&'static str),
}
