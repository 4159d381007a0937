//! Route polyline with linear measure.

use super::{Coordinate, DomainError};

/// A driving route polyline.
///
/// Holds the ordered coordinate sequence together with the cumulative
/// distance (in kilometers) from the start to each vertex, computed once
/// at construction. The polyline always has at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    coords: Vec<Coordinate>,
    cumulative_km: Vec<f64>,
}

impl Route {
    /// Build a route from a polyline, accumulating per-segment distances.
    pub fn new(coords: Vec<Coordinate>) -> Result<Self, DomainError> {
        if coords.len() < 2 {
            return Err(DomainError::RouteTooShort(coords.len()));
        }

        let mut cumulative_km = Vec::with_capacity(coords.len());
        let mut total = 0.0;
        cumulative_km.push(0.0);
        for pair in coords.windows(2) {
            total += pair[0].haversine_km(&pair[1]);
            cumulative_km.push(total);
        }

        Ok(Self {
            coords,
            cumulative_km,
        })
    }

    /// The polyline vertices.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Cumulative distance from the start to each vertex, in km.
    pub fn cumulative_km(&self) -> &[f64] {
        &self.cumulative_km
    }

    /// Total route length in km.
    pub fn total_km(&self) -> f64 {
        *self.cumulative_km.last().unwrap_or(&0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn rejects_short_polylines() {
        assert!(matches!(
            Route::new(vec![]),
            Err(DomainError::RouteTooShort(0))
        ));
        assert!(matches!(
            Route::new(vec![coord(0.0, 0.0)]),
            Err(DomainError::RouteTooShort(1))
        ));
    }

    #[test]
    fn cumulative_distances_are_monotonic() {
        let route = Route::new(vec![
            coord(48.0, 2.0),
            coord(48.5, 2.0),
            coord(49.0, 2.0),
            coord(49.0, 2.5),
        ])
        .unwrap();

        let cum = route.cumulative_km();
        assert_eq!(cum.len(), 4);
        assert_eq!(cum[0], 0.0);
        for pair in cum.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(route.total_km(), cum[3]);
    }

    #[test]
    fn total_matches_segment_sum() {
        let a = coord(48.0, 2.0);
        let b = coord(48.5, 2.3);
        let c = coord(49.0, 2.1);
        let route = Route::new(vec![a, b, c]).unwrap();

        assert_relative_eq!(
            route.total_km(),
            a.haversine_km(&b) + b.haversine_km(&c),
            max_relative = 1e-12
        );
    }
}
