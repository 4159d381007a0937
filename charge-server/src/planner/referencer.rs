//! Route linear referencing.
//!
//! Projects candidate stations onto the route path to obtain their
//! distance along the route, in a UTM projection chosen from the route
//! centroid so the arc lengths come out in meters.

use geo::{Centroid, Coord, LineString, coord};
use tracing::warn;

use crate::corridor::projection::UtmZone;
use crate::domain::{ChargingStation, Coordinate};

/// A candidate station annotated with its position along the route.
#[derive(Debug, Clone)]
pub struct LocatedStation {
    /// The station record
    pub station: ChargingStation,

    /// Arc-length position of the closest point on the route, km
    pub distance_km: f64,
}

/// Linear-reference `stations` against the route polyline.
///
/// Stations whose projection cannot be computed are dropped with a
/// warning; they never abort the plan. The result is sorted by
/// non-decreasing `distance_km`, preserving discovery order on ties.
pub fn locate_along_route(
    route: &[Coordinate],
    stations: Vec<ChargingStation>,
) -> Vec<LocatedStation> {
    if route.len() < 2 {
        warn!(points = route.len(), "route too short for linear referencing");
        return Vec::new();
    }

    let line: LineString<f64> = route
        .iter()
        .map(|c| coord! { x: c.lon(), y: c.lat() })
        .collect();
    let Some(centroid) = line.centroid() else {
        warn!("route has no centroid, skipping linear referencing");
        return Vec::new();
    };
    let zone = UtmZone::covering(centroid.x(), centroid.y());

    let path: Vec<Coord<f64>> = route
        .iter()
        .map(|c| zone.forward(coord! { x: c.lon(), y: c.lat() }))
        .collect();
    let mut cumulative_m = Vec::with_capacity(path.len());
    let mut total = 0.0;
    cumulative_m.push(0.0);
    for pair in path.windows(2) {
        total += (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y);
        cumulative_m.push(total);
    }

    let mut located = Vec::with_capacity(stations.len());
    for station in stations {
        let point = zone.forward(coord! {
            x: station.position.lon(),
            y: station.position.lat(),
        });
        match project_onto_path(&path, &cumulative_m, point) {
            Some(arc_m) if arc_m.is_finite() => located.push(LocatedStation {
                station,
                distance_km: arc_m / 1000.0,
            }),
            _ => warn!(station = %station.id, "station position could not be referenced, dropped"),
        }
    }

    located.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    located
}

/// Arc-length position of the closest point on the path to `point`.
fn project_onto_path(path: &[Coord<f64>], cumulative_m: &[f64], point: Coord<f64>) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None; // (squared distance, arc length)

    for (i, pair) in path.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len_sq = dx * dx + dy * dy;

        let t = if len_sq == 0.0 {
            0.0
        } else {
            (((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
        };

        let qx = a.x + t * dx;
        let qy = a.y + t * dy;
        let dist_sq = (point.x - qx).powi(2) + (point.y - qy).powi(2);
        let arc = cumulative_m[i] + t * len_sq.sqrt();

        if best.is_none_or(|(d, _)| dist_sq < d) {
            best = Some((dist_sq, arc));
        }
    }

    best.map(|(_, arc)| arc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use approx::assert_relative_eq;

    fn coordinate(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn station(id: &str, lat: f64, lon: f64) -> ChargingStation {
        ChargingStation {
            id: StationId::parse(id).unwrap(),
            position: coordinate(lat, lon),
            power_kw: 50.0,
            operator: None,
            address: None,
            connector: None,
        }
    }

    fn north_south_route() -> Vec<Coordinate> {
        vec![coordinate(48.0, 3.0), coordinate(49.0, 3.0)]
    }

    #[test]
    fn distances_match_haversine_along_a_meridian() {
        let route = north_south_route();
        let located = locate_along_route(&route, vec![station("a", 48.2, 3.05)]);

        assert_eq!(located.len(), 1);
        let expected = coordinate(48.0, 3.0).haversine_km(&coordinate(48.2, 3.0));
        assert_relative_eq!(located[0].distance_km, expected, max_relative = 5e-3);
    }

    #[test]
    fn output_is_sorted_ascending() {
        let route = north_south_route();
        let located = locate_along_route(
            &route,
            vec![
                station("far", 48.8, 3.0),
                station("near", 48.1, 3.0),
                station("mid", 48.4, 3.0),
            ],
        );

        let ids: Vec<&str> = located.iter().map(|s| s.station.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);
        for pair in located.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn station_before_start_clamps_to_zero() {
        let route = north_south_route();
        let located = locate_along_route(&route, vec![station("behind", 47.5, 3.0)]);
        assert_eq!(located.len(), 1);
        assert_relative_eq!(located[0].distance_km, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn station_past_end_clamps_to_total_length() {
        let route = north_south_route();
        let located = locate_along_route(&route, vec![station("ahead", 49.5, 3.0)]);
        assert_eq!(located.len(), 1);

        let total = coordinate(48.0, 3.0).haversine_km(&coordinate(49.0, 3.0));
        assert_relative_eq!(located[0].distance_km, total, max_relative = 5e-3);
    }

    #[test]
    fn off_route_station_projects_onto_nearest_vertex_region() {
        let route = north_south_route();
        // Far east of the route at the same latitude as the midpoint.
        let located = locate_along_route(&route, vec![station("east", 48.5, 4.0)]);
        assert_eq!(located.len(), 1);

        let expected = coordinate(48.0, 3.0).haversine_km(&coordinate(48.5, 3.0));
        assert_relative_eq!(located[0].distance_km, expected, max_relative = 2e-2);
    }

    #[test]
    fn short_route_yields_nothing() {
        let located = locate_along_route(&[coordinate(48.0, 3.0)], vec![station("a", 48.2, 3.0)]);
        assert!(located.is_empty());
    }

    #[test]
    fn ties_preserve_discovery_order() {
        let route = north_south_route();
        let located = locate_along_route(
            &route,
            vec![station("first", 48.3, 3.0), station("second", 48.3, 3.0)],
        );
        let ids: Vec<&str> = located.iter().map(|s| s.station.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }
}
