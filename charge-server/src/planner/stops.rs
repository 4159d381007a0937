//! Greedy SOC-constrained stop selection.

use tracing::debug;

use crate::domain::{ChargingStation, SocWindow};

use super::referencer::LocatedStation;
use super::strategy::SelectionPolicy;

/// No viable charging stop exists within reach.
///
/// A distinct business outcome, not an infrastructure failure: the route
/// simply cannot be driven with the given vehicle and SOC window.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "no reachable charging station between km {position_km:.1} and km {max_reachable_km:.1}"
)]
pub struct Unreachable {
    /// Position of the last recharge (or the start), km along the route
    pub position_km: f64,

    /// Furthest point reachable before the SOC floor, km along the route
    pub max_reachable_km: f64,
}

/// A chosen recharge stop.
#[derive(Debug, Clone)]
pub struct RechargeStop {
    /// The chosen station
    pub station: ChargingStation,

    /// Position along the route, km
    pub distance_km: f64,
}

/// Select the sequence of recharge stops for a route.
///
/// Walks the route greedily: as long as the destination is out of range,
/// pick the stop the policy prefers among the stations strictly ahead of
/// the current position and within reach, then recharge to the window
/// ceiling there. `stations` must be sorted by distance (the referencer
/// output) and `soc_per_km` must be positive and finite, which
/// `Vehicle::soc_per_km` guarantees.
///
/// Every recharge assumes a full top-up to `soc.max()`; partial charging
/// is out of scope.
pub fn plan_recharge_stops(
    stations: &[LocatedStation],
    soc: SocWindow,
    soc_per_km: f64,
    total_km: f64,
    policy: &SelectionPolicy,
) -> Result<Vec<RechargeStop>, Unreachable> {
    let mut stops: Vec<RechargeStop> = Vec::new();
    let mut current_soc = soc.start();
    let mut last_recharge_km = 0.0;
    let mut position_km = 0.0;

    loop {
        let max_reachable_km = last_recharge_km + (current_soc - soc.min()) / soc_per_km;
        if max_reachable_km >= total_km {
            return Ok(stops);
        }

        let candidates: Vec<&LocatedStation> = stations
            .iter()
            .filter(|s| {
                s.distance_km > position_km
                    && s.distance_km <= max_reachable_km
                    && s.station.power_kw > 0.0
            })
            .collect();

        let Some(chosen) = policy.pick(&candidates) else {
            return Err(Unreachable {
                position_km,
                max_reachable_km,
            });
        };

        debug!(
            station = %chosen.station.id,
            km = chosen.distance_km,
            power_kw = chosen.station.power_kw,
            "recharge stop selected"
        );

        stops.push(RechargeStop {
            station: chosen.station.clone(),
            distance_km: chosen.distance_km,
        });
        last_recharge_km = chosen.distance_km;
        position_km = chosen.distance_km;
        current_soc = soc.max();
    }
}
