//! Charging time estimation.
//!
//! Every stop charges from the window floor to its ceiling (the planner
//! resets SOC to the ceiling at each stop), so the energy per stop is
//! the same and only the rated power varies.

use crate::domain::SocWindow;

use super::stops::RechargeStop;

/// Hours spent charging at one stop.
///
/// Stops with non-positive rated power contribute zero; the planner
/// never selects such a stop.
pub fn stop_charge_hours(stop: &RechargeStop, battery_kwh: f64, soc: SocWindow) -> f64 {
    if stop.station.power_kw <= 0.0 {
        return 0.0;
    }
    let energy_kwh = (soc.max() - soc.min()) / 100.0 * battery_kwh;
    energy_kwh / stop.station.power_kw
}

/// Total charging time across all stops, in whole minutes.
///
/// Rounding (half up) is applied once to the total, not per stop.
pub fn total_charging_minutes(stops: &[RechargeStop], battery_kwh: f64, soc: SocWindow) -> u64 {
    let hours: f64 = stops
        .iter()
        .map(|stop| stop_charge_hours(stop, battery_kwh, soc))
        .sum();
    (hours * 60.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChargingStation, Coordinate, StationId};

    fn stop(power_kw: f64) -> RechargeStop {
        RechargeStop {
            station: ChargingStation {
                id: StationId::parse("s").unwrap(),
                position: Coordinate::new(48.0, 2.0).unwrap(),
                power_kw,
                operator: None,
                address: None,
                connector: None,
            },
            distance_km: 100.0,
        }
    }

    fn soc(start: f64, min: f64, max: f64) -> SocWindow {
        SocWindow::new(start, min, max).unwrap()
    }

    #[test]
    fn single_stop_example() {
        // 60 kWh battery, 20 -> 90 %: 42 kWh at 50 kW is 50.4 min, rounds to 50.
        let stops = [stop(50.0)];
        assert_eq!(total_charging_minutes(&stops, 60.0, soc(80.0, 20.0, 90.0)), 50);
    }

    #[test]
    fn rounds_half_up_on_the_total() {
        // 50.5 kWh at 60 kW for a full 0 -> 100 window: exactly 50.5 min.
        let stops = [stop(60.0)];
        assert_eq!(total_charging_minutes(&stops, 50.5, soc(50.0, 0.0, 100.0)), 51);
    }

    #[test]
    fn sums_across_stops_before_rounding() {
        // 42 kWh at 50 kW (50.4 min) plus 42 kWh at 100 kW (25.2 min):
        // 75.6 min total rounds to 76, not 50 + 25.
        let stops = [stop(50.0), stop(100.0)];
        assert_eq!(total_charging_minutes(&stops, 60.0, soc(80.0, 20.0, 90.0)), 76);
    }

    #[test]
    fn zero_power_contributes_nothing() {
        let stops = [stop(0.0), stop(-5.0)];
        assert_eq!(total_charging_minutes(&stops, 60.0, soc(80.0, 20.0, 90.0)), 0);
        assert_eq!(stop_charge_hours(&stop(0.0), 60.0, soc(80.0, 20.0, 90.0)), 0.0);
    }

    #[test]
    fn no_stops_means_zero_minutes() {
        assert_eq!(total_charging_minutes(&[], 60.0, soc(80.0, 20.0, 90.0)), 0);
    }
}
