//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{SocWindow, Vehicle};
use crate::itinerary::ItineraryPlan;
use crate::planner::{RechargeStop, stop_charge_hours};

/// A geographic position in request/response payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinateDto {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,
}

/// Request to plan an itinerary.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryRequest {
    /// Catalog id of the vehicle
    pub vehicle_id: String,

    /// SOC at departure, percent
    pub soc_start: f64,

    /// SOC floor, percent
    pub soc_min: f64,

    /// SOC ceiling after each recharge, percent
    pub soc_max: f64,

    /// Departure point
    pub departure: CoordinateDto,

    /// Arrival point
    pub arrival: CoordinateDto,
}

/// A planned recharge stop.
#[derive(Debug, Serialize)]
pub struct RechargeStopResult {
    /// Station dataset id
    pub station_id: String,

    /// Station position
    pub position: CoordinateDto,

    /// Rated power in kW
    pub power_kw: f64,

    /// Position along the route, km
    pub distance_along_route_km: f64,

    /// Time spent charging at this stop, minutes
    pub charging_time_minutes: u64,

    /// Operating company, when known
    pub operator: Option<String>,

    /// Street address, when known
    pub address: Option<String>,
}

impl RechargeStopResult {
    /// Build the response view of a stop.
    pub fn from_stop(stop: &RechargeStop, battery_kwh: f64, soc: SocWindow) -> Self {
        let hours = stop_charge_hours(stop, battery_kwh, soc);
        Self {
            station_id: stop.station.id.to_string(),
            position: CoordinateDto {
                lat: stop.station.position.lat(),
                lon: stop.station.position.lon(),
            },
            power_kw: stop.station.power_kw,
            distance_along_route_km: stop.distance_km,
            charging_time_minutes: (hours * 60.0).round() as u64,
            operator: stop.station.operator.clone(),
            address: stop.station.address.clone(),
        }
    }
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct PlanItineraryResponse {
    /// The route polyline
    pub route: Vec<CoordinateDto>,

    /// Recharge stops, ordered along the route
    pub recharge_stops: Vec<RechargeStopResult>,

    /// Total charging time, minutes
    pub total_charging_time_minutes: u64,
}

impl PlanItineraryResponse {
    /// Build the response view of a plan.
    pub fn from_plan(plan: &ItineraryPlan, soc: SocWindow) -> Self {
        Self {
            route: plan
                .route
                .coords()
                .iter()
                .map(|c| CoordinateDto {
                    lat: c.lat(),
                    lon: c.lon(),
                })
                .collect(),
            recharge_stops: plan
                .stops
                .iter()
                .map(|stop| RechargeStopResult::from_stop(stop, plan.vehicle.battery_kwh, soc))
                .collect(),
            total_charging_time_minutes: plan.total_charging_minutes,
        }
    }
}

/// A vehicle in the catalog listing.
#[derive(Debug, Serialize)]
pub struct VehicleResult {
    /// Catalog id
    pub id: String,

    /// Manufacturer name
    pub make: String,

    /// Model name
    pub model: String,

    /// Maximum charging power, kW
    pub max_power_kw: f64,

    /// Usable battery capacity, kWh
    pub battery_kwh: f64,

    /// Best-case range, km
    pub range_best_km: f64,

    /// Worst-case range, km
    pub range_worst_km: f64,
}

impl VehicleResult {
    /// Build the response view of a vehicle.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            max_power_kw: vehicle.max_power_kw,
            battery_kwh: vehicle.battery_kwh,
            range_best_km: vehicle.range_best_km,
            range_worst_km: vehicle.range_worst_km,
        }
    }
}

/// Response for the vehicle listing.
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    /// All vehicles in the catalog
    pub vehicles: Vec<VehicleResult>,
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChargingStation, Coordinate, StationId};

    #[test]
    fn stop_result_carries_per_stop_minutes() {
        let stop = RechargeStop {
            station: ChargingStation {
                id: StationId::parse("FR1").unwrap(),
                position: Coordinate::new(48.0, 2.0).unwrap(),
                power_kw: 50.0,
                operator: Some("Op".into()),
                address: None,
                connector: None,
            },
            distance_km: 150.0,
        };
        let soc = SocWindow::new(80.0, 20.0, 90.0).unwrap();

        let result = RechargeStopResult::from_stop(&stop, 60.0, soc);
        assert_eq!(result.station_id, "FR1");
        // 42 kWh at 50 kW is 50.4 minutes, rounds to 50.
        assert_eq!(result.charging_time_minutes, 50);
        assert_eq!(result.distance_along_route_km, 150.0);
        assert_eq!(result.operator.as_deref(), Some("Op"));
    }

    #[test]
    fn request_deserializes_from_json() {
        let json = r#"{
            "vehicle_id": "ev-1",
            "soc_start": 80.0,
            "soc_min": 20.0,
            "soc_max": 90.0,
            "departure": { "lat": 48.85, "lon": 2.35 },
            "arrival": { "lat": 45.76, "lon": 4.83 }
        }"#;
        let request: PlanItineraryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.vehicle_id, "ev-1");
        assert_eq!(request.departure.lat, 48.85);
        assert_eq!(request.arrival.lon, 4.83);
    }
}
