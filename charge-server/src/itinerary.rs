//! Itinerary planning service.
//!
//! Orchestrates the pipeline: resolve the vehicle, fetch the driving
//! route, build the search corridor, locate candidate stations,
//! linear-reference them, run the greedy stop selection, and estimate
//! the total charging time. Every step is fallible and the request
//! aborts on the first failure; nothing is retried here.

use tracing::{debug, info};

use crate::catalog::{CatalogError, VehicleCatalog};
use crate::corridor::{CorridorBuilder, CorridorConfig, GeometryError};
use crate::directions::{DirectionsProvider, RouteError};
use crate::domain::{Coordinate, DomainError, Route, SocWindow, Vehicle};
use crate::planner::{
    PlannerConfig, RechargeStop, SelectionPolicy, Unreachable, locate_along_route,
    plan_recharge_stops, total_charging_minutes,
};
use crate::stations::{ProviderError, StationLocator, StationQueryProvider};

/// A planning request, already validated by the caller.
#[derive(Debug, Clone)]
pub struct ItineraryRequest {
    /// Catalog id of the vehicle
    pub vehicle_id: String,

    /// SOC operating window
    pub soc: SocWindow,

    /// Departure point
    pub departure: Coordinate,

    /// Arrival point
    pub arrival: Coordinate,
}

/// A complete plan: the route plus the stops needed to drive it.
#[derive(Debug, Clone)]
pub struct ItineraryPlan {
    /// The driving route
    pub route: Route,

    /// The vehicle the plan was computed for
    pub vehicle: Vehicle,

    /// Chosen recharge stops, ordered along the route
    pub stops: Vec<RechargeStop>,

    /// Total charging time across all stops, minutes
    pub total_charging_minutes: u64,
}

/// Top-level planning errors.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Vehicle catalog failure (including unknown vehicle ids)
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Directions provider failure
    #[error(transparent)]
    Directions(#[from] RouteError),

    /// Corridor construction failure
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Station provider failure
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// No viable plan exists (business outcome, not a failure)
    #[error(transparent)]
    Unreachable(#[from] Unreachable),

    /// Request precondition failed (degenerate vehicle range, bad route)
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// The itinerary planning service.
///
/// Generic over the three provider contracts so tests can drive the
/// whole pipeline with mock providers.
pub struct ItineraryService<D, S, C> {
    directions: D,
    stations: S,
    catalog: C,
    corridor: CorridorBuilder,
    locator: StationLocator,
    policy: SelectionPolicy,
}

impl<D, S, C> ItineraryService<D, S, C>
where
    D: DirectionsProvider,
    S: StationQueryProvider,
    C: VehicleCatalog,
{
    /// Create a service from providers and configuration.
    pub fn new(
        directions: D,
        stations: S,
        catalog: C,
        corridor_config: CorridorConfig,
        planner_config: PlannerConfig,
    ) -> Self {
        Self {
            directions,
            stations,
            catalog,
            corridor: CorridorBuilder::new(corridor_config),
            locator: StationLocator::new(planner_config.page_size),
            policy: SelectionPolicy::fast_then_any(planner_config.fast_charge_kw),
        }
    }

    /// Plan an itinerary with the recharge stops it needs.
    pub async fn plan(&self, request: &ItineraryRequest) -> Result<ItineraryPlan, PlanError> {
        let vehicle = self.catalog.vehicle_by_id(&request.vehicle_id).await?;
        let soc_per_km = vehicle.soc_per_km()?;

        let polyline = self
            .directions
            .driving_route(request.departure, request.arrival, &[])
            .await?;
        let route = Route::new(polyline)?;
        let total_km = route.total_km();

        info!(vehicle = %vehicle.id, total_km, "planning itinerary");

        // Destination reachable on the starting charge: no station search.
        let unaided_km = (request.soc.start() - request.soc.min()) / soc_per_km;
        if unaided_km >= total_km {
            debug!("destination reachable without recharging");
            return Ok(ItineraryPlan {
                route,
                vehicle,
                stops: Vec::new(),
                total_charging_minutes: 0,
            });
        }

        let corridor = self.corridor.build(route.coords())?;
        let candidates = self
            .locator
            .find_in_corridor(&self.stations, &corridor, vehicle.max_power_kw)
            .await?;
        let located = locate_along_route(route.coords(), candidates);
        let stops = plan_recharge_stops(&located, request.soc, soc_per_km, total_km, &self.policy)?;
        let total_charging_minutes =
            total_charging_minutes(&stops, vehicle.battery_kwh, request.soc);

        info!(
            stops = stops.len(),
            total_charging_minutes, "itinerary planned"
        );

        Ok(ItineraryPlan {
            route,
            vehicle,
            stops,
            total_charging_minutes,
        })
    }
}
