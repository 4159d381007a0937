//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::CachedVehicleCatalog;
use crate::directions::DirectionsClient;
use crate::itinerary::ItineraryService;
use crate::stations::StationApiClient;

/// The concrete itinerary service the server runs with.
pub type PlanningService =
    ItineraryService<DirectionsClient, StationApiClient, Arc<CachedVehicleCatalog>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The planning pipeline
    pub service: Arc<PlanningService>,

    /// Vehicle catalog, shared with the service
    pub catalog: Arc<CachedVehicleCatalog>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(service: PlanningService, catalog: Arc<CachedVehicleCatalog>) -> Self {
        Self {
            service: Arc::new(service),
            catalog,
        }
    }
}
