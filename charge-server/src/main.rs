use std::net::SocketAddr;
use std::sync::Arc;

use charge_server::catalog::{
    CachedVehicleCatalog, CatalogCacheConfig, CatalogClient, CatalogClientConfig,
};
use charge_server::corridor::CorridorConfig;
use charge_server::directions::{DirectionsClient, DirectionsConfig};
use charge_server::itinerary::ItineraryService;
use charge_server::planner::PlannerConfig;
use charge_server::stations::{StationApiClient, StationClientConfig};
use charge_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("charge_server=info")),
        )
        .init();

    // Get credentials from environment
    let ors_api_key = std::env::var("ORS_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: ORS_API_KEY not set. Directions calls will fail.");
        String::new()
    });
    let chargetrip_client_id = std::env::var("CHARGETRIP_CLIENT_ID").unwrap_or_else(|_| {
        eprintln!("Warning: CHARGETRIP_CLIENT_ID not set. Catalog calls will fail.");
        String::new()
    });
    let chargetrip_app_id = std::env::var("CHARGETRIP_APP_ID").unwrap_or_else(|_| {
        eprintln!("Warning: CHARGETRIP_APP_ID not set. Catalog calls will fail.");
        String::new()
    });

    // Create provider clients
    let directions = DirectionsClient::new(DirectionsConfig::new(&ors_api_key))
        .expect("Failed to create directions client");
    let stations = StationApiClient::new(StationClientConfig::default())
        .expect("Failed to create station client");
    let catalog_client =
        CatalogClient::new(CatalogClientConfig::new(&chargetrip_client_id, &chargetrip_app_id))
            .expect("Failed to create catalog client");
    let catalog = Arc::new(CachedVehicleCatalog::new(
        catalog_client,
        &CatalogCacheConfig::default(),
    ));

    // Build the planning service
    let service = ItineraryService::new(
        directions,
        stations,
        catalog.clone(),
        CorridorConfig::default(),
        PlannerConfig::default(),
    );

    // Build app state and router
    let state = AppState::new(service, catalog);
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 8000));
    println!("Charge-stop planner listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health            - Health check");
    println!("  GET  /api/v1/vehicles   - List vehicles");
    println!("  POST /api/v1/itinerary  - Plan an itinerary with recharge stops");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
