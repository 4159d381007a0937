//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::catalog::CatalogError;
use crate::domain::{Coordinate, SocWindow};
use crate::itinerary::{ItineraryRequest, PlanError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/vehicles", get(list_vehicles))
        .route("/api/v1/itinerary", post(plan_itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the vehicles available for planning.
async fn list_vehicles(State(state): State<AppState>) -> Result<Json<VehicleListResponse>, AppError> {
    let vehicles = state.catalog.get_or_refresh().await?;
    Ok(Json(VehicleListResponse {
        vehicles: vehicles.iter().map(VehicleResult::from_vehicle).collect(),
    }))
}

/// Plan an itinerary with recharge stops.
async fn plan_itinerary(
    State(state): State<AppState>,
    Json(request): Json<PlanItineraryRequest>,
) -> Result<Json<PlanItineraryResponse>, AppError> {
    let soc = SocWindow::new(request.soc_start, request.soc_min, request.soc_max)
        .map_err(bad_request)?;
    let departure =
        Coordinate::new(request.departure.lat, request.departure.lon).map_err(bad_request)?;
    let arrival = Coordinate::new(request.arrival.lat, request.arrival.lon).map_err(bad_request)?;

    let plan = state
        .service
        .plan(&ItineraryRequest {
            vehicle_id: request.vehicle_id,
            soc,
            departure,
            arrival,
        })
        .await?;

    Ok(Json(PlanItineraryResponse::from_plan(&plan, soc)))
}

fn bad_request(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest {
        message: e.to_string(),
    }
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug)]
pub enum AppError {
    /// Request validation failed (400)
    BadRequest { message: String },

    /// Requested vehicle does not exist (404)
    NotFound { message: String },

    /// No viable plan exists: a business outcome, not a failure (422)
    Unreachable { message: String },

    /// An upstream provider failed (502)
    Upstream { message: String },

    /// Anything else (500)
    Internal { message: String },
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => AppError::NotFound {
                message: format!("vehicle not found: {id}"),
            },
            other => AppError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Catalog(inner) => inner.into(),
            PlanError::Unreachable(inner) => AppError::Unreachable {
                message: inner.to_string(),
            },
            PlanError::Directions(inner) => AppError::Upstream {
                message: inner.to_string(),
            },
            PlanError::Provider(inner) => AppError::Upstream {
                message: inner.to_string(),
            },
            PlanError::Domain(inner) => AppError::BadRequest {
                message: inner.to_string(),
            },
            PlanError::Geometry(inner) => AppError::Internal {
                message: inner.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unreachable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
