//! Web layer for the charge-stop planner.
//!
//! Provides the JSON HTTP endpoints for listing vehicles and planning
//! itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, PlanningService};
