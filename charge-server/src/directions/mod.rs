//! Driving directions.
//!
//! HTTP client for an openrouteservice-compatible directions API. The
//! pipeline only needs the route polyline, so the client extracts the
//! coordinate sequence from the GeoJSON response and discards the rest.

mod client;
mod error;

pub use client::{DirectionsClient, DirectionsConfig, DirectionsProvider};
pub use error::RouteError;
