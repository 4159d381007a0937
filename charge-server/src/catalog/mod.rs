//! Vehicle catalog.
//!
//! A GraphQL-over-HTTP client for a Chargetrip-compatible vehicle list,
//! and a TTL cache wrapper with an explicit get-or-refresh contract.
//! The cache is the only cross-request state in the service.

mod cache;
mod client;
mod error;

pub use cache::{CachedVehicleCatalog, CatalogCacheConfig, VehicleCatalog};
pub use client::{CatalogClient, CatalogClientConfig};
pub use error::CatalogError;
