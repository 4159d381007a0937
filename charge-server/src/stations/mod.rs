//! Charging-station discovery.
//!
//! An HTTP client for an Opendatasoft-records-compatible station
//! dataset, and the locator that fans paginated queries out over the
//! corridor cells and merges the results.

mod client;
mod error;
mod locator;

pub use client::{StationApiClient, StationClientConfig};
pub use error::ProviderError;
pub use locator::{StationLocator, StationPage, StationQueryProvider};
