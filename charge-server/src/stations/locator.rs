//! Corridor-wide station search.

use std::collections::HashSet;

use futures::future::try_join_all;
use geo::Polygon;
use tracing::debug;
use wkt::ToWkt;

use crate::corridor::Corridor;
use crate::domain::ChargingStation;

use super::error::ProviderError;

/// One page of station query results.
#[derive(Debug, Clone)]
pub struct StationPage {
    /// Stations on this page, already validated
    pub stations: Vec<ChargingStation>,

    /// Total matching records reported by the provider for this query
    pub total_count: u64,
}

/// A paginated spatial station query capability.
///
/// Semantics: return stations whose position lies within the polygon and
/// whose rated power does not exceed `max_power_kw`, `limit` at a time
/// starting at `offset`. This abstraction allows the locator to be
/// tested with mock data.
#[async_trait::async_trait]
pub trait StationQueryProvider: Send + Sync {
    async fn query(
        &self,
        polygon_wkt: &str,
        max_power_kw: f64,
        limit: u32,
        offset: u32,
    ) -> Result<StationPage, ProviderError>;
}

/// Finds all candidate stations along a corridor.
#[derive(Debug, Clone)]
pub struct StationLocator {
    page_size: u32,
}

impl StationLocator {
    /// Create a locator with the given page size.
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }

    /// Query every corridor cell and merge the results.
    ///
    /// Cells are independent, so their paginated fetches run
    /// concurrently; the merge and deduplication happen in a single pass
    /// after all fetches complete. The first occurrence of a station id
    /// wins. Any failed query fails the whole search.
    pub async fn find_in_corridor<P: StationQueryProvider>(
        &self,
        provider: &P,
        corridor: &Corridor,
        max_power_kw: f64,
    ) -> Result<Vec<ChargingStation>, ProviderError> {
        let fetches = corridor
            .cells
            .iter()
            .map(|cell| self.fetch_cell(provider, cell, max_power_kw));
        let per_cell = try_join_all(fetches).await?;

        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for station in per_cell.into_iter().flatten() {
            if seen.insert(station.id.clone()) {
                unique.push(station);
            }
        }

        debug!(
            cells = corridor.cells.len(),
            stations = unique.len(),
            "station search complete"
        );
        Ok(unique)
    }

    /// Page through one cell until the provider's total count is
    /// exhausted.
    async fn fetch_cell<P: StationQueryProvider>(
        &self,
        provider: &P,
        cell: &Polygon<f64>,
        max_power_kw: f64,
    ) -> Result<Vec<ChargingStation>, ProviderError> {
        let polygon_wkt = cell.wkt_string();

        let mut stations = Vec::new();
        let mut offset = 0u32;
        let mut total_count = 1u64;
        while u64::from(offset) < total_count {
            let page = provider
                .query(&polygon_wkt, max_power_kw, self.page_size, offset)
                .await?;
            total_count = page.total_count;
            if page.stations.is_empty() {
                // The provider overstated total_count; stop paging.
                break;
            }
            stations.extend(page.stations);
            offset += self.page_size;
        }
        Ok(stations)
    }
}
