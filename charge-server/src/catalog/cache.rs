//! Caching layer for the vehicle catalog.
//!
//! The catalog changes rarely and the list is small, so the whole list
//! is cached under a single key with a TTL. The cache is an explicit
//! component with a get-or-refresh contract; nothing else in the
//! service holds cross-request state.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Vehicle;

use super::client::CatalogClient;
use super::error::CatalogError;

/// Configuration for the catalog cache.
#[derive(Debug, Clone)]
pub struct CatalogCacheConfig {
    /// TTL for the cached vehicle list.
    pub ttl: Duration,
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
        }
    }
}

/// Vehicle lookup capability consumed by the itinerary service.
#[async_trait::async_trait]
pub trait VehicleCatalog: Send + Sync {
    /// Resolve a vehicle by catalog id.
    async fn vehicle_by_id(&self, id: &str) -> Result<Vehicle, CatalogError>;
}

#[async_trait::async_trait]
impl<T: VehicleCatalog + ?Sized> VehicleCatalog for Arc<T> {
    async fn vehicle_by_id(&self, id: &str) -> Result<Vehicle, CatalogError> {
        (**self).vehicle_by_id(id).await
    }
}

/// Vehicle catalog client with caching.
pub struct CachedVehicleCatalog {
    client: CatalogClient,
    cache: MokaCache<(), Arc<Vec<Vehicle>>>,
}

impl CachedVehicleCatalog {
    /// Create a new cached catalog.
    pub fn new(client: CatalogClient, config: &CatalogCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();
        Self { client, cache }
    }

    /// Return the cached vehicle list, fetching it if absent or expired.
    ///
    /// On fetch failure nothing is cached and the error is returned; a
    /// previously cached list keeps serving until its TTL expires.
    pub async fn get_or_refresh(&self) -> Result<Arc<Vec<Vehicle>>, CatalogError> {
        if let Some(vehicles) = self.cache.get(&()).await {
            return Ok(vehicles);
        }

        let vehicles = Arc::new(self.client.fetch_all().await?);
        self.cache.insert((), vehicles.clone()).await;
        Ok(vehicles)
    }

    /// Drop the cached list, forcing the next call to refetch.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait::async_trait]
impl VehicleCatalog for CachedVehicleCatalog {
    async fn vehicle_by_id(&self, id: &str) -> Result<Vehicle, CatalogError> {
        let vehicles = self.get_or_refresh().await?;
        vehicles
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::client::CatalogClientConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn list_body() -> serde_json::Value {
        json!({
            "data": { "vehicleList": [{
                "id": "ev-1",
                "naming": { "make": "Example", "model": "Runner" },
                "connectors": [{ "max_electric_power": 150.0 }],
                "battery": { "usable_kwh": 60.0 },
                "range": { "chargetrip_range": { "best": 350.0, "worst": 250.0 } }
            }]}
        })
    }

    fn cached_catalog(server: &MockServer) -> CachedVehicleCatalog {
        let config = CatalogClientConfig::new("cid", "aid")
            .with_base_url(format!("{}/graphql", server.base_url()));
        let client = CatalogClient::new(config).unwrap();
        CachedVehicleCatalog::new(client, &CatalogCacheConfig::default())
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(list_body());
            })
            .await;

        let catalog = cached_catalog(&server);
        let first = catalog.get_or_refresh().await.unwrap();
        let second = catalog.get_or_refresh().await.unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(list_body());
            })
            .await;

        let catalog = cached_catalog(&server);
        catalog.get_or_refresh().await.unwrap();
        catalog.invalidate();
        catalog.get_or_refresh().await.unwrap();

        mock.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn vehicle_by_id_resolves_and_misses() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(list_body());
            })
            .await;

        let catalog = cached_catalog(&server);
        let vehicle = catalog.vehicle_by_id("ev-1").await.unwrap();
        assert_eq!(vehicle.max_power_kw, 150.0);

        let err = catalog.vehicle_by_id("missing").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn fetch_failure_is_not_cached() {
        let server = MockServer::start_async().await;
        let failing = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(500).body("boom");
            })
            .await;

        let catalog = cached_catalog(&server);
        assert!(catalog.get_or_refresh().await.is_err());

        failing.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(list_body());
            })
            .await;

        // The failed fetch left nothing behind; the retry succeeds.
        assert_eq!(catalog.get_or_refresh().await.unwrap().len(), 1);
    }
}
