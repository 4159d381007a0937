//! Vehicle catalog HTTP client.
//!
//! Fetches the vehicle list from a Chargetrip-compatible GraphQL
//! endpoint. The query pulls only the fields the planner needs; entries
//! missing required numbers are skipped with a warning rather than
//! failing the whole list.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::warn;

use crate::domain::Vehicle;

use super::error::CatalogError;

/// Default base URL for the catalog API.
const DEFAULT_BASE_URL: &str = "https://api.chargetrip.io/graphql";

/// The vehicle list query.
const VEHICLE_LIST_QUERY: &str = "query vehicleList { vehicleList { \
    id naming { make model } \
    connectors { max_electric_power } \
    battery { usable_kwh } \
    range { chargetrip_range { best worst } } } }";

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Client id credential
    pub client_id: String,

    /// Application id credential
    pub app_id: String,

    /// Base URL of the GraphQL endpoint
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogClientConfig {
    /// Create a new config with the given credentials.
    pub fn new(client_id: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            app_id: app_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<VehicleListData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct VehicleListData {
    #[serde(rename = "vehicleList", default)]
    vehicle_list: Vec<VehicleEntry>,
}

#[derive(Debug, Deserialize)]
struct VehicleEntry {
    id: String,
    naming: Option<Naming>,
    #[serde(default)]
    connectors: Vec<Connector>,
    battery: Option<Battery>,
    range: Option<RangeInfo>,
}

#[derive(Debug, Deserialize)]
struct Naming {
    make: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Connector {
    max_electric_power: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Battery {
    usable_kwh: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RangeInfo {
    chargetrip_range: Option<ChargetripRange>,
}

#[derive(Debug, Deserialize)]
struct ChargetripRange {
    best: Option<f64>,
    worst: Option<f64>,
}

/// Client for the vehicle catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        let client_id =
            HeaderValue::from_str(&config.client_id).map_err(|_| CatalogError::Api {
                status: 0,
                message: "Invalid client id format".to_string(),
            })?;
        let app_id = HeaderValue::from_str(&config.app_id).map_err(|_| CatalogError::Api {
            status: 0,
            message: "Invalid app id format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-client-id"), client_id);
        headers.insert(HeaderName::from_static("x-app-id"), app_id);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch the full vehicle list.
    pub async fn fetch_all(&self) -> Result<Vec<Vehicle>, CatalogError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&serde_json::json!({ "query": VEHICLE_LIST_QUERY }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: GraphqlResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Payload {
                message: e.to_string(),
            })?;

        if let Some(errors) = parsed.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CatalogError::Graphql { message });
        }

        let data = parsed.data.ok_or_else(|| CatalogError::Payload {
            message: "response without data".to_string(),
        })?;

        Ok(data
            .vehicle_list
            .into_iter()
            .filter_map(parse_vehicle)
            .collect())
    }
}

/// Validate one catalog entry into a domain vehicle.
fn parse_vehicle(entry: VehicleEntry) -> Option<Vehicle> {
    let max_power_kw = entry
        .connectors
        .iter()
        .filter_map(|c| c.max_electric_power)
        .fold(0.0f64, f64::max);

    let battery_kwh = entry.battery.and_then(|b| b.usable_kwh);
    let range = entry.range.and_then(|r| r.chargetrip_range);
    let (Some(battery_kwh), Some(range)) = (battery_kwh, range) else {
        warn!(vehicle = %entry.id, "catalog entry missing battery or range, skipped");
        return None;
    };
    let (Some(range_best_km), Some(range_worst_km)) = (range.best, range.worst) else {
        warn!(vehicle = %entry.id, "catalog entry missing range bounds, skipped");
        return None;
    };

    let naming = entry.naming.unwrap_or(Naming {
        make: None,
        model: None,
    });

    Some(Vehicle {
        id: entry.id,
        make: naming.make.unwrap_or_default(),
        model: naming.model.unwrap_or_default(),
        max_power_kw,
        battery_kwh,
        range_best_km,
        range_worst_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn entry_json() -> serde_json::Value {
        json!({
            "id": "ev-1",
            "naming": { "make": "Example", "model": "Runner" },
            "connectors": [
                { "max_electric_power": 11.0 },
                { "max_electric_power": 150.0 }
            ],
            "battery": { "usable_kwh": 60.0 },
            "range": { "chargetrip_range": { "best": 350.0, "worst": 250.0 } }
        })
    }

    #[tokio::test]
    async fn fetch_all_parses_vehicles() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({
                    "data": { "vehicleList": [
                        entry_json(),
                        // Missing battery: skipped, not fatal.
                        { "id": "ev-2", "connectors": [] }
                    ]}
                }));
            })
            .await;

        let config = CatalogClientConfig::new("cid", "aid")
            .with_base_url(format!("{}/graphql", server.base_url()));
        let client = CatalogClient::new(config).unwrap();
        let vehicles = client.fetch_all().await.unwrap();

        mock.assert_async().await;
        assert_eq!(vehicles.len(), 1);
        let v = &vehicles[0];
        assert_eq!(v.id, "ev-1");
        assert_eq!(v.make, "Example");
        // Max power is the max over connectors.
        assert_eq!(v.max_power_kw, 150.0);
        assert_eq!(v.average_range_km(), 300.0);
    }

    #[tokio::test]
    async fn graphql_errors_are_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({
                    "errors": [{ "message": "invalid credentials" }]
                }));
            })
            .await;

        let config = CatalogClientConfig::new("cid", "aid")
            .with_base_url(format!("{}/graphql", server.base_url()));
        let client = CatalogClient::new(config).unwrap();
        let err = client.fetch_all().await.unwrap_err();

        match err {
            CatalogError::Graphql { message } => assert_eq!(message, "invalid credentials"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn http_errors_are_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(500).body("boom");
            })
            .await;

        let config = CatalogClientConfig::new("cid", "aid")
            .with_base_url(format!("{}/graphql", server.base_url()));
        let client = CatalogClient::new(config).unwrap();
        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::Api { status: 500, .. }));
    }
}
