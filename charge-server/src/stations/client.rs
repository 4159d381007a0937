//! Charging-station dataset HTTP client.
//!
//! Talks to an Opendatasoft "explore" records endpoint. Queries are
//! expressed as an ODSQL `where` clause combining a point-in-polygon
//! predicate with a power ceiling and an optional connector-type filter,
//! paginated by offset/limit.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::{ChargingStation, Coordinate, StationId};

use super::error::ProviderError;
use super::locator::{StationPage, StationQueryProvider};

/// Default base URL for the IRVE charging station dataset.
const DEFAULT_BASE_URL: &str =
    "https://odre.opendatasoft.com/api/explore/v2.1/catalog/datasets/bornes-irve";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the station dataset client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Base URL of the dataset (defaults to the public IRVE dataset)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum concurrent requests
    pub max_concurrent: usize,

    /// Connector-type substring filter, e.g. "T2"; `None` disables it
    pub connector_filter: Option<String>,
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            connector_filter: Some("T2".to_string()),
        }
    }
}

impl StationClientConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
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

    /// Set the connector filter, or disable it with `None`.
    pub fn with_connector_filter(mut self, filter: Option<String>) -> Self {
        self.connector_filter = filter;
        self
    }
}

/// One raw record from the dataset.
///
/// The dataset is loosely typed: numeric fields arrive as numbers or as
/// strings depending on the row. Everything is validated exactly once,
/// in [`parse_record`], and the rest of the pipeline only ever sees
/// [`ChargingStation`].
#[derive(Debug, Deserialize)]
struct StationRecord {
    id_station: Option<String>,
    ad_station: Option<String>,
    n_operateur: Option<String>,
    type_prise: Option<String>,
    puiss_max: Option<serde_json::Value>,
    ylatitude: Option<serde_json::Value>,
    xlongitude: Option<serde_json::Value>,
}

/// A page of the records endpoint.
#[derive(Debug, Deserialize)]
struct RecordsPage {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    results: Vec<StationRecord>,
}

/// Client for the station dataset.
#[derive(Debug, Clone)]
pub struct StationApiClient {
    http: reqwest::Client,
    base_url: String,
    connector_filter: Option<String>,
    semaphore: Arc<Semaphore>,
}

impl StationApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StationClientConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            connector_filter: config.connector_filter,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    fn where_clause(&self, polygon_wkt: &str, max_power_kw: f64) -> String {
        let predicate =
            format!("within(geo_point_borne, geom'{polygon_wkt}') AND puiss_max <= {max_power_kw}");
        match &self.connector_filter {
            Some(connector) => format!("type_prise like '*{connector}*' AND {predicate}"),
            None => predicate,
        }
    }
}

#[async_trait::async_trait]
impl StationQueryProvider for StationApiClient {
    async fn query(
        &self,
        polygon_wkt: &str,
        max_power_kw: f64,
        limit: u32,
        offset: u32,
    ) -> Result<StationPage, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "semaphore closed".to_string(),
            })?;

        let url = format!("{}/records", self.base_url);
        let params = [
            ("select", "*".to_string()),
            ("where", self.where_clause(polygon_wkt, max_power_kw)),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];

        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let page: RecordsPage =
            serde_json::from_str(&body).map_err(|e| ProviderError::Payload {
                message: e.to_string(),
            })?;

        Ok(StationPage {
            stations: page.results.into_iter().filter_map(parse_record).collect(),
            total_count: page.total_count,
        })
    }
}

/// Coerce a JSON value that may be a number or a numeric string.
fn lenient_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate one raw record into a typed station.
///
/// Records missing an id or usable coordinates are logged and dropped;
/// they never abort the search. A missing power rating becomes 0 kW,
/// which the planner treats as not chargeable.
fn parse_record(record: StationRecord) -> Option<ChargingStation> {
    let Some(raw_id) = record.id_station.as_deref() else {
        warn!("station record without id_station dropped");
        return None;
    };
    let id = match StationId::parse(raw_id) {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "station record with blank id dropped");
            return None;
        }
    };

    let lat = record.ylatitude.as_ref().and_then(lenient_f64);
    let lon = record.xlongitude.as_ref().and_then(lenient_f64);
    let (Some(lat), Some(lon)) = (lat, lon) else {
        warn!(station = %id, "station record without coordinates dropped");
        return None;
    };
    let position = match Coordinate::new(lat, lon) {
        Ok(position) => position,
        Err(e) => {
            warn!(station = %id, error = %e, "station record with invalid position dropped");
            return None;
        }
    };

    let power_kw = record.puiss_max.as_ref().and_then(lenient_f64).unwrap_or(0.0);

    Some(ChargingStation {
        id,
        position,
        power_kw,
        operator: record.n_operateur,
        address: record.ad_station,
        connector: record.type_prise,
    })
}
