//! Directions HTTP client.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::RouteError;

/// Default base URL for the directions API.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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

/// A driving-route capability.
///
/// This abstraction allows the itinerary service to be tested with mock
/// polylines instead of a live routing engine.
#[async_trait::async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Compute the driving polyline from `start` to `end`, passing
    /// through `via` in order.
    async fn driving_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        via: &[Coordinate],
    ) -> Result<Vec<Coordinate>, RouteError>;
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    /// GeoJSON positions: `[lon, lat]`, possibly with elevation appended.
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

/// Client for the directions API.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectionsClient {
    /// Create a new directions client.
    pub fn new(config: DirectionsConfig) -> Result<Self, RouteError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| RouteError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

#[async_trait::async_trait]
impl DirectionsProvider for DirectionsClient {
    async fn driving_route(
        &self,
        start: Coordinate,
        end: Coordinate,
        via: &[Coordinate],
    ) -> Result<Vec<Coordinate>, RouteError> {
        let mut coordinates: Vec<[f64; 2]> = Vec::with_capacity(via.len() + 2);
        coordinates.push([start.lon(), start.lat()]);
        coordinates.extend(via.iter().map(|w| [w.lon(), w.lat()]));
        coordinates.push([end.lon(), end.lat()]);

        let url = format!("{}/v2/directions/driving-car/geojson", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "coordinates": coordinates }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| RouteError::Payload {
                message: e.to_string(),
            })?;

        let mut polyline = Vec::new();
        for feature in &collection.features {
            if feature.geometry.kind != "LineString" {
                continue;
            }
            for position in &feature.geometry.coordinates {
                // Positions are [lon, lat] with an optional elevation.
                let (Some(&lon), Some(&lat)) = (position.first(), position.get(1)) else {
                    return Err(RouteError::Payload {
                        message: format!("position with {} ordinates", position.len()),
                    });
                };
                let coordinate =
                    Coordinate::new(lat, lon).map_err(|e| RouteError::Payload {
                        message: e.to_string(),
                    })?;
                polyline.push(coordinate);
            }
        }

        if polyline.len() < 2 {
            return Err(RouteError::EmptyRoute);
        }
        Ok(polyline)
    }
}
