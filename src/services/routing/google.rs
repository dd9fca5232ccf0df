//! Google Distance Matrix client
//!
//! API documentation:
//! https://developers.google.com/maps/documentation/distance-matrix/distance-matrix

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{DistanceProvider, DistanceResponse, PairDistance};
use crate::types::Coordinates;

pub const DEFAULT_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

const STATUS_OK: &str = "OK";

/// Google accepts at most 100 elements (origins × destinations) per request,
/// so a square query covers at most 10 locations.
pub const MAX_LOCATIONS_PER_REQUEST: usize = 10;

/// Google Distance Matrix client configuration
#[derive(Debug, Clone)]
pub struct GoogleDistanceMatrixConfig {
    /// Endpoint URL
    pub base_url: String,
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl GoogleDistanceMatrixConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_DISTANCE_MATRIX_URL.to_string(),
            api_key: api_key.into(),
            timeout_seconds: crate::defaults::DEFAULT_PROVIDER_TIMEOUT_SECONDS,
        }
    }
}

/// Live distance provider backed by Google Maps
pub struct GoogleDistanceMatrixClient {
    client: Client,
    config: GoogleDistanceMatrixConfig,
}

impl GoogleDistanceMatrixClient {
    pub fn new(config: GoogleDistanceMatrixConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Query parameters for a square origins × destinations request
    fn build_query(&self, locations: &[Coordinates]) -> Vec<(&'static str, String)> {
        let joined = locations
            .iter()
            .map(Coordinates::to_query_param)
            .collect::<Vec<_>>()
            .join("|");

        vec![
            ("origins", joined.clone()),
            ("destinations", joined),
            ("mode", "driving".to_string()),
            ("key", self.config.api_key.clone()),
        ]
    }
}

#[async_trait]
impl DistanceProvider for GoogleDistanceMatrixClient {
    async fn query_distances(&self, locations: &[Coordinates]) -> Result<DistanceResponse> {
        debug!("Requesting distance matrix from Google for {} locations", locations.len());

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.build_query(locations))
            .send()
            .await
            .context("Failed to send request to Google Distance Matrix")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google Distance Matrix returned HTTP {}: {}", status, body);
        }

        let matrix_response: MatrixResponse = response
            .json()
            .await
            .context("Failed to parse Google Distance Matrix response")?;

        Ok(matrix_response.into_distance_response())
    }

    fn name(&self) -> &str {
        "GoogleDistanceMatrix"
    }

    fn max_locations(&self) -> Option<usize> {
        Some(MAX_LOCATIONS_PER_REQUEST)
    }
}

// Google API types

#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    #[serde(default)]
    distance: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    /// Meters for distances
    value: f64,
}

impl MatrixResponse {
    fn into_distance_response(self) -> DistanceResponse {
        if self.status != STATUS_OK {
            return DistanceResponse::failed(self.status, self.error_message);
        }

        let rows = self
            .rows
            .into_iter()
            .map(|row| row.elements.into_iter().map(MatrixElement::into_pair).collect())
            .collect();

        DistanceResponse::ok(rows)
    }
}

impl MatrixElement {
    fn into_pair(self) -> PairDistance {
        if self.status != STATUS_OK {
            return PairDistance::Failed { status: self.status };
        }
        match self.distance {
            Some(distance) => PairDistance::Ok { meters: distance.value },
            None => PairDistance::Failed {
                status: "MISSING_DISTANCE".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::routing::BatchStatus;

    fn client() -> GoogleDistanceMatrixClient {
        GoogleDistanceMatrixClient::new(GoogleDistanceMatrixConfig::new("test-key")).unwrap()
    }

    #[test]
    fn test_config_default_url() {
        let config = GoogleDistanceMatrixConfig::new("k");
        assert_eq!(config.base_url, DEFAULT_DISTANCE_MATRIX_URL);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_build_query() {
        let locations = vec![
            Coordinates { lat: -33.45, lng: -70.66 },
            Coordinates { lat: -33.04, lng: -71.61 },
        ];

        let query = client().build_query(&locations);

        assert_eq!(query[0], ("origins", "-33.45,-70.66|-33.04,-71.61".to_string()));
        assert_eq!(query[0].1, query[1].1);
        assert_eq!(query[2], ("mode", "driving".to_string()));
        assert_eq!(query[3], ("key", "test-key".to_string()));
    }

    #[test]
    fn test_parse_ok_response_with_failed_element() {
        let json = r#"{
            "status": "OK",
            "origin_addresses": ["A", "B"],
            "destination_addresses": ["A", "B"],
            "rows": [
                {"elements": [
                    {"status": "OK", "distance": {"text": "1 m", "value": 0},
                     "duration": {"text": "1 min", "value": 0}},
                    {"status": "OK", "distance": {"text": "12.3 km", "value": 12300},
                     "duration": {"text": "20 mins", "value": 1200}}
                ]},
                {"elements": [
                    {"status": "ZERO_RESULTS"},
                    {"status": "OK", "distance": {"text": "1 m", "value": 0},
                     "duration": {"text": "1 min", "value": 0}}
                ]}
            ]
        }"#;

        let parsed: MatrixResponse = serde_json::from_str(json).unwrap();
        let response = parsed.into_distance_response();

        assert_eq!(response.status, BatchStatus::Ok);
        assert_eq!(response.rows[0][1], PairDistance::Ok { meters: 12300.0 });
        assert_eq!(
            response.rows[1][0],
            PairDistance::Failed { status: "ZERO_RESULTS".to_string() }
        );
    }

    #[test]
    fn test_parse_denied_response() {
        let json = r#"{
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "rows": []
        }"#;

        let parsed: MatrixResponse = serde_json::from_str(json).unwrap();
        let response = parsed.into_distance_response();

        assert_eq!(
            response.status,
            BatchStatus::Failed {
                status: "REQUEST_DENIED".to_string(),
                message: Some("The provided API key is invalid.".to_string()),
            }
        );
    }

    #[test]
    fn test_ok_element_without_distance_is_failed() {
        let element = MatrixElement { status: "OK".to_string(), distance: None };
        assert!(matches!(element.into_pair(), PairDistance::Failed { .. }));
    }

    #[test]
    fn test_client_name() {
        assert_eq!(client().name(), "GoogleDistanceMatrix");
    }

    #[test]
    fn test_square_query_stays_within_element_limit() {
        let cap = client().max_locations().unwrap();
        assert_eq!(cap, 10);
        assert!(cap * cap <= 100);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        // Bind an ephemeral port, then release it so connections are refused
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = GoogleDistanceMatrixConfig {
            base_url: format!("http://127.0.0.1:{}/distancematrix/json", port),
            api_key: "k".to_string(),
            timeout_seconds: 2,
        };
        let client = GoogleDistanceMatrixClient::new(config).unwrap();

        let result = client
            .query_distances(&[Coordinates { lat: 0.0, lng: 0.0 }])
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore = "Requires GOOGLE_MAPS_API_KEY and network access"]
    async fn test_google_integration_santiago_valparaiso() {
        let api_key = std::env::var("GOOGLE_MAPS_API_KEY").unwrap();
        let client =
            GoogleDistanceMatrixClient::new(GoogleDistanceMatrixConfig::new(api_key)).unwrap();

        let locations = vec![
            Coordinates { lat: -33.4489, lng: -70.6693 }, // Santiago
            Coordinates { lat: -33.0472, lng: -71.6127 }, // Valparaíso
        ];

        let response = client.query_distances(&locations).await.unwrap();
        assert_eq!(response.status, BatchStatus::Ok);

        // ~116 km by road
        let PairDistance::Ok { meters } = response.rows[0][1] else {
            panic!("expected a route between Santiago and Valparaíso");
        };
        let km = meters / 1000.0;
        assert!(km > 100.0 && km < 140.0, "Expected ~116 km, got {} km", km);
    }
}
