//! Distance providers for matrix calculations
//!
//! Uses the Google Distance Matrix API for production, a fixed fixture for
//! tests and a straight-line estimate when no API key is configured.

mod fixture;
mod google;

pub use fixture::FixtureProvider;
pub use google::{
    GoogleDistanceMatrixClient, GoogleDistanceMatrixConfig, DEFAULT_DISTANCE_MATRIX_URL,
};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::Config;
use crate::types::Coordinates;

/// Outcome of a whole distance query
#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatus {
    Ok,
    /// Provider answered but rejected the batch (e.g. `REQUEST_DENIED`)
    Failed {
        status: String,
        message: Option<String>,
    },
}

/// Outcome of a single origin → destination pair
#[derive(Debug, Clone, PartialEq)]
pub enum PairDistance {
    Ok { meters: f64 },
    /// No route for this pair (e.g. `ZERO_RESULTS`, `NOT_FOUND`)
    Failed { status: String },
}

/// Provider answer: `rows[i][j]` is the pair from location i to location j
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceResponse {
    pub status: BatchStatus,
    pub rows: Vec<Vec<PairDistance>>,
}

impl DistanceResponse {
    /// Successful response with the given rows
    pub fn ok(rows: Vec<Vec<PairDistance>>) -> Self {
        Self {
            status: BatchStatus::Ok,
            rows,
        }
    }

    /// Response whose top-level status is not a success
    pub fn failed(status: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: BatchStatus::Failed {
                status: status.into(),
                message,
            },
            rows: vec![],
        }
    }
}

/// Distance provider trait for abstraction (Google, fixture, estimate)
#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Query distances between every ordered pair of `locations`.
    /// The list is used both as origins and as destinations.
    async fn query_distances(&self, locations: &[Coordinates]) -> Result<DistanceResponse>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Largest location list a single query accepts, if the provider caps it
    fn max_locations(&self) -> Option<usize> {
        None
    }
}

/// Offline provider: Haversine distance × road coefficient.
/// Never reports unreachable pairs.
pub struct EstimateProvider {
    /// Coefficient for converting straight-line to road distance (default: 1.3)
    road_coefficient: f64,
}

impl Default for EstimateProvider {
    fn default() -> Self {
        Self {
            road_coefficient: crate::services::geo::ROAD_COEFFICIENT,
        }
    }
}

impl EstimateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_road_coefficient(road_coefficient: f64) -> Self {
        Self { road_coefficient }
    }
}

#[async_trait]
impl DistanceProvider for EstimateProvider {
    async fn query_distances(&self, locations: &[Coordinates]) -> Result<DistanceResponse> {
        use crate::services::geo::haversine_distance;

        let rows = locations
            .iter()
            .map(|from| {
                locations
                    .iter()
                    .map(|to| PairDistance::Ok {
                        meters: haversine_distance(from, to) * self.road_coefficient * 1000.0,
                    })
                    .collect()
            })
            .collect();

        Ok(DistanceResponse::ok(rows))
    }

    fn name(&self) -> &str {
        "Estimate"
    }
}

/// Create distance provider based on configuration.
///
/// Uses Google when an API key is configured, otherwise falls back to the
/// straight-line estimate.
pub fn create_distance_provider(config: &Config) -> Result<Arc<dyn DistanceProvider>> {
    match &config.google_maps_api_key {
        Some(api_key) => {
            let provider_config = GoogleDistanceMatrixConfig {
                base_url: config.distance_matrix_url.clone(),
                api_key: api_key.clone(),
                timeout_seconds: config.provider_timeout_seconds,
            };
            info!("Using Google Distance Matrix at {}", config.distance_matrix_url);
            Ok(Arc::new(GoogleDistanceMatrixClient::new(provider_config)?))
        }
        None => {
            warn!("GOOGLE_MAPS_API_KEY not set, using straight-line distance estimates");
            Ok(Arc::new(EstimateProvider::new()))
        }
    }
}
