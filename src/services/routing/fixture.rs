//! Fixed-response distance provider for deterministic tests and offline runs

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use super::{DistanceProvider, DistanceResponse, PairDistance};
use crate::types::{Coordinates, Measure};

/// Status reported for pairs given as unreachable
const UNREACHABLE_STATUS: &str = "ZERO_RESULTS";

enum Outcome {
    Response(DistanceResponse),
    TransportError(String),
}

/// Returns the same answer for every query, whatever the locations.
pub struct FixtureProvider {
    outcome: Outcome,
    calls: AtomicUsize,
    max_locations: Option<usize>,
}

impl FixtureProvider {
    pub fn new(response: DistanceResponse) -> Self {
        Self {
            outcome: Outcome::Response(response),
            calls: AtomicUsize::new(0),
            max_locations: None,
        }
    }

    /// Successful response from a kilometer grid; unreachable cells become
    /// failed pairs.
    pub fn from_km(rows: &[Vec<Measure>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Measure::Known(km) => PairDistance::Ok { meters: km * 1000.0 },
                        Measure::Unreachable => PairDistance::Failed {
                            status: UNREACHABLE_STATUS.to_string(),
                        },
                    })
                    .collect()
            })
            .collect();

        Self::new(DistanceResponse::ok(rows))
    }

    /// Response whose top-level status is a failure
    pub fn failing_status(status: &str, message: Option<&str>) -> Self {
        Self::new(DistanceResponse::failed(status, message.map(str::to_string)))
    }

    /// Every query fails as if the network call did
    pub fn transport_error(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::TransportError(message.into()),
            calls: AtomicUsize::new(0),
            max_locations: None,
        }
    }

    /// Report a per-query location cap, like a live provider would
    pub fn with_max_locations(mut self, max_locations: usize) -> Self {
        self.max_locations = Some(max_locations);
        self
    }

    /// Number of queries answered so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceProvider for FixtureProvider {
    async fn query_distances(&self, _locations: &[Coordinates]) -> Result<DistanceResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Response(response) => Ok(response.clone()),
            Outcome::TransportError(message) => anyhow::bail!("{}", message),
        }
    }

    fn name(&self) -> &str {
        "Fixture"
    }

    fn max_locations(&self) -> Option<usize> {
        self.max_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::routing::BatchStatus;

    #[tokio::test]
    async fn test_from_km_converts_to_meters() {
        let provider = FixtureProvider::from_km(&[
            vec![Measure::ZERO, Measure::Known(2.5)],
            vec![Measure::Unreachable, Measure::ZERO],
        ]);

        let response = provider.query_distances(&[]).await.unwrap();

        assert_eq!(response.status, BatchStatus::Ok);
        assert_eq!(response.rows[0][1], PairDistance::Ok { meters: 2500.0 });
        assert_eq!(
            response.rows[1][0],
            PairDistance::Failed { status: "ZERO_RESULTS".to_string() }
        );
    }

    #[tokio::test]
    async fn test_counts_calls() {
        let provider = FixtureProvider::from_km(&[vec![Measure::ZERO]]);
        assert_eq!(provider.calls(), 0);

        provider.query_distances(&[]).await.unwrap();
        provider.query_distances(&[]).await.unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_transport_error() {
        let provider = FixtureProvider::transport_error("connection refused");
        let err = provider.query_distances(&[]).await.unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_status() {
        let provider = FixtureProvider::failing_status("OVER_QUERY_LIMIT", None);
        let response = provider.query_distances(&[]).await.unwrap();

        assert!(matches!(
            response.status,
            BatchStatus::Failed { ref status, message: None } if status == "OVER_QUERY_LIMIT"
        ));
    }
}
