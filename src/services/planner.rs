//! Route planning pipeline
//!
//! validate → size guard → distance matrix (one provider call) → exact
//! search → visiting ranks → fuel cost. The planner keeps no state between
//! calls, so one instance can serve concurrent requests.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{PlannerError, PlannerResult};
use crate::services::routing::DistanceProvider;
use crate::services::{cost, matrix, ranking, tsp};
use crate::types::{CostResult, FuelSettings, Measure, PlanRequest, RoutePlan, RouteWarning};

/// Planner tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerSettings {
    /// Largest number of delivery points accepted for exact search
    pub max_stops: usize,
    /// Fuel parameters used when a request carries none
    pub fuel: FuelSettings,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_stops: tsp::EXACT_SOLVER_STOP_LIMIT,
            fuel: FuelSettings::default(),
        }
    }
}

impl From<&Config> for PlannerSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_stops: config.max_exact_stops,
            fuel: FuelSettings {
                efficiency_km_per_liter: config.vehicle_efficiency_km_per_liter,
                price_per_liter: config.fuel_price_per_liter,
            },
        }
    }
}

/// Plans delivery routes against a distance provider
pub struct RoutePlanner {
    provider: Arc<dyn DistanceProvider>,
    settings: PlannerSettings,
}

impl RoutePlanner {
    pub fn new(provider: Arc<dyn DistanceProvider>, settings: PlannerSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Plan the shortest route through all points of `request`.
    ///
    /// Zero points yields an empty plan without contacting the provider.
    /// Instances above `max_stops` are rejected before the provider call.
    pub async fn plan(&self, request: &PlanRequest) -> PlannerResult<RoutePlan> {
        let fuel = request.fuel.unwrap_or(self.settings.fuel);
        validate_request(request, &fuel)?;

        let delivery_count = request.points.len();
        if delivery_count == 0 {
            debug!("No delivery points, nothing to optimize");
            return Ok(RoutePlan {
                route: vec![],
                total_distance_km: Measure::ZERO,
                cost: CostResult::zero(),
                fuel,
                ranks: vec![],
                algorithm: "none".to_string(),
                candidates_evaluated: 0,
                solve_time_ms: 0,
                warnings: vec![],
            });
        }

        if delivery_count > self.settings.max_stops {
            warn!(
                "Rejecting {} delivery points, exact search limit is {}",
                delivery_count, self.settings.max_stops
            );
            return Err(PlannerError::TooManyStops {
                count: delivery_count,
                limit: self.settings.max_stops,
            });
        }

        // Anchors share the provider's location budget with the points
        if let Some(max_locations) = self.provider.max_locations() {
            let anchors = 1 + usize::from(request.destination.is_some());
            let limit = max_locations.saturating_sub(anchors);
            if delivery_count > limit {
                warn!(
                    "Rejecting {} delivery points, {} accepts {} locations per query",
                    delivery_count,
                    self.provider.name(),
                    max_locations
                );
                return Err(PlannerError::TooManyStops {
                    count: delivery_count,
                    limit,
                });
            }
        }

        let matrix = matrix::build_matrix(
            self.provider.as_ref(),
            request.origin,
            &request.points,
            request.destination,
        )
        .await?;

        let end_index = request.destination.map(|_| delivery_count + 1);
        let started = Instant::now();
        let solved = tsp::solve(Some(&matrix), delivery_count, 0, end_index)?;
        let solve_time_ms = started.elapsed().as_millis() as u64;

        let cost = cost::estimate(solved.total_distance, &fuel)?;
        let ranks = ranking::visiting_ranks(&solved, &request.points);

        let mut warnings = Vec::new();
        let unreachable = matrix.unreachable_pairs();
        if unreachable > 0 {
            warnings.push(RouteWarning::new(
                "UNREACHABLE_PAIRS",
                format!("{} location pairs have no route", unreachable),
            ));
        }
        if !solved.is_feasible() {
            warn!("No feasible route through {} delivery points", delivery_count);
            warnings.push(RouteWarning::new(
                "NO_FEASIBLE_ROUTE",
                "Every visiting order contains an unreachable segment",
            ));
        }

        info!(
            "Planned route through {} points via {}: {} km in {} ms",
            delivery_count,
            self.provider.name(),
            solved.total_distance,
            solve_time_ms
        );

        Ok(RoutePlan {
            route: solved.route,
            total_distance_km: solved.total_distance,
            cost,
            fuel,
            ranks,
            algorithm: tsp::ALGORITHM_NAME.to_string(),
            candidates_evaluated: solved.candidates_evaluated,
            solve_time_ms,
            warnings,
        })
    }
}

/// Reject malformed numbers before any computation
fn validate_request(request: &PlanRequest, fuel: &FuelSettings) -> PlannerResult<()> {
    fuel.validate()?;
    request.origin.validate("origin")?;
    if let Some(destination) = &request.destination {
        destination.validate("destination")?;
    }
    for (i, point) in request.points.iter().enumerate() {
        point.coordinates.validate(&format!("point {} ({})", i, point.name))?;
    }
    Ok(())
}
