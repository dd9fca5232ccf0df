//! Route types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Coordinates, DeliveryPoint, Measure};

/// Visiting order produced by the solver.
///
/// `route` holds matrix indices: start anchor, every delivery index once,
/// end anchor (the start again for a closed loop).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedRoute {
    pub route: Vec<usize>,
    pub total_distance: Measure,
    /// Number of permutations scored
    pub candidates_evaluated: u64,
}

impl SolvedRoute {
    /// Result for "nothing to optimize": no route, zero distance
    pub fn empty() -> Self {
        Self {
            route: vec![],
            total_distance: Measure::ZERO,
            candidates_evaluated: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// False when no permutation avoids an unreachable segment
    pub fn is_feasible(&self) -> bool {
        !self.total_distance.is_unreachable()
    }

    /// Indices between the start and end anchors
    pub fn interior(&self) -> &[usize] {
        match self.route.len() {
            0..=2 => &[],
            n => &self.route[1..n - 1],
        }
    }
}

/// Fuel figures derived from a route distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    pub fuel_liters: Measure,
    pub fuel_cost: Measure,
}

impl CostResult {
    pub fn zero() -> Self {
        Self {
            fuel_liters: Measure::ZERO,
            fuel_cost: Measure::ZERO,
        }
    }
}

/// Vehicle and fuel parameters for cost estimation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelSettings {
    pub efficiency_km_per_liter: f64,
    pub price_per_liter: f64,
}

impl Default for FuelSettings {
    fn default() -> Self {
        Self {
            efficiency_km_per_liter: crate::defaults::DEFAULT_EFFICIENCY_KM_PER_LITER,
            price_per_liter: crate::defaults::DEFAULT_FUEL_PRICE_PER_LITER,
        }
    }
}

/// Rank computed for one delivery point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankAssignment {
    /// Position of the point in the request's point list
    pub list_position: usize,
    pub point_id: Uuid,
    /// 1-based visiting rank
    pub rank: u32,
}

/// Warning about route issues
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteWarning {
    pub warning_type: String,
    pub message: String,
}

impl RouteWarning {
    pub fn new(warning_type: &str, message: impl Into<String>) -> Self {
        Self {
            warning_type: warning_type.to_string(),
            message: message.into(),
        }
    }
}

/// Request to plan a delivery route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Where the vehicle starts
    pub origin: Coordinates,
    /// Points to visit, in stored order
    pub points: Vec<DeliveryPoint>,
    /// Fixed end of an open path; `None` returns to the origin
    #[serde(default)]
    pub destination: Option<Coordinates>,
    /// Overrides the planner's fuel defaults
    #[serde(default)]
    pub fuel: Option<FuelSettings>,
}

/// Outcome of route planning
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    /// Matrix indices in visiting order (empty when there was nothing to plan)
    pub route: Vec<usize>,
    /// Total distance in kilometers
    pub total_distance_km: Measure,
    pub cost: CostResult,
    /// Fuel parameters the cost was computed with
    pub fuel: FuelSettings,
    /// Ranks to persist, ordered by rank
    pub ranks: Vec<RankAssignment>,
    /// Algorithm used for optimization
    pub algorithm: String,
    /// Number of permutations scored
    pub candidates_evaluated: u64,
    /// Solver runtime in milliseconds
    pub solve_time_ms: u64,
    pub warnings: Vec<RouteWarning>,
}

impl RoutePlan {
    pub fn is_feasible(&self) -> bool {
        !self.total_distance_km.is_unreachable()
    }
}
