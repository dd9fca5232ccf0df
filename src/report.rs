//! Presentation of a route plan: rounding and stop listing

use serde::Serialize;

use delivery_planner::types::{DeliveryPoint, Measure, RoutePlan, RouteWarning};

/// A stop in visiting order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStop {
    pub rank: u32,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Plan as printed by the CLI. `null` figures mean no route was found.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub provider: String,
    pub stops: Vec<ReportStop>,
    pub route: Vec<usize>,
    pub total_distance_km: Option<f64>,
    pub fuel_liters: Option<f64>,
    pub fuel_cost: Option<f64>,
    pub efficiency_km_per_liter: f64,
    pub fuel_price_per_liter: f64,
    pub algorithm: String,
    pub solve_time_ms: u64,
    pub warnings: Vec<RouteWarning>,
}

impl PlanReport {
    pub fn new(provider: &str, plan: &RoutePlan, points: &[DeliveryPoint]) -> Self {
        let stops = plan
            .ranks
            .iter()
            .map(|assignment| {
                let point = &points[assignment.list_position];
                ReportStop {
                    rank: assignment.rank,
                    name: point.name.clone(),
                    address: point.address.clone(),
                    lat: point.coordinates.lat,
                    lng: point.coordinates.lng,
                }
            })
            .collect();

        Self {
            provider: provider.to_string(),
            stops,
            route: plan.route.clone(),
            total_distance_km: round(plan.total_distance_km, 2),
            fuel_liters: round(plan.cost.fuel_liters, 2),
            fuel_cost: round(plan.cost.fuel_cost, 0),
            efficiency_km_per_liter: plan.fuel.efficiency_km_per_liter,
            fuel_price_per_liter: plan.fuel.price_per_liter,
            algorithm: plan.algorithm.clone(),
            solve_time_ms: plan.solve_time_ms,
            warnings: plan.warnings.clone(),
        }
    }
}

fn round(value: Measure, decimals: i32) -> Option<f64> {
    let factor = 10_f64.powi(decimals);
    value.known().map(|v| (v * factor).round() / factor)
}
