//! Fuel consumption and cost derived from route distance
//!
//! No rounding happens here; presentation rounds.

use crate::error::{ensure_finite, PlannerError, PlannerResult};
use crate::types::{CostResult, FuelSettings, Measure};

/// Liters needed to drive `distance_km` at `efficiency_km_per_liter`.
///
/// Unreachable distance gives unreachable liters. Efficiency must be a
/// positive finite number.
pub fn fuel_liters(distance_km: Measure, efficiency_km_per_liter: f64) -> PlannerResult<Measure> {
    validate_efficiency(efficiency_km_per_liter)?;
    Ok(distance_km.map(|km| km / efficiency_km_per_liter))
}

/// Cost of `liters` at `unit_price` per liter; unreachable propagates.
pub fn fuel_cost(liters: Measure, unit_price: f64) -> PlannerResult<Measure> {
    validate_price(unit_price)?;
    Ok(liters.map(|l| l * unit_price))
}

/// Liters and cost for a route distance
pub fn estimate(distance_km: Measure, fuel: &FuelSettings) -> PlannerResult<CostResult> {
    let fuel_liters = fuel_liters(distance_km, fuel.efficiency_km_per_liter)?;
    let fuel_cost = fuel_cost(fuel_liters, fuel.price_per_liter)?;
    Ok(CostResult { fuel_liters, fuel_cost })
}

impl FuelSettings {
    /// Check both parameters before any computation
    pub fn validate(&self) -> PlannerResult<()> {
        validate_efficiency(self.efficiency_km_per_liter)?;
        validate_price(self.price_per_liter)
    }
}

fn validate_efficiency(efficiency_km_per_liter: f64) -> PlannerResult<()> {
    ensure_finite(efficiency_km_per_liter, "vehicle efficiency")?;
    if efficiency_km_per_liter <= 0.0 {
        return Err(PlannerError::InvalidNumeric(format!(
            "vehicle efficiency must be positive, got {} km/L",
            efficiency_km_per_liter
        )));
    }
    Ok(())
}

fn validate_price(unit_price: f64) -> PlannerResult<()> {
    ensure_finite(unit_price, "fuel price")?;
    if unit_price < 0.0 {
        return Err(PlannerError::InvalidNumeric(format!(
            "fuel price must not be negative, got {}",
            unit_price
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_fuel_liters() {
        assert_eq!(fuel_liters(Measure::Known(120.0), 12.0).unwrap(), Measure::Known(10.0));
        assert_eq!(fuel_liters(Measure::ZERO, 12.0).unwrap(), Measure::ZERO);
    }

    #[test]
    fn test_fuel_liters_unreachable() {
        assert_eq!(fuel_liters(Measure::Unreachable, 12.0).unwrap(), Measure::Unreachable);
    }

    #[test]
    fn test_fuel_cost() {
        assert_eq!(fuel_cost(Measure::Known(10.0), 1250.0).unwrap(), Measure::Known(12500.0));
        assert_eq!(fuel_cost(Measure::Unreachable, 1250.0).unwrap(), Measure::Unreachable);
    }

    #[test]
    fn test_rejects_bad_efficiency() {
        assert_err!(fuel_liters(Measure::Known(10.0), 0.0));
        assert_err!(fuel_liters(Measure::Known(10.0), -3.0));
        assert_err!(fuel_liters(Measure::Known(10.0), f64::NAN));
        // Checked even when the distance is unreachable
        assert_err!(fuel_liters(Measure::Unreachable, f64::INFINITY));
    }

    #[test]
    fn test_rejects_bad_price() {
        assert_err!(fuel_cost(Measure::Known(10.0), -1.0));
        assert_err!(fuel_cost(Measure::Known(10.0), f64::NAN));
        assert_ok!(fuel_cost(Measure::Known(10.0), 0.0));
    }

    #[test]
    fn test_estimate_with_defaults() {
        let cost = estimate(Measure::Known(120.0), &FuelSettings::default()).unwrap();

        assert_eq!(cost.fuel_liters, Measure::Known(10.0));
        assert_eq!(cost.fuel_cost, Measure::Known(12500.0));
    }

    #[test]
    fn test_estimate_custom_efficiency_not_rounded() {
        let fuel = FuelSettings {
            efficiency_km_per_liter: 9.0,
            price_per_liter: 1000.0,
        };
        let cost = estimate(Measure::Known(10.0), &fuel).unwrap();

        let liters = cost.fuel_liters.known().unwrap();
        assert!((liters - 10.0 / 9.0).abs() < 1e-12);
        assert!((cost.fuel_cost.known().unwrap() - 10_000.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_unreachable() {
        let cost = estimate(Measure::Unreachable, &FuelSettings::default()).unwrap();
        assert!(cost.fuel_liters.is_unreachable());
        assert!(cost.fuel_cost.is_unreachable());
    }

    #[test]
    fn test_fuel_settings_validate() {
        assert_ok!(FuelSettings::default().validate());
        let bad = FuelSettings {
            efficiency_km_per_liter: 0.0,
            ..FuelSettings::default()
        };
        assert!(matches!(bad.validate(), Err(PlannerError::InvalidNumeric(_))));
    }
}
