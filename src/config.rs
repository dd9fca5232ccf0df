//! Configuration management

use anyhow::{self, Context, Result};

use crate::defaults::{
    DEFAULT_EFFICIENCY_KM_PER_LITER, DEFAULT_FUEL_PRICE_PER_LITER, DEFAULT_MAX_EXACT_STOPS,
    DEFAULT_PROVIDER_TIMEOUT_SECONDS, MAX_EXACT_STOPS_CEILING,
};
use crate::services::routing::DEFAULT_DISTANCE_MATRIX_URL;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Google Maps API key (optional, falls back to straight-line estimates)
    pub google_maps_api_key: Option<String>,

    /// Distance Matrix endpoint URL
    pub distance_matrix_url: String,

    /// Provider request timeout in seconds
    pub provider_timeout_seconds: u64,

    /// Largest number of delivery points accepted for exact search
    pub max_exact_stops: usize,

    /// Default vehicle efficiency (km per liter)
    pub vehicle_efficiency_km_per_liter: f64,

    /// Default fuel price per liter
    pub fuel_price_per_liter: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_maps_api_key: None,
            distance_matrix_url: DEFAULT_DISTANCE_MATRIX_URL.to_string(),
            provider_timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECONDS,
            max_exact_stops: DEFAULT_MAX_EXACT_STOPS,
            vehicle_efficiency_km_per_liter: DEFAULT_EFFICIENCY_KM_PER_LITER,
            fuel_price_per_liter: DEFAULT_FUEL_PRICE_PER_LITER,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let google_maps_api_key =
            lookup("GOOGLE_MAPS_API_KEY").filter(|key| !key.trim().is_empty());

        let distance_matrix_url =
            lookup("DISTANCE_MATRIX_URL").unwrap_or(defaults.distance_matrix_url);

        let provider_timeout_seconds = match lookup("PROVIDER_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .with_context(|| {
                    format!(
                        "PROVIDER_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        value
                    )
                })?,
            None => defaults.provider_timeout_seconds,
        };

        let max_exact_stops = match lookup("MAX_EXACT_STOPS") {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| {
                    format!("MAX_EXACT_STOPS must be a whole number, got {:?}", value)
                })?,
            None => defaults.max_exact_stops,
        };
        if max_exact_stops == 0 || max_exact_stops > MAX_EXACT_STOPS_CEILING {
            anyhow::bail!(
                "MAX_EXACT_STOPS must be between 1 and {} (current: {})",
                MAX_EXACT_STOPS_CEILING,
                max_exact_stops
            );
        }

        let vehicle_efficiency_km_per_liter = parse_positive(
            &lookup,
            "VEHICLE_EFFICIENCY_KM_PER_LITER",
            defaults.vehicle_efficiency_km_per_liter,
        )?;

        let fuel_price_per_liter = match lookup("FUEL_PRICE_PER_LITER") {
            Some(value) => {
                let price: f64 = value
                    .parse::<f64>()
                    .with_context(|| {
                        format!("FUEL_PRICE_PER_LITER must be a number, got {:?}", value)
                    })?;
                if !price.is_finite() || price < 0.0 {
                    anyhow::bail!("FUEL_PRICE_PER_LITER must not be negative (current: {})", price);
                }
                price
            }
            None => defaults.fuel_price_per_liter,
        };

        Ok(Self {
            google_maps_api_key,
            distance_matrix_url,
            provider_timeout_seconds,
            max_exact_stops,
            vehicle_efficiency_km_per_liter,
            fuel_price_per_liter,
        })
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f64,
) -> Result<f64> {
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    let number: f64 = value
        .parse::<f64>()
        .with_context(|| format!("{} must be a number, got {:?}", key, value))?;
    if !number.is_finite() || number <= 0.0 {
        anyhow::bail!("{} must be positive (current: {})", key, number);
    }
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults_when_nothing_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.google_maps_api_key.is_none());
        assert_eq!(config.max_exact_stops, 10);
    }

    #[test]
    fn test_config_api_key_some_when_set() {
        let config = load(&[("GOOGLE_MAPS_API_KEY", "abc123")]).unwrap();
        assert_eq!(config.google_maps_api_key, Some("abc123".to_string()));
    }

    #[test]
    fn test_config_blank_api_key_is_none() {
        let config = load(&[("GOOGLE_MAPS_API_KEY", "  ")]).unwrap();
        assert!(config.google_maps_api_key.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = load(&[
            ("DISTANCE_MATRIX_URL", "http://localhost:9000/matrix"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("MAX_EXACT_STOPS", "8"),
            ("VEHICLE_EFFICIENCY_KM_PER_LITER", "14.5"),
            ("FUEL_PRICE_PER_LITER", "1190"),
        ])
        .unwrap();

        assert_eq!(config.distance_matrix_url, "http://localhost:9000/matrix");
        assert_eq!(config.provider_timeout_seconds, 5);
        assert_eq!(config.max_exact_stops, 8);
        assert_eq!(config.vehicle_efficiency_km_per_liter, 14.5);
        assert_eq!(config.fuel_price_per_liter, 1190.0);
    }

    #[test]
    fn test_config_rejects_stop_limit_above_ceiling() {
        let err = load(&[("MAX_EXACT_STOPS", "13")]).unwrap_err();
        assert!(err.to_string().contains("between 1 and 12"));
        assert!(load(&[("MAX_EXACT_STOPS", "0")]).is_err());
    }

    #[test]
    fn test_config_rejects_non_positive_efficiency() {
        assert!(load(&[("VEHICLE_EFFICIENCY_KM_PER_LITER", "0")]).is_err());
        assert!(load(&[("VEHICLE_EFFICIENCY_KM_PER_LITER", "fast")]).is_err());
    }

    #[test]
    fn test_config_rejects_negative_price() {
        assert!(load(&[("FUEL_PRICE_PER_LITER", "-1")]).is_err());
    }
}
