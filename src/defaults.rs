/// Vehicle fuel efficiency used when the caller gives none
pub const DEFAULT_EFFICIENCY_KM_PER_LITER: f64 = 12.0;

/// Fuel unit price used when the caller gives none
pub const DEFAULT_FUEL_PRICE_PER_LITER: f64 = 1250.0;

/// Largest point count the exact solver accepts by default.
/// 10 points means 10! = 3,628,800 permutations.
pub const DEFAULT_MAX_EXACT_STOPS: usize = 10;

/// Hard ceiling for the configurable stop limit (12! ≈ 479 million permutations)
pub const MAX_EXACT_STOPS_CEILING: usize = 12;

pub const DEFAULT_PROVIDER_TIMEOUT_SECONDS: u64 = 30;
