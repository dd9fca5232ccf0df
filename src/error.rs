//! Error taxonomy of the planning engine
//!
//! Unreachable pairs and empty point lists are data states, not errors;
//! they flow through the pipeline as [`Measure::Unreachable`] and empty
//! routes respectively.
//!
//! [`Measure::Unreachable`]: crate::types::Measure::Unreachable

use thiserror::Error;

/// Errors reported to the immediate caller of the engine
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Distance provider call failed as a whole (transport, malformed
    /// response or non-success top-level status). No matrix was produced.
    #[error("distance provider failure: {0}")]
    ProviderFailure(String),

    /// Malformed numeric input, rejected before any computation
    #[error("invalid numeric input: {0}")]
    InvalidNumeric(String),

    /// Structurally inconsistent input (matrix shape, anchor indices)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Instance exceeds the ceiling of the exact solver
    #[error("too many delivery points for exact optimization: {count} (limit {limit})")]
    TooManyStops { count: usize, limit: usize },
}

impl PlannerError {
    /// Stable machine-readable code, used by the CLI report
    pub const fn code(&self) -> &'static str {
        match self {
            PlannerError::ProviderFailure(_) => "PROVIDER_FAILURE",
            PlannerError::InvalidNumeric(_) => "INVALID_NUMERIC",
            PlannerError::InvalidInput(_) => "INVALID_INPUT",
            PlannerError::TooManyStops { .. } => "TOO_MANY_STOPS",
        }
    }
}

pub type PlannerResult<T> = std::result::Result<T, PlannerError>;

/// Reject non-finite values with a descriptive message
pub(crate) fn ensure_finite(value: f64, what: &str) -> PlannerResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlannerError::InvalidNumeric(format!(
            "{} must be a finite number, got {}",
            what, value
        )))
    }
}
