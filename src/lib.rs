//! Delivery route planner
//!
//! Plans the shortest route from an origin through a small set of delivery
//! points, back to the origin or on to a fixed destination, and estimates
//! the fuel it takes. Distances come from a [`DistanceProvider`]; the
//! search is exact over all visiting orders, so instances stay small.
//!
//! [`DistanceProvider`]: services::routing::DistanceProvider

pub mod config;
pub mod defaults;
pub mod error;
pub mod services;
pub mod types;

pub use error::{PlannerError, PlannerResult};
