//! Route optimization services

pub mod cost;
pub mod geo;
pub mod matrix;
pub mod planner;
pub mod ranking;
pub mod routing;
pub mod tsp;
