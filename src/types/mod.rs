//! Type definitions

pub mod measure;
pub mod point;
pub mod route;

pub use measure::*;
pub use point::*;
pub use route::*;
