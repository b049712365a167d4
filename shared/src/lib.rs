//! Gym Manager Shared Library
//!
//! This crate contains the domain model and the pure calculations used by
//! the backend and WASM modules: billing status, body composition, client
//! assessments and aggregate reports.

pub mod assessment;
pub mod billing;
pub mod body_composition;
pub mod errors;
pub mod models;
pub mod statistics;
pub mod validation;

// Re-export commonly used items
pub use assessment::*;
pub use billing::*;
pub use body_composition::*;
pub use errors::*;
pub use models::*;
pub use statistics::*;
