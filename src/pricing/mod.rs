//! Heuristic price suggestions for HiFi listings.

pub mod catalog;
pub mod estimator;
pub mod text_analysis;

pub use estimator::{estimate, estimate_at};
