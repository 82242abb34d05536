//! Points, levels, badges and achievements from a user's activity counters.

pub mod catalog;
pub mod scorer;

pub use catalog::{ACHIEVEMENTS, BADGES};
pub use scorer::{score, score_at};
