// src/matching/mod.rs
//! Candidate matching and metric scoring.

pub mod matcher;
pub mod metrics;
pub mod scorer;

pub use matcher::UnitMatcher;
pub use metrics::{Metric, MetricSet, MetricVector};
pub use scorer::Scorer;
