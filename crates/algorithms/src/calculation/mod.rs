//! Per-segment vulnerability calculation
//!
//! - orchestrator: relevance filtering, soft validation, per-segment scoring and persistence
//! - statistics: min, max, mean and category counts over the scores

mod orchestrator;
mod statistics;

pub use orchestrator::{
    calculate, calculate_and_persist, CalculationOutcome, CalculationParams, FormulaSelection, SegmentError,
    SegmentResult, DEFAULT_STORE_KEY,
};
pub use statistics::{compute_statistics, VulnerabilityCategory, VulnerabilityStatistics};
