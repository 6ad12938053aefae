//! # coastcvi algorithms
//!
//! Coastal vulnerability analysis over shoreline segments.
//!
//! ## Available Algorithm Categories
//!
//! - **formula**: Geometric, arithmetic, additive and custom index formulas with traces
//! - **detection**: Which standard indices a parameter selection matches
//! - **calculation**: Per-segment scoring, statistics and persistence
//! - **vector**: Geodesic measurements and shoreline segmentation

pub mod calculation;
pub mod detection;
pub mod formula;
pub(crate) mod maybe_rayon;
pub mod vector;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculation::{
        calculate, calculate_and_persist, compute_statistics, CalculationOutcome, CalculationParams,
        FormulaSelection, VulnerabilityCategory, VulnerabilityStatistics,
    };
    pub use crate::detection::{detect_indices, DetectionParams, IndexDetection, IndexDetector};
    pub use crate::formula::{resolve_tag, CalculationResult, FormulaEngine, FormulaInput};
    pub use crate::vector::{
        geodesic_length, plan_segmentation, segment_shoreline, SegmentationParams, SegmentationPlan,
        ShorelineSegmenter,
    };
    pub use coastcvi_core::prelude::*;
}
