//! Formula evaluation
//!
//! - means: the pure kernel for each formula family
//! - trace: human-readable formula traces
//! - engine: recursive evaluation of atomic and composite formulas

mod engine;
pub mod means;
pub mod trace;

pub use engine::{CalculationResult, FormulaEngine, FormulaInput};

use coastcvi_core::FormulaTag;
use tracing::warn;

/// Tag used when a formula name cannot be resolved
pub const FALLBACK_TAG: FormulaTag = FormulaTag::GeometricMean;

/// Resolve a formula name, falling back to the weighted geometric mean.
///
/// Returns the tag and, on fallback, a warning for the caller.
pub fn resolve_tag(name: &str) -> (FormulaTag, Option<String>) {
    match name.parse::<FormulaTag>() {
        Ok(tag) => (tag, None),
        Err(_) => {
            warn!(formula = name, fallback = %FALLBACK_TAG, "unknown formula tag");
            (
                FALLBACK_TAG,
                Some(format!("Unknown formula type: {name}. Defaulting to {FALLBACK_TAG}.")),
            )
        }
    }
}
