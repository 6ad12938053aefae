//! Index detection.
//!
//! Scores how well a parameter selection matches each registered index
//! signature and proposes the best-fitting index and formula tag.

use std::collections::HashSet;

use coastcvi_core::{Algorithm, CoastalIndex, Error, FormulaTag, Parameter, Registry, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Display names for detected indices, keyed by index id
const DETECTION_NAMES: &[(&str, &str)] = &[
    ("cvi-thieler-1999", "CVI (Traditional)"),
    ("rcvi-evelpidou-2025", "RCVI (Traditional)"),
    ("evi-alcantara-2024", "ICVI - EVI Component"),
    ("svi-alcantara-2024", "ICVI - SVI Component"),
    ("icvi-alcantara-2024", "ICVI (EVI + SVI)"),
    ("icvi-ranked-alcantara-2024", "ICVI (0.1-0.9 Arithmetic)"),
    ("pcvi-kantamaneni-2024", "PCVI (Additive)"),
    ("ecvi-kantamaneni-2024", "ECVI (Additive)"),
    ("ccvi-kantamaneni-2024", "CCVI (PCVI + ECVI)"),
    ("cvi-se-szlafsztein-2007", "CVI-SE (Physical + Socioeconomic)"),
    ("sovi-cutter-2003", "SoVI (Factor Weighted Sum)"),
    ("sevi", "SeVI (Domain-based)"),
    ("lvi-mudasser-2020", "LVI (Exposure + Sensitivity - Adaptive Capacity)"),
    ("integrated-cvi-tanim-2022", "Integrated CVI (Physical + Social + Environmental)"),
    ("gcvi-gs", "GCVI - Geological Subindex"),
    ("gcvi-cs", "GCVI - Coastal Subindex"),
    ("gcvi-hs", "GCVI - Hydrodynamic Subindex"),
    ("gcvi", "GCVI (GS + CS + HS)"),
];

/// Parameters for index detection
#[derive(Debug, Clone)]
pub struct DetectionParams {
    /// Minimum share of a signature the selection must cover
    pub threshold: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

/// An index a selection plausibly corresponds to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDetection {
    pub index_id: String,
    pub index_name: String,
    pub formula: FormulaTag,
    /// `|signature ∩ selected| / |signature|`
    pub confidence: f64,
}

/// Share of `index`'s signature present in `selected`
pub fn confidence(index: &CoastalIndex, selected: &HashSet<&str>) -> f64 {
    if index.parameter_ids.is_empty() {
        return 0.0;
    }
    let matched = index
        .parameter_ids
        .iter()
        .filter(|id| selected.contains(id.as_str()))
        .count();
    matched as f64 / index.parameter_ids.len() as f64
}

fn display_name(index: &CoastalIndex) -> String {
    DETECTION_NAMES
        .iter()
        .find(|(id, _)| *id == index.id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| index.name.clone())
}

/// Rank registry indices by how much of their signature `selected` covers.
///
/// Candidates under the threshold are dropped, so an empty result means the
/// caller has to pick a formula explicitly. Ties keep registry order.
pub fn detect_indices(registry: &Registry, selected: &[Parameter], params: &DetectionParams) -> Vec<IndexDetection> {
    let ids: HashSet<&str> = selected.iter().map(|p| p.id.as_str()).collect();

    let mut detections: Vec<IndexDetection> = registry
        .indices()
        .iter()
        .filter_map(|index| {
            let confidence = confidence(index, &ids);
            if confidence < params.threshold {
                return None;
            }
            debug!(index = %index.id, confidence, "detection candidate");
            Some(IndexDetection {
                index_id: index.id.clone(),
                index_name: display_name(index),
                formula: index.formula.tag(),
                confidence,
            })
        })
        .collect();

    // Stable sort keeps registry order among equal confidences
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    detections
}

/// Index detection as an [`Algorithm`]
#[derive(Debug, Clone, Copy)]
pub struct IndexDetector<'r> {
    registry: &'r Registry,
}

impl<'r> IndexDetector<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }
}

impl Algorithm for IndexDetector<'_> {
    type Input = Vec<Parameter>;
    type Output = Vec<IndexDetection>;
    type Params = DetectionParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "IndexDetection"
    }

    fn description(&self) -> &'static str {
        "Match a parameter selection against registered index signatures"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        if !(0.0..=1.0).contains(&params.threshold) {
            return Err(Error::InvalidParameter {
                name: "threshold",
                value: params.threshold.to_string(),
                reason: "must be within 0..1".into(),
            });
        }
        Ok(detect_indices(self.registry, &input, &params))
    }
}
