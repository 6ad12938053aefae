//! Applies a formula across a segment collection

use std::collections::HashSet;

use coastcvi_core::formula::{Formula, FormulaTag, ScalePolicy};
use coastcvi_core::parameter::{Parameter, VulnerabilityScale};
use coastcvi_core::segment::{segments_to_collection, ShorelineSegment};
use coastcvi_core::store::DocumentStore;
use coastcvi_core::{Error, Registry, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::statistics::{compute_statistics, VulnerabilityStatistics};
use crate::formula::{resolve_tag, CalculationResult, FormulaEngine, FormulaInput};
use crate::maybe_rayon::*;

/// Key the segment collection is persisted under
pub const DEFAULT_STORE_KEY: &str = "current-segments";

/// Which formula to apply
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaSelection {
    /// A registered index: its formula and its signature
    Index(String),
    /// A formula tag; composite tags expand to their trees
    Tag(FormulaTag),
    /// A formula name from outside, e.g. a UI; unknown names fall back to the geometric mean
    Named(String),
}

/// Parameters for a calculation batch
#[derive(Debug, Clone)]
pub struct CalculationParams {
    /// Allowed drift of the relevant weight sum from 1
    pub weight_tolerance: f64,
    /// Decimal places results are rounded to
    pub decimals: i32,
    /// Document store key for the segment collection
    pub store_key: String,
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self {
            weight_tolerance: 0.01,
            decimals: 2,
            store_key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}

/// Score written to one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub segment_id: String,
    /// Rounded value stored on the segment
    pub value: f64,
    pub result: CalculationResult,
}

/// A segment whose computation failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentError {
    pub segment_id: String,
    pub message: String,
}

/// Everything a batch produced, including partial results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub formula: FormulaTag,
    pub results: Vec<SegmentResult>,
    /// Segments excluded for missing a relevant parameter
    pub skipped: usize,
    /// Segments whose stored index or formula changed
    pub changed: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<SegmentError>,
    pub statistics: Option<VulnerabilityStatistics>,
    pub persisted: bool,
    pub persistence_error: Option<String>,
}

impl CalculationOutcome {
    fn empty(formula: FormulaTag) -> Self {
        Self {
            formula,
            results: Vec::new(),
            skipped: 0,
            changed: 0,
            warnings: Vec::new(),
            errors: Vec::new(),
            statistics: None,
            persisted: false,
            persistence_error: None,
        }
    }
}

struct ResolvedFormula {
    formula: Formula,
    /// Parameter ids the formula may draw on; `None` accepts any parameter
    signature: Option<Vec<String>>,
}

fn resolve(registry: &Registry, selection: &FormulaSelection, warnings: &mut Vec<String>) -> Result<ResolvedFormula> {
    let from_tag = |tag: FormulaTag| {
        let formula = registry.formula_for_tag(tag);
        let signature = match &formula {
            Formula::Composite(_) => Some(formula.parameter_ids().into_iter().map(str::to_string).collect()),
            Formula::Atomic(_) => None,
        };
        ResolvedFormula { formula, signature }
    };

    match selection {
        FormulaSelection::Index(id) => {
            let index = registry.index(id).ok_or_else(|| Error::UnknownIndex(id.clone()))?;
            Ok(ResolvedFormula {
                formula: index.formula.clone(),
                signature: Some(index.parameter_ids.clone()),
            })
        }
        FormulaSelection::Tag(tag) => Ok(from_tag(*tag)),
        FormulaSelection::Named(name) => {
            let (tag, warning) = resolve_tag(name);
            warnings.extend(warning);
            Ok(from_tag(tag))
        }
    }
}

/// Parameters that take part: enabled, inside the signature and, for weighted formulas, weighted
fn relevant_parameters(parameters: &[Parameter], resolved: &ResolvedFormula) -> Vec<Parameter> {
    let signature: Option<HashSet<&str>> = resolved
        .signature
        .as_ref()
        .map(|ids| ids.iter().map(String::as_str).collect());
    let weighted = resolved.formula.is_weighted();

    parameters
        .iter()
        .filter(|p| p.enabled)
        .filter(|p| signature.as_ref().map_or(true, |s| s.contains(p.id.as_str())))
        .filter(|p| !weighted || p.weight > 0.0)
        .cloned()
        .collect()
}

fn scale_warnings(tag: FormulaTag, relevant: &[Parameter]) -> Vec<String> {
    let conflicting = |expected: VulnerabilityScale| -> Vec<&str> {
        relevant
            .iter()
            .filter(|p| p.scale != expected)
            .map(|p| p.id.as_str())
            .collect()
    };
    let offenders = match tag.scale_policy() {
        ScalePolicy::Ordinal => conflicting(VulnerabilityScale::Ordinal),
        ScalePolicy::Unit => conflicting(VulnerabilityScale::Unit),
        ScalePolicy::RemapToUnit => Vec::new(),
        ScalePolicy::Uniform => {
            let has_unit = relevant.iter().any(|p| p.scale == VulnerabilityScale::Unit);
            let has_ordinal = relevant.iter().any(|p| p.scale == VulnerabilityScale::Ordinal);
            if has_unit && has_ordinal {
                conflicting(VulnerabilityScale::Ordinal)
            } else {
                Vec::new()
            }
        }
    };
    if offenders.is_empty() {
        return Vec::new();
    }
    let message = format!(
        "Formula {tag} mixes vulnerability scales; parameters on a different scale: {}",
        offenders.join(", ")
    );
    warn!(formula = %tag, parameters = ?offenders, "vulnerability scale mismatch");
    vec![message]
}

/// Scale shared by the inputs: unit only when every relevant parameter is
fn input_scale(relevant: &[Parameter]) -> VulnerabilityScale {
    if !relevant.is_empty() && relevant.iter().all(|p| p.scale == VulnerabilityScale::Unit) {
        VulnerabilityScale::Unit
    } else {
        VulnerabilityScale::Ordinal
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Score one segment; `Ok(None)` when a relevant parameter is missing
fn score_segment(
    engine: &FormulaEngine<'_>,
    formula: &Formula,
    segment: &ShorelineSegment,
    relevant: &[Parameter],
) -> Result<Option<CalculationResult>> {
    if !segment.has_all(relevant.iter().map(|p| p.id.as_str())) {
        return Ok(None);
    }

    let mut inputs = Vec::with_capacity(relevant.len());
    for p in relevant {
        let Some(assigned) = segment.parameter(&p.id) else {
            return Ok(None);
        };
        let raw = assigned.vulnerability();
        if !raw.is_finite() {
            return Err(Error::Algorithm(format!("parameter {} has non-finite vulnerability {raw}", p.id)));
        }
        let clamped = p.scale.clamp(raw);
        if clamped != raw {
            warn!(
                segment = %segment.id,
                parameter = %p.id,
                raw,
                clamped,
                "vulnerability outside the {} scale",
                p.scale.label()
            );
        }
        inputs.push(FormulaInput::new(p.id.clone(), clamped, p.weight, p.scale));
    }

    let result = engine.evaluate(formula, &inputs);
    if !result.value.is_finite() {
        return Err(Error::Algorithm(format!("formula produced {}", result.value)));
    }
    Ok(Some(result))
}

/// Apply a formula to every complete segment, writing the rounded index and
/// formula tag onto it.
///
/// Data-quality problems never fail the call: they come back as warnings,
/// skipped segments or per-segment errors on the outcome.
///
/// # Errors
///
/// [`Error::UnknownIndex`] when the selection names an index the registry lacks.
pub fn calculate(
    registry: &Registry,
    segments: &mut [ShorelineSegment],
    parameters: &[Parameter],
    selection: &FormulaSelection,
    params: &CalculationParams,
) -> Result<CalculationOutcome> {
    let mut warnings = Vec::new();
    let resolved = resolve(registry, selection, &mut warnings)?;
    let tag = resolved.formula.tag();
    let mut outcome = CalculationOutcome::empty(tag);

    let relevant = relevant_parameters(parameters, &resolved);
    if relevant.is_empty() {
        warn!(formula = %tag, "no relevant parameters");
        warnings.push("No relevant parameters selected for calculation".to_string());
        outcome.skipped = segments.len();
        outcome.warnings = warnings;
        return Ok(outcome);
    }

    if resolved.formula.is_weighted() {
        let total: f64 = relevant.iter().map(|p| p.weight).sum();
        if (total - 1.0).abs() > params.weight_tolerance {
            warn!(total, "relevant weights do not sum to 1");
            warnings.push(format!(
                "Weights of parameters used in calculation do not sum to 1 (Sum: {total:.2})"
            ));
        }
    }
    warnings.extend(scale_warnings(tag, &relevant));

    let engine = FormulaEngine::new(registry);
    let scored: Vec<Result<Option<CalculationResult>>> = (&*segments)
        .into_par_iter()
        .map(|segment| score_segment(&engine, &resolved.formula, segment, &relevant))
        .collect();

    let mut values = Vec::new();
    for (segment, scored) in segments.iter_mut().zip(scored) {
        match scored {
            Ok(Some(result)) => {
                let value = round_to(result.value, params.decimals);
                if segment.vulnerability_index != Some(value) || segment.vulnerability_formula != Some(tag) {
                    segment.vulnerability_index = Some(value);
                    segment.vulnerability_formula = Some(tag);
                    outcome.changed += 1;
                }
                values.push(value);
                outcome.results.push(SegmentResult {
                    segment_id: segment.id.clone(),
                    value,
                    result,
                });
            }
            Ok(None) => outcome.skipped += 1,
            Err(e) => {
                error!(segment = %segment.id, error = %e, "segment calculation failed");
                outcome.errors.push(SegmentError {
                    segment_id: segment.id.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    if outcome.skipped == segments.len() {
        warnings.push("No segments found for calculation".to_string());
    }

    outcome.statistics = compute_statistics(&values, tag.output_scale(input_scale(&relevant)));
    outcome.warnings = warnings;

    info!(
        formula = %tag,
        scored = outcome.results.len(),
        skipped = outcome.skipped,
        failed = outcome.errors.len(),
        changed = outcome.changed,
        "calculation finished"
    );
    Ok(outcome)
}

/// [`calculate`], then write the whole collection to `store` if any segment changed.
///
/// A failed write is reported on the outcome; the in-memory results stay valid.
pub async fn calculate_and_persist<S: DocumentStore>(
    registry: &Registry,
    segments: &mut [ShorelineSegment],
    parameters: &[Parameter],
    selection: &FormulaSelection,
    params: &CalculationParams,
    store: &S,
) -> Result<CalculationOutcome> {
    let mut outcome = calculate(registry, segments, parameters, selection, params)?;

    if outcome.changed == 0 {
        debug!(key = %params.store_key, "no segment changed, skipping write");
        return Ok(outcome);
    }

    match store.store(&params.store_key, &segments_to_collection(segments)).await {
        Ok(()) => outcome.persisted = true,
        Err(e) => {
            error!(key = %params.store_key, error = %e, "failed to persist calculated segments");
            outcome.persistence_error = Some(format!(
                "Failed to save calculated scores: {e}. Results are shown but were not stored."
            ));
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coastcvi_core::segment::SegmentProperties;
    use coastcvi_core::vector::FeatureCollection;
    use geo::line_string;

    /// Store whose writes always fail
    struct FailingStore;

    impl DocumentStore for FailingStore {
        async fn store(&self, _key: &str, _collection: &FeatureCollection) -> Result<()> {
            Err(Error::Store("disk full".into()))
        }

        async fn get(&self, _key: &str) -> Result<Option<FeatureCollection>> {
            Ok(None)
        }

        async fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn segment(i: usize, scores: &[(&str, f64)]) -> ShorelineSegment {
        let mut seg = ShorelineSegment::new(
            format!("segment-{i:06}"),
            line_string![(x: 0.0, y: i as f64 * 0.001), (x: 0.001, y: i as f64 * 0.001)],
            SegmentProperties::default(),
        );
        for &(id, v) in scores {
            seg.set_parameter(
                id,
                coastcvi_core::ParameterValue::Numerical {
                    value: v,
                    vulnerability: v,
                },
            );
        }
        seg
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(9.797958971, 2), 9.8);
        assert_eq!(round_to(0.385, 2), 0.39);
    }

    #[test]
    fn test_unknown_index_is_an_error() {
        let registry = Registry::standard().unwrap();
        let err = calculate(
            &registry,
            &mut [],
            &[],
            &FormulaSelection::Index("nope".into()),
            &CalculationParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownIndex(_)));
    }

    #[test]
    fn test_unknown_name_falls_back_with_warning() {
        let registry = Registry::standard().unwrap();
        let params = registry.parameters_for_index("cvi-thieler-1999").unwrap();
        let scores: Vec<(&str, f64)> = params.iter().map(|p| (p.id.as_str(), 4.0)).collect();
        let mut segments = vec![segment(0, &scores)];

        let outcome = calculate(
            &registry,
            &mut segments,
            &params,
            &FormulaSelection::Named("mystery".into()),
            &CalculationParams::default(),
        )
        .unwrap();
        assert_eq!(outcome.formula, FormulaTag::GeometricMean);
        assert!(outcome.warnings.iter().any(|w| w.contains("mystery")));
        assert!((outcome.results[0].value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_out_of_scale_scores() {
        let registry = Registry::standard().unwrap();
        let params = registry.parameters_for_index("cvi-thieler-1999").unwrap();
        let scores: Vec<(&str, f64)> = params.iter().map(|p| (p.id.as_str(), 9.0)).collect();
        let mut segments = vec![segment(0, &scores)];

        let outcome = calculate(
            &registry,
            &mut segments,
            &params,
            &FormulaSelection::Tag(FormulaTag::ArithmeticMean),
            &CalculationParams::default(),
        )
        .unwrap();
        assert_eq!(outcome.results[0].value, 5.0);
    }

    #[test]
    fn test_weight_drift_warns_but_computes() {
        let registry = Registry::standard().unwrap();
        let mut params = registry.parameters_for_index("cvi-thieler-1999").unwrap();
        for p in &mut params {
            p.weight = 0.5;
        }
        let scores: Vec<(&str, f64)> = params.iter().map(|p| (p.id.as_str(), 2.0)).collect();
        let mut segments = vec![segment(0, &scores)];

        let outcome = calculate(
            &registry,
            &mut segments,
            &params,
            &FormulaSelection::Tag(FormulaTag::GeometricMean),
            &CalculationParams::default(),
        )
        .unwrap();
        assert!(outcome.warnings.iter().any(|w| w.contains("Sum: 3.00")));
        assert_eq!(outcome.results.len(), 1);
        assert!((outcome.results[0].value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_score_is_a_soft_error() {
        let registry = Registry::standard().unwrap();
        let params = registry.parameters_for_index("cvi-thieler-1999").unwrap();
        let mut scores: Vec<(&str, f64)> = params.iter().map(|p| (p.id.as_str(), 3.0)).collect();
        let good = segment(0, &scores);
        scores[0].1 = f64::NAN;
        let bad = segment(1, &scores);
        let mut segments = vec![good, bad];

        let outcome = calculate(
            &registry,
            &mut segments,
            &params,
            &FormulaSelection::Index("cvi-thieler-1999".into()),
            &CalculationParams::default(),
        )
        .unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].segment_id, "segment-000001");
        assert!(segments[1].vulnerability_index.is_none());
    }

    #[test]
    fn test_no_relevant_parameters() {
        let registry = Registry::standard().unwrap();
        let mut segments = vec![segment(0, &[])];
        let outcome = calculate(
            &registry,
            &mut segments,
            &[],
            &FormulaSelection::Tag(FormulaTag::Traditional),
            &CalculationParams::default(),
        )
        .unwrap();
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.results.is_empty());
        assert!(!outcome.warnings.is_empty());
    }

    #[test]
    fn test_mixed_scales_warn() {
        let registry = Registry::standard().unwrap();
        let ordinal = registry.parameter("coastal_slope").unwrap().clone();
        let unit = registry.parameter("building_coast_ratio").unwrap().clone();
        assert_eq!(ordinal.scale, VulnerabilityScale::Ordinal);
        assert_eq!(unit.scale, VulnerabilityScale::Unit);
        let params = vec![ordinal, unit];

        let warnings = scale_warnings(FormulaTag::ArithmeticMean, &params);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("building_coast_ratio"), "{}", warnings[0]);
        assert!(!warnings[0].contains("coastal_slope"));

        // One scale throughout is fine for a uniform formula
        assert!(scale_warnings(FormulaTag::ArithmeticMean, &params[..1]).is_empty());
        assert!(scale_warnings(FormulaTag::IcviSvi, &params).is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_results() {
        let registry = Registry::standard().unwrap();
        let params = registry.parameters_for_index("cvi-thieler-1999").unwrap();
        let scores: Vec<(&str, f64)> = params.iter().map(|p| (p.id.as_str(), 3.0)).collect();
        let mut segments = vec![segment(0, &scores), segment(1, &scores)];

        let outcome = calculate_and_persist(
            &registry,
            &mut segments,
            &params,
            &FormulaSelection::Index("cvi-thieler-1999".into()),
            &CalculationParams::default(),
            &FailingStore,
        )
        .await
        .unwrap();

        assert!(!outcome.persisted);
        assert_eq!(outcome.changed, 2);
        assert!(outcome.errors.is_empty());
        let message = outcome.persistence_error.as_deref().unwrap();
        assert!(message.contains("disk full"), "{message}");
        assert!(message.contains("were not stored"), "{message}");
        assert_eq!(outcome.results.len(), 2);
        assert!(segments.iter().all(|s| s.vulnerability_index.is_some()));
    }
}
