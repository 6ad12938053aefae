//! Recursive formula evaluation

use std::collections::BTreeMap;

use coastcvi_core::formula::{CombineMethod, CompositeFormula, CustomCombination, Formula, FormulaFamily, FormulaTag};
use coastcvi_core::parameter::VulnerabilityScale;
use coastcvi_core::Registry;
use serde::{Deserialize, Serialize};

use super::{means, trace};

/// One parameter's score and weight as fed to a formula
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaInput {
    pub id: String,
    /// Vulnerability score, already clamped into `scale`
    pub vulnerability: f64,
    pub weight: f64,
    pub scale: VulnerabilityScale,
}

impl FormulaInput {
    pub fn new(id: impl Into<String>, vulnerability: f64, weight: f64, scale: VulnerabilityScale) -> Self {
        Self {
            id: id.into(),
            vulnerability,
            weight,
            scale,
        }
    }

    /// Ordinal input with the given weight
    pub fn ordinal(id: impl Into<String>, vulnerability: f64, weight: f64) -> Self {
        Self::new(id, vulnerability, weight, VulnerabilityScale::Ordinal)
    }
}

/// Outcome of evaluating a formula on one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub value: f64,
    /// Formula with the actual inputs substituted
    pub trace: String,
    /// Sub-index breakdown for composites, keyed by label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, f64>,
}

/// Evaluates atomic and composite formulas
#[derive(Debug, Clone, Copy)]
pub struct FormulaEngine<'r> {
    registry: &'r Registry,
}

impl<'r> FormulaEngine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Evaluate a tag, expanding composite tags through the registry
    pub fn evaluate_tag(&self, tag: FormulaTag, inputs: &[FormulaInput]) -> CalculationResult {
        self.evaluate(&self.registry.formula_for_tag(tag), inputs)
    }

    /// Evaluate a formula tree.
    ///
    /// Atomic formulas consume every input. Composite sub-indices pick their
    /// own parameters out of `inputs` by id.
    pub fn evaluate(&self, formula: &Formula, inputs: &[FormulaInput]) -> CalculationResult {
        match formula {
            Formula::Atomic(tag) => match tag.family() {
                Some(family) => evaluate_atomic(*tag, family, inputs),
                None => self.evaluate_tag(*tag, inputs),
            },
            Formula::Composite(tree) => self.evaluate_composite(tree, inputs),
        }
    }

    fn evaluate_composite(&self, tree: &CompositeFormula, inputs: &[FormulaInput]) -> CalculationResult {
        let mut parts = Vec::with_capacity(tree.sub_indices.len());
        let mut components = BTreeMap::new();

        for sub in &tree.sub_indices {
            let mut selected: Vec<FormulaInput> = sub
                .parameter_ids
                .iter()
                .filter_map(|id| inputs.iter().find(|i| &i.id == id).cloned())
                .collect();
            renormalize(&mut selected);

            let result = self.evaluate(&sub.formula, &selected);
            components.insert(component_label(&sub.symbol, sub.weight), result.value);
            parts.push((result.value, sub.weight));
        }

        let value = combine(tree.combine, &parts);
        let symbols: Vec<&str> = tree.sub_indices.iter().map(|s| s.symbol.as_str()).collect();
        let expression = tree
            .expression
            .clone()
            .unwrap_or_else(|| trace::default_expression(tree.combine, &symbols));
        let trace = trace::composite(tree.tag, &tree.label, &expression, tree.combine, &parts, value);

        CalculationResult {
            value,
            trace,
            components,
        }
    }
}

fn component_label(symbol: &str, weight: f64) -> String {
    format!("{symbol} ({:.0}%)", weight * 100.0)
}

/// Scale a sub-index's weights to sum to 1; all-zero weights are left alone
fn renormalize(inputs: &mut [FormulaInput]) {
    let total: f64 = inputs.iter().map(|i| i.weight).sum();
    if total > 0.0 {
        for input in inputs.iter_mut() {
            input.weight /= total;
        }
    }
}

fn combine(method: CombineMethod, parts: &[(f64, f64)]) -> f64 {
    let values: Vec<f64> = parts.iter().map(|&(v, _)| v).collect();
    match method {
        CombineMethod::ArithmeticMean => means::mean(&values),
        CombineMethod::WeightedSum => {
            let weights: Vec<f64> = parts.iter().map(|&(_, w)| w).collect();
            means::weighted_sum(&values, &weights)
        }
        CombineMethod::Custom(CustomCombination::ExposureSensitivityAdaptive) => match values.as_slice() {
            [exposure, sensitivity, adaptive] => (exposure + sensitivity - adaptive) / 3.0,
            _ => 0.0,
        },
    }
}

fn evaluate_atomic(tag: FormulaTag, family: FormulaFamily, inputs: &[FormulaInput]) -> CalculationResult {
    let weights: Vec<f64> = inputs.iter().map(|i| i.weight).collect();
    let values: Vec<f64> = if family == FormulaFamily::RemappedMean {
        inputs
            .iter()
            .map(|i| match i.scale {
                VulnerabilityScale::Ordinal => means::remap_to_unit(i.vulnerability),
                VulnerabilityScale::Unit => i.vulnerability,
            })
            .collect()
    } else {
        inputs.iter().map(|i| i.vulnerability).collect()
    };

    let value = match family {
        FormulaFamily::Traditional => means::traditional_cvi(&values),
        FormulaFamily::GeometricMean => means::geometric_mean(&values, &weights),
        FormulaFamily::NormalizedGeometricMean => means::normalized_geometric_mean(&values, &weights),
        FormulaFamily::ArithmeticMean => means::arithmetic_mean(&values, &weights),
        FormulaFamily::NonlinearPower => means::nonlinear_power(&values, &weights),
        FormulaFamily::Additive => means::additive(&values),
        FormulaFamily::WeightedSum => means::weighted_sum(&values, &weights),
        FormulaFamily::RemappedMean => means::mean(&values),
    };

    CalculationResult {
        value,
        trace: trace::atomic(tag, family, &values, &weights, value),
        components: BTreeMap::new(),
    }
}
