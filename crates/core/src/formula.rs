//! Formula definitions.
//!
//! A [`Formula`] is either an atomic [`FormulaTag`] or a [`CompositeFormula`]
//! whose sub-indices each carry their own formula, so trees of any depth can
//! be described. Evaluation lives in the algorithms crate; this module only
//! holds the shape and the static facts about each tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::parameter::VulnerabilityScale;

/// Numeric family an atomic formula belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaFamily {
    /// `sqrt(prod(v) / n)`
    Traditional,
    /// `prod(max(v, eps) ^ (w / sum(w)))`
    GeometricMean,
    /// Weighted geometric mean raised again to `1/n`
    NormalizedGeometricMean,
    /// `sum(v * w) / sum(w)`
    ArithmeticMean,
    /// `sqrt(sum(v^2 * w) / sum(w))`
    NonlinearPower,
    /// `sum(v)`
    Additive,
    /// `sum(v * w)`
    WeightedSum,
    /// Ordinal scores remapped with `(v - 1) / 4`, then averaged
    RemappedMean,
}

impl FormulaFamily {
    /// Whether parameter weights influence the result
    pub fn is_weighted(self) -> bool {
        matches!(
            self,
            FormulaFamily::GeometricMean
                | FormulaFamily::NormalizedGeometricMean
                | FormulaFamily::ArithmeticMean
                | FormulaFamily::NonlinearPower
                | FormulaFamily::WeightedSum
        )
    }
}

/// Which vulnerability scale a formula expects its inputs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePolicy {
    /// Any scale, as long as every input shares it
    Uniform,
    /// 1–5 inputs only
    Ordinal,
    /// 0–1 inputs only
    Unit,
    /// 0–1 output; 1–5 inputs are remapped with `(v - 1) / 4`
    RemapToUnit,
}

/// Named formula tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormulaTag {
    Traditional,
    GeometricMean,
    GeometricMeanNormalized,
    ArithmeticMean,
    NonlinearPower,
    Additive,
    WeightedSum,
    IcviEvi,
    IcviSvi,
    IcviComposite,
    IcviArithmetic,
    IcviGeometric,
    Pcvi,
    Ecvi,
    CcviComposite,
    CviSe,
    Sovi,
    Sevi,
    Lvi,
    IntegratedCvi,
    GcviComponent,
    GcviComposite,
}

impl FormulaTag {
    pub const ALL: [FormulaTag; 22] = [
        FormulaTag::Traditional,
        FormulaTag::GeometricMean,
        FormulaTag::GeometricMeanNormalized,
        FormulaTag::ArithmeticMean,
        FormulaTag::NonlinearPower,
        FormulaTag::Additive,
        FormulaTag::WeightedSum,
        FormulaTag::IcviEvi,
        FormulaTag::IcviSvi,
        FormulaTag::IcviComposite,
        FormulaTag::IcviArithmetic,
        FormulaTag::IcviGeometric,
        FormulaTag::Pcvi,
        FormulaTag::Ecvi,
        FormulaTag::CcviComposite,
        FormulaTag::CviSe,
        FormulaTag::Sovi,
        FormulaTag::Sevi,
        FormulaTag::Lvi,
        FormulaTag::IntegratedCvi,
        FormulaTag::GcviComponent,
        FormulaTag::GcviComposite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormulaTag::Traditional => "traditional",
            FormulaTag::GeometricMean => "geometric-mean",
            FormulaTag::GeometricMeanNormalized => "geometric-mean-normalized",
            FormulaTag::ArithmeticMean => "arithmetic-mean",
            FormulaTag::NonlinearPower => "nonlinear-power",
            FormulaTag::Additive => "additive",
            FormulaTag::WeightedSum => "weighted-sum",
            FormulaTag::IcviEvi => "icvi-evi",
            FormulaTag::IcviSvi => "icvi-svi",
            FormulaTag::IcviComposite => "icvi-composite",
            FormulaTag::IcviArithmetic => "icvi-arithmetic",
            FormulaTag::IcviGeometric => "icvi-geometric",
            FormulaTag::Pcvi => "pcvi",
            FormulaTag::Ecvi => "ecvi",
            FormulaTag::CcviComposite => "ccvi-composite",
            FormulaTag::CviSe => "cvi-se",
            FormulaTag::Sovi => "sovi",
            FormulaTag::Sevi => "sevi",
            FormulaTag::Lvi => "lvi",
            FormulaTag::IntegratedCvi => "integrated-cvi",
            FormulaTag::GcviComponent => "gcvi-component",
            FormulaTag::GcviComposite => "gcvi-composite",
        }
    }

    /// Numeric family for atomic tags; `None` for composite tags, which
    /// must be expanded into a [`CompositeFormula`] before evaluation.
    pub fn family(self) -> Option<FormulaFamily> {
        use FormulaFamily as F;
        match self {
            FormulaTag::Traditional => Some(F::Traditional),
            FormulaTag::GeometricMean => Some(F::GeometricMean),
            FormulaTag::GeometricMeanNormalized => Some(F::NormalizedGeometricMean),
            FormulaTag::ArithmeticMean | FormulaTag::Sevi => Some(F::ArithmeticMean),
            FormulaTag::NonlinearPower => Some(F::NonlinearPower),
            FormulaTag::Additive | FormulaTag::Pcvi | FormulaTag::Ecvi => Some(F::Additive),
            FormulaTag::WeightedSum | FormulaTag::GcviComponent => Some(F::WeightedSum),
            FormulaTag::IcviEvi | FormulaTag::IcviSvi => Some(F::RemappedMean),
            FormulaTag::IcviComposite
            | FormulaTag::IcviArithmetic
            | FormulaTag::IcviGeometric
            | FormulaTag::CcviComposite
            | FormulaTag::CviSe
            | FormulaTag::Sovi
            | FormulaTag::Lvi
            | FormulaTag::IntegratedCvi
            | FormulaTag::GcviComposite => None,
        }
    }

    pub fn is_composite(self) -> bool {
        self.family().is_none()
    }

    /// Short symbol used on the left-hand side of formula traces
    pub fn symbol(self) -> &'static str {
        match self {
            FormulaTag::Traditional => "CVI",
            FormulaTag::GeometricMean => "CVI_gm",
            FormulaTag::GeometricMeanNormalized => "CVI_ngm",
            FormulaTag::ArithmeticMean => "CVI_am",
            FormulaTag::NonlinearPower => "CVI_rms",
            FormulaTag::Additive => "CVI_sum",
            FormulaTag::WeightedSum => "CVI_ws",
            FormulaTag::IcviEvi => "EVI",
            FormulaTag::IcviSvi => "SVI",
            FormulaTag::IcviComposite | FormulaTag::IcviArithmetic | FormulaTag::IcviGeometric => "ICVI",
            FormulaTag::Pcvi => "PCVI",
            FormulaTag::Ecvi => "ECVI",
            FormulaTag::CcviComposite => "CCVI",
            FormulaTag::CviSe => "CVI-SE",
            FormulaTag::Sovi => "SoVI",
            FormulaTag::Sevi => "SeVI",
            FormulaTag::Lvi => "LVI",
            FormulaTag::IntegratedCvi => "ICVI_int",
            FormulaTag::GcviComponent => "GCVI_c",
            FormulaTag::GcviComposite => "GCVI",
        }
    }

    /// Scale the formula expects its inputs on
    pub fn scale_policy(self) -> ScalePolicy {
        match self {
            FormulaTag::GeometricMean
            | FormulaTag::GeometricMeanNormalized
            | FormulaTag::ArithmeticMean
            | FormulaTag::NonlinearPower
            | FormulaTag::Additive
            | FormulaTag::WeightedSum => ScalePolicy::Uniform,
            FormulaTag::IcviEvi | FormulaTag::IcviSvi | FormulaTag::IcviComposite => {
                ScalePolicy::RemapToUnit
            }
            FormulaTag::IcviArithmetic | FormulaTag::IcviGeometric => ScalePolicy::Unit,
            FormulaTag::Traditional
            | FormulaTag::Pcvi
            | FormulaTag::Ecvi
            | FormulaTag::CcviComposite
            | FormulaTag::CviSe
            | FormulaTag::Sovi
            | FormulaTag::Sevi
            | FormulaTag::Lvi
            | FormulaTag::IntegratedCvi
            | FormulaTag::GcviComponent
            | FormulaTag::GcviComposite => ScalePolicy::Ordinal,
        }
    }

    /// Scale of the result, given the scale shared by the inputs
    pub fn output_scale(self, input_scale: VulnerabilityScale) -> VulnerabilityScale {
        match self.scale_policy() {
            ScalePolicy::Uniform => input_scale,
            ScalePolicy::Ordinal => VulnerabilityScale::Ordinal,
            ScalePolicy::Unit | ScalePolicy::RemapToUnit => VulnerabilityScale::Unit,
        }
    }
}

impl fmt::Display for FormulaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormulaTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormulaTag::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownFormula(s.to_string()))
    }
}

/// Hand-written closed-form combinations of sub-index values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomCombination {
    /// `(Exposure + Sensitivity - AdaptiveCapacity) / 3`, sub-indices in that order
    ExposureSensitivityAdaptive,
}

impl CustomCombination {
    /// Number of sub-indices the expression consumes
    pub fn arity(self) -> usize {
        match self {
            CustomCombination::ExposureSensitivityAdaptive => 3,
        }
    }

    pub fn expression(self) -> &'static str {
        match self {
            CustomCombination::ExposureSensitivityAdaptive => "(E + S - AC)/3",
        }
    }
}

/// How sub-index values are folded into the composite value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombineMethod {
    /// Simple average of sub-index values
    ArithmeticMean,
    /// `sum(sub_value * sub_weight)`
    WeightedSum,
    Custom(CustomCombination),
}

/// One branch of a composite formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubIndex {
    pub id: String,
    /// Short label used in traces and component maps (e.g. "EVI")
    pub symbol: String,
    pub name: String,
    pub parameter_ids: Vec<String>,
    pub formula: Formula,
    pub weight: f64,
}

/// A formula combining several sub-index values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFormula {
    /// Tag this tree implements
    pub tag: FormulaTag,
    /// Left-hand side of the trace (e.g. "ICVI")
    pub label: String,
    pub sub_indices: Vec<SubIndex>,
    pub combine: CombineMethod,
    /// Human-readable combination, e.g. `(EVI + SVI)/2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

/// Recursive formula tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formula {
    Atomic(FormulaTag),
    Composite(Box<CompositeFormula>),
}

impl Formula {
    pub fn tag(&self) -> FormulaTag {
        match self {
            Formula::Atomic(tag) => *tag,
            Formula::Composite(c) => c.tag,
        }
    }

    /// Whether parameter weights influence the value anywhere in the tree
    pub fn is_weighted(&self) -> bool {
        match self {
            Formula::Atomic(tag) => tag.family().is_some_and(FormulaFamily::is_weighted),
            Formula::Composite(c) => c.sub_indices.iter().any(|s| s.formula.is_weighted()),
        }
    }

    /// Parameter ids referenced by sub-indices, in first-seen order.
    /// Empty for an atomic formula, which applies to whatever it is given.
    pub fn parameter_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        self.collect_parameter_ids(&mut ids);
        ids
    }

    fn collect_parameter_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Formula::Composite(c) = self {
            for sub in &c.sub_indices {
                for id in &sub.parameter_ids {
                    if !out.contains(&id.as_str()) {
                        out.push(id);
                    }
                }
                sub.formula.collect_parameter_ids(out);
            }
        }
    }

    /// Nesting depth (1 for atomic)
    pub fn depth(&self) -> usize {
        match self {
            Formula::Atomic(_) => 1,
            Formula::Composite(c) => {
                1 + c
                    .sub_indices
                    .iter()
                    .map(|s| s.formula.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

impl From<FormulaTag> for Formula {
    fn from(tag: FormulaTag) -> Self {
        Formula::Atomic(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip_through_str() {
        for tag in FormulaTag::ALL {
            assert_eq!(tag.as_str().parse::<FormulaTag>().unwrap(), tag);
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
        assert!("not-a-formula".parse::<FormulaTag>().is_err());
    }

    #[test]
    fn test_composite_tags_have_no_family() {
        assert!(FormulaTag::IcviComposite.is_composite());
        assert!(FormulaTag::Lvi.is_composite());
        assert_eq!(FormulaTag::Pcvi.family(), Some(FormulaFamily::Additive));
        assert_eq!(FormulaTag::IcviEvi.family(), Some(FormulaFamily::RemappedMean));
    }

    #[test]
    fn test_parameter_ids_and_depth() {
        let inner = CompositeFormula {
            tag: FormulaTag::CcviComposite,
            label: "X".into(),
            sub_indices: vec![SubIndex {
                id: "a".into(),
                symbol: "A".into(),
                name: "A".into(),
                parameter_ids: vec!["p1".into(), "p2".into()],
                formula: FormulaTag::Additive.into(),
                weight: 1.0,
            }],
            combine: CombineMethod::ArithmeticMean,
            expression: None,
        };
        let outer = Formula::Composite(Box::new(CompositeFormula {
            sub_indices: vec![
                SubIndex {
                    id: "nested".into(),
                    symbol: "N".into(),
                    name: "N".into(),
                    parameter_ids: vec!["p1".into(), "p2".into()],
                    formula: Formula::Composite(Box::new(inner)),
                    weight: 0.5,
                },
                SubIndex {
                    id: "b".into(),
                    symbol: "B".into(),
                    name: "B".into(),
                    parameter_ids: vec!["p3".into()],
                    formula: FormulaTag::ArithmeticMean.into(),
                    weight: 0.5,
                },
            ],
            ..CompositeFormula {
                tag: FormulaTag::CcviComposite,
                label: "Y".into(),
                sub_indices: vec![],
                combine: CombineMethod::WeightedSum,
                expression: None,
            }
        }));
        assert_eq!(outer.parameter_ids(), vec!["p1", "p2", "p3"]);
        assert_eq!(outer.depth(), 3);
        assert!(outer.is_weighted());
    }
}
