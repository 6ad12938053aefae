//! Measurable coastal parameters and their vulnerability scoring.
//!
//! A [`Parameter`] maps a raw physical or socioeconomic measurement onto a
//! vulnerability score, either through half-open numeric ranges or through
//! a table of categorical codes. Scores live on one of two scales:
//! the classic 1–5 ordinal ranking or the 0–1 scale used by the ICVI family.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Thematic grouping of parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterCategory {
    Physical,
    Hydroclimate,
    Environmental,
    Socioeconomic,
    Shoreline,
    Infrastructure,
}

/// Whether a parameter is scored from a number or from a discrete code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParameterKind {
    Numerical,
    Categorical,
}

/// Scale a vulnerability score is expressed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VulnerabilityScale {
    /// 1 (very low) to 5 (very high)
    #[default]
    Ordinal,
    /// 0 (very low) to 1 (very high)
    Unit,
}

impl VulnerabilityScale {
    /// Inclusive `(min, max)` bounds of the scale
    pub fn bounds(self) -> (f64, f64) {
        match self {
            VulnerabilityScale::Ordinal => (1.0, 5.0),
            VulnerabilityScale::Unit => (0.0, 1.0),
        }
    }

    pub fn contains(self, score: f64) -> bool {
        let (lo, hi) = self.bounds();
        score >= lo && score <= hi
    }

    /// Clamp a score into the scale. NaN is passed through unchanged.
    pub fn clamp(self, score: f64) -> f64 {
        let (lo, hi) = self.bounds();
        if score.is_nan() {
            score
        } else {
            score.clamp(lo, hi)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VulnerabilityScale::Ordinal => "1-5",
            VulnerabilityScale::Unit => "0-1",
        }
    }
}

/// Colors for the five vulnerability classes, very low to very high
pub const VULNERABILITY_COLORS: [&str; 5] = ["#1a9850", "#91cf60", "#fee08b", "#fc8d59", "#d73027"];

/// A numeric class mapping `[min, max)` to a vulnerability score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRange {
    /// Lower bound (inclusive); `None` is unbounded
    pub min: Option<f64>,
    /// Upper bound (exclusive); `None` is unbounded
    pub max: Option<f64>,
    /// Vulnerability score for this class
    pub value: f64,
    pub label: String,
    pub color: String,
}

impl VulnerabilityRange {
    /// Whether `x` falls inside `[min, max)`
    pub fn contains(&self, x: f64) -> bool {
        self.min.map_or(true, |m| x >= m) && self.max.map_or(true, |m| x < m)
    }
}

/// A discrete code and the score it maps to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalOption {
    pub value: String,
    pub label: String,
    pub vulnerability: f64,
    pub color: String,
}

/// How raw values become vulnerability scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scoring {
    Ranges(Vec<VulnerabilityRange>),
    Options(Vec<CategoricalOption>),
}

/// A named, typed measurable quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ParameterCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub scale: VulnerabilityScale,
    /// Default relative contribution (0..1)
    pub weight: f64,
    /// Whether the parameter is currently included in a computation
    pub enabled: bool,
    /// Names the same quantity goes by in other published indices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub scoring: Scoring,
}

impl Parameter {
    pub fn kind(&self) -> ParameterKind {
        match self.scoring {
            Scoring::Ranges(_) => ParameterKind::Numerical,
            Scoring::Options(_) => ParameterKind::Categorical,
        }
    }

    /// Numeric classes (empty for categorical parameters)
    pub fn ranges(&self) -> &[VulnerabilityRange] {
        match &self.scoring {
            Scoring::Ranges(r) => r,
            Scoring::Options(_) => &[],
        }
    }

    /// Categorical options (empty for numerical parameters)
    pub fn options(&self) -> &[CategoricalOption] {
        match &self.scoring {
            Scoring::Options(o) => o,
            Scoring::Ranges(_) => &[],
        }
    }

    /// Whether `name` is this parameter's id or one of its aliases
    pub fn answers_to(&self, name: &str) -> bool {
        self.id == name || self.aliases.iter().any(|a| a == name)
    }

    /// Look up the score for a raw numeric value.
    ///
    /// Classes are half-open `[min, max)`. A value sitting exactly on the
    /// finite upper bound of the top class still belongs to that class.
    pub fn vulnerability_for_value(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let ranges = self.ranges();
        ranges
            .iter()
            .find(|r| r.contains(value))
            .or_else(|| {
                ranges
                    .iter()
                    .find(|r| r.max.is_some_and(|m| (value - m).abs() < 1e-10))
            })
            .map(|r| r.value)
    }

    /// Look up the score for a categorical code (exact match, then case-insensitive)
    pub fn vulnerability_for_option(&self, code: &str) -> Option<f64> {
        let options = self.options();
        options
            .iter()
            .find(|o| o.value == code)
            .or_else(|| options.iter().find(|o| o.value.eq_ignore_ascii_case(code)))
            .map(|o| o.vulnerability)
    }

    /// Score a raw numeric measurement into a [`ParameterValue`]
    pub fn score_numeric(&self, value: f64) -> Result<ParameterValue> {
        if self.kind() != ParameterKind::Numerical {
            return Err(Error::InvalidParameter {
                name: "value",
                value: value.to_string(),
                reason: format!("{} is categorical and needs an option code", self.id),
            });
        }
        let vulnerability = self
            .vulnerability_for_value(value)
            .ok_or_else(|| Error::InvalidParameter {
                name: "value",
                value: value.to_string(),
                reason: format!("no vulnerability class of {} contains it", self.id),
            })?;
        Ok(ParameterValue::Numerical {
            value,
            vulnerability,
        })
    }

    /// Score a categorical code into a [`ParameterValue`]
    pub fn score_category(&self, code: &str) -> Result<ParameterValue> {
        if self.kind() != ParameterKind::Categorical {
            return Err(Error::InvalidParameter {
                name: "value",
                value: code.to_string(),
                reason: format!("{} is numerical and needs a number", self.id),
            });
        }
        let vulnerability = self
            .vulnerability_for_option(code)
            .ok_or_else(|| Error::InvalidParameter {
                name: "value",
                value: code.to_string(),
                reason: format!("not an option of {}", self.id),
            })?;
        Ok(ParameterValue::Categorical {
            value: code.to_string(),
            vulnerability,
        })
    }
}

/// A value assigned to a segment together with its vulnerability score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ParameterValue {
    Numerical { value: f64, vulnerability: f64 },
    Categorical { value: String, vulnerability: f64 },
}

impl ParameterValue {
    pub fn vulnerability(&self) -> f64 {
        match self {
            ParameterValue::Numerical { vulnerability, .. }
            | ParameterValue::Categorical { vulnerability, .. } => *vulnerability,
        }
    }

    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Numerical { .. } => ParameterKind::Numerical,
            ParameterValue::Categorical { .. } => ParameterKind::Categorical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slope() -> Parameter {
        let classes = [
            (Some(12.0), None, 1.0),
            (Some(9.0), Some(12.0), 2.0),
            (Some(6.0), Some(9.0), 3.0),
            (Some(3.0), Some(6.0), 4.0),
            (None, Some(3.0), 5.0),
        ];
        Parameter {
            id: "coastal_slope".into(),
            name: "Coastal Slope".into(),
            description: String::new(),
            category: ParameterCategory::Physical,
            unit: Some("%".into()),
            scale: VulnerabilityScale::Ordinal,
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: vec!["slope".into()],
            scoring: Scoring::Ranges(
                classes
                    .iter()
                    .map(|&(min, max, value)| VulnerabilityRange {
                        min,
                        max,
                        value,
                        label: String::new(),
                        color: String::new(),
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_range_lookup_half_open() {
        let p = slope();
        assert_eq!(p.vulnerability_for_value(12.0), Some(1.0));
        assert_eq!(p.vulnerability_for_value(11.99), Some(2.0));
        assert_eq!(p.vulnerability_for_value(3.0), Some(4.0));
        assert_eq!(p.vulnerability_for_value(-40.0), Some(5.0));
        assert_eq!(p.vulnerability_for_value(f64::NAN), None);
    }

    #[test]
    fn test_score_numeric_rejects_categorical_input() {
        let p = slope();
        let v = p.score_numeric(7.5).unwrap();
        assert_eq!(v.vulnerability(), 3.0);
        assert!(p.score_category("rocky_cliffs").is_err());
    }

    #[test]
    fn test_categorical_lookup() {
        let p = Parameter {
            scoring: Scoring::Options(vec![CategoricalOption {
                value: "rocky_cliffs".into(),
                label: "Rocky cliffs".into(),
                vulnerability: 1.0,
                color: VULNERABILITY_COLORS[0].into(),
            }]),
            ..slope()
        };
        assert_eq!(p.kind(), ParameterKind::Categorical);
        assert_eq!(p.vulnerability_for_option("ROCKY_CLIFFS"), Some(1.0));
        assert_eq!(p.vulnerability_for_option("sand"), None);
        assert!(p.score_numeric(1.0).is_err());
    }

    #[test]
    fn test_scale_clamp() {
        assert_eq!(VulnerabilityScale::Ordinal.clamp(7.0), 5.0);
        assert_eq!(VulnerabilityScale::Ordinal.clamp(0.2), 1.0);
        assert_eq!(VulnerabilityScale::Unit.clamp(1.4), 1.0);
        assert!(VulnerabilityScale::Unit.contains(0.25));
        assert!(!VulnerabilityScale::Ordinal.contains(0.25));
    }

    #[test]
    fn test_parameter_value_serde_tag() {
        let v = ParameterValue::Categorical {
            value: "low_cliffs".into(),
            vulnerability: 3.0,
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"type\":\"categorical\""), "{}", json);
        let back: ParameterValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
