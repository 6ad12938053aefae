//! Aggregate statistics over scored segments

use coastcvi_core::parameter::{VulnerabilityScale, VULNERABILITY_COLORS};
use serde::{Deserialize, Serialize};

/// Lower bounds of the low..very high classes on the 0–1 scale
const UNIT_BREAKS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Five-level vulnerability classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VulnerabilityCategory {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl VulnerabilityCategory {
    pub const ALL: [VulnerabilityCategory; 5] = [
        VulnerabilityCategory::VeryLow,
        VulnerabilityCategory::Low,
        VulnerabilityCategory::Moderate,
        VulnerabilityCategory::High,
        VulnerabilityCategory::VeryHigh,
    ];

    fn from_rank(rank: usize) -> Self {
        Self::ALL[rank.min(4)]
    }

    /// Classify a result on `scale`.
    ///
    /// Unit results fall into `[0, .2) .. [.8, 1]`; ordinal results are
    /// rounded to the nearest integer rank and clamped into 1–5.
    pub fn classify(value: f64, scale: VulnerabilityScale) -> Self {
        match scale {
            VulnerabilityScale::Unit => {
                let rank = UNIT_BREAKS.iter().filter(|&&b| value >= b).count();
                Self::from_rank(rank)
            }
            VulnerabilityScale::Ordinal => {
                let rank = value.round().clamp(1.0, 5.0) as usize;
                Self::from_rank(rank.saturating_sub(1))
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VulnerabilityCategory::VeryLow => "Very Low",
            VulnerabilityCategory::Low => "Low",
            VulnerabilityCategory::Moderate => "Moderate",
            VulnerabilityCategory::High => "High",
            VulnerabilityCategory::VeryHigh => "Very High",
        }
    }

    pub fn color(self) -> &'static str {
        VULNERABILITY_COLORS[self as usize]
    }
}

/// Summary of one calculation's scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Scale the buckets were drawn on
    pub scale: VulnerabilityScale,
    /// Segment counts per category, very low first
    pub categories: [usize; 5],
}

impl VulnerabilityStatistics {
    pub fn count_for(&self, category: VulnerabilityCategory) -> usize {
        self.categories[category as usize]
    }
}

/// Min, max, mean and category counts; `None` when nothing was scored
pub fn compute_statistics(values: &[f64], scale: VulnerabilityScale) -> Option<VulnerabilityStatistics> {
    if values.is_empty() {
        return None;
    }
    let mut categories = [0usize; 5];
    for &v in values {
        categories[VulnerabilityCategory::classify(v, scale) as usize] += 1;
    }
    Some(VulnerabilityStatistics {
        count: values.len(),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        mean: values.iter().sum::<f64>() / values.len() as f64,
        scale,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_buckets() {
        use VulnerabilityCategory::*;
        let unit = VulnerabilityScale::Unit;
        assert_eq!(VulnerabilityCategory::classify(0.0, unit), VeryLow);
        assert_eq!(VulnerabilityCategory::classify(0.19, unit), VeryLow);
        assert_eq!(VulnerabilityCategory::classify(0.2, unit), Low);
        assert_eq!(VulnerabilityCategory::classify(0.59, unit), Moderate);
        assert_eq!(VulnerabilityCategory::classify(0.6, unit), High);
        assert_eq!(VulnerabilityCategory::classify(0.8, unit), VeryHigh);
        assert_eq!(VulnerabilityCategory::classify(1.0, unit), VeryHigh);
    }

    #[test]
    fn test_ordinal_buckets_round_and_clamp() {
        use VulnerabilityCategory::*;
        let ordinal = VulnerabilityScale::Ordinal;
        assert_eq!(VulnerabilityCategory::classify(1.2, ordinal), VeryLow);
        assert_eq!(VulnerabilityCategory::classify(2.5, ordinal), Moderate);
        assert_eq!(VulnerabilityCategory::classify(0.4, ordinal), VeryLow);
        assert_eq!(VulnerabilityCategory::classify(9.8, ordinal), VeryHigh);
    }

    #[test]
    fn test_statistics() {
        let stats = compute_statistics(&[1.0, 3.0, 5.0, 4.6], VulnerabilityScale::Ordinal).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert!((stats.mean - 3.4).abs() < 1e-12);
        assert_eq!(stats.categories, [1, 0, 1, 0, 2]);
        assert_eq!(stats.count_for(VulnerabilityCategory::VeryHigh), 2);
        assert!(compute_statistics(&[], VulnerabilityScale::Unit).is_none());
    }
}
