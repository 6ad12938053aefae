//! Named, citeable coastal vulnerability index definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::formula::Formula;

/// Role an index plays in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexKind {
    /// Computed directly from parameter scores
    TrueIndex,
    /// Computed from sub-indices that are not published on their own
    CompositeIndex,
    /// A sub-index of a larger composite
    CompositeComponent,
    /// Combination of published component indices
    Composite,
}

/// A published index: which parameters it uses, their default weights and its formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastalIndex {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    pub kind: IndexKind,
    /// Signature: ordered parameter ids
    pub parameter_ids: Vec<String>,
    /// Default weight per parameter id, summing to 1
    pub default_weights: BTreeMap<String, f64>,
    pub formula: Formula,
}

impl CoastalIndex {
    pub fn contains_parameter(&self, id: &str) -> bool {
        self.parameter_ids.iter().any(|p| p == id)
    }

    pub fn default_weight(&self, id: &str) -> Option<f64> {
        self.default_weights.get(id).copied()
    }

    pub fn total_default_weight(&self) -> f64 {
        self.default_weights.values().sum()
    }
}
