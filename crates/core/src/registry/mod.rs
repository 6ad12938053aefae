//! Parameter and index registry.
//!
//! A [`Registry`] owns the parameter and index catalogs and is passed
//! explicitly to whatever needs them. Referential integrity is checked once,
//! at construction, so every lookup afterwards can trust the catalog.

mod indices;
mod parameters;

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::formula::{CombineMethod, CompositeFormula, Formula, FormulaTag};
use crate::index::CoastalIndex;
use crate::parameter::{Parameter, Scoring};

/// Tolerance for catalog weight sums
const WEIGHT_EPSILON: f64 = 1e-6;

/// Immutable lookup tables over parameters and indices
#[derive(Debug, Clone)]
pub struct Registry {
    parameters: Vec<Parameter>,
    indices: Vec<CoastalIndex>,
    parameter_pos: HashMap<String, usize>,
    alias_pos: HashMap<String, usize>,
    index_pos: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, validating the catalogs.
    ///
    /// # Errors
    ///
    /// [`Error::RegistryIntegrity`] naming the first offending parameter or index.
    pub fn new(parameters: Vec<Parameter>, indices: Vec<CoastalIndex>) -> Result<Self> {
        let mut parameter_pos = HashMap::with_capacity(parameters.len());
        for (i, p) in parameters.iter().enumerate() {
            if parameter_pos.insert(p.id.clone(), i).is_some() {
                return Err(Error::integrity(&p.id, "duplicate parameter id"));
            }
        }

        let mut alias_pos: HashMap<String, usize> = HashMap::new();
        for (i, p) in parameters.iter().enumerate() {
            for alias in &p.aliases {
                if parameter_pos.get(alias).is_some_and(|&owner| owner != i) {
                    return Err(Error::integrity(&p.id, format!("alias {alias} is another parameter's id")));
                }
                if let Some(&owner) = alias_pos.get(alias) {
                    if owner != i {
                        return Err(Error::integrity(
                            &p.id,
                            format!("alias {alias} already belongs to {}", parameters[owner].id),
                        ));
                    }
                }
                alias_pos.insert(alias.clone(), i);
            }
            validate_parameter(p)?;
        }

        let mut index_pos = HashMap::with_capacity(indices.len());
        for (i, index) in indices.iter().enumerate() {
            if index_pos.insert(index.id.clone(), i).is_some() {
                return Err(Error::integrity(&index.id, "duplicate index id"));
            }
            validate_index(index, &parameter_pos)?;
        }

        Ok(Self {
            parameters,
            indices,
            parameter_pos,
            alias_pos,
            index_pos,
        })
    }

    /// The standard catalogs
    pub fn standard() -> Result<Self> {
        Self::new(parameters::standard_parameters(), indices::standard_indices())
    }

    pub fn parameter(&self, id: &str) -> Option<&Parameter> {
        self.parameter_pos.get(id).map(|&i| &self.parameters[i])
    }

    /// Resolve a name to its canonical parameter, trying ids before aliases
    pub fn parameter_by_alias(&self, name: &str) -> Option<&Parameter> {
        self.parameter(name)
            .or_else(|| self.alias_pos.get(name).map(|&i| &self.parameters[i]))
    }

    pub fn index(&self, id: &str) -> Option<&CoastalIndex> {
        self.index_pos.get(id).map(|&i| &self.indices[i])
    }

    /// Parameters in catalog order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Indices in registry order
    pub fn indices(&self) -> &[CoastalIndex] {
        &self.indices
    }

    /// Full formula for a tag: composite tags expand to their trees
    pub fn formula_for_tag(&self, tag: FormulaTag) -> Formula {
        match indices::composite_formula(tag) {
            Some(tree) => Formula::Composite(Box::new(tree)),
            None => Formula::Atomic(tag),
        }
    }

    /// An index's parameters, enabled and carrying the index's default weights
    pub fn parameters_for_index(&self, id: &str) -> Result<Vec<Parameter>> {
        let index = self.index(id).ok_or_else(|| Error::UnknownIndex(id.to_string()))?;
        index
            .parameter_ids
            .iter()
            .map(|pid| {
                let mut p = self
                    .parameter(pid)
                    .cloned()
                    .ok_or_else(|| Error::UnknownParameter(pid.clone()))?;
                p.weight = index.default_weight(pid).unwrap_or(0.0);
                p.enabled = true;
                Ok(p)
            })
            .collect()
    }
}

fn validate_parameter(p: &Parameter) -> Result<()> {
    if !(0.0..=1.0).contains(&p.weight) {
        return Err(Error::integrity(&p.id, format!("weight {} outside 0..1", p.weight)));
    }
    match &p.scoring {
        Scoring::Ranges(ranges) => {
            if ranges.is_empty() {
                return Err(Error::integrity(&p.id, "no vulnerability ranges"));
            }
            for r in ranges {
                if !p.scale.contains(r.value) {
                    return Err(Error::integrity(
                        &p.id,
                        format!("score {} outside the {} scale", r.value, p.scale.label()),
                    ));
                }
            }
            check_partition(p)?;
        }
        Scoring::Options(options) => {
            if options.is_empty() {
                return Err(Error::integrity(&p.id, "no categorical options"));
            }
            let mut seen = HashSet::new();
            for o in options {
                if !seen.insert(o.value.as_str()) {
                    return Err(Error::integrity(&p.id, format!("duplicate option {}", o.value)));
                }
                if !p.scale.contains(o.vulnerability) {
                    return Err(Error::integrity(
                        &p.id,
                        format!("score {} outside the {} scale", o.vulnerability, p.scale.label()),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Ranges must tile the real line: unbounded at both ends, each max meeting the next min
fn check_partition(p: &Parameter) -> Result<()> {
    let mut bounds: Vec<(f64, f64)> = p
        .ranges()
        .iter()
        .map(|r| (r.min.unwrap_or(f64::NEG_INFINITY), r.max.unwrap_or(f64::INFINITY)))
        .collect();
    bounds.sort_by(|a, b| a.0.total_cmp(&b.0));

    let first = bounds.first().map_or(f64::NAN, |b| b.0);
    let last = bounds.last().map_or(f64::NAN, |b| b.1);
    if first != f64::NEG_INFINITY || last != f64::INFINITY {
        return Err(Error::integrity(&p.id, "ranges do not cover the real line"));
    }
    for pair in bounds.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if lo.0 >= lo.1 {
            return Err(Error::integrity(&p.id, format!("empty range [{}, {})", lo.0, lo.1)));
        }
        if lo.1 != hi.0 {
            let what = if lo.1 < hi.0 { "gap" } else { "overlap" };
            return Err(Error::integrity(&p.id, format!("{what} between {} and {}", lo.1, hi.0)));
        }
    }
    Ok(())
}

fn validate_index(index: &CoastalIndex, parameter_pos: &HashMap<String, usize>) -> Result<()> {
    let signature: HashSet<&str> = index.parameter_ids.iter().map(String::as_str).collect();
    if signature.len() != index.parameter_ids.len() {
        return Err(Error::integrity(&index.id, "duplicate parameter in signature"));
    }
    for pid in &index.parameter_ids {
        if !parameter_pos.contains_key(pid) {
            return Err(Error::integrity(&index.id, format!("unknown parameter {pid}")));
        }
    }

    for key in index.default_weights.keys() {
        if !signature.contains(key.as_str()) {
            return Err(Error::integrity(&index.id, format!("default weight for {key} outside the signature")));
        }
    }
    let total = index.total_default_weight();
    if (total - 1.0).abs() > WEIGHT_EPSILON {
        return Err(Error::integrity(&index.id, format!("default weights sum to {total:.6}")));
    }

    match &index.formula {
        Formula::Atomic(tag) if tag.is_composite() => Err(Error::integrity(
            &index.id,
            format!("composite tag {tag} used as an atomic formula"),
        )),
        Formula::Atomic(_) => Ok(()),
        Formula::Composite(tree) => {
            for pid in index.formula.parameter_ids() {
                if !signature.contains(pid) {
                    return Err(Error::integrity(&index.id, format!("sub-index parameter {pid} outside the signature")));
                }
            }
            validate_tree(&index.id, tree, true)
        }
    }
}

fn validate_tree(owner: &str, tree: &CompositeFormula, top_level: bool) -> Result<()> {
    if tree.sub_indices.is_empty() {
        return Err(Error::integrity(owner, format!("composite {} has no sub-indices", tree.label)));
    }
    if let CombineMethod::Custom(custom) = tree.combine {
        if custom.arity() != tree.sub_indices.len() {
            return Err(Error::integrity(
                owner,
                format!(
                    "{} combines {} sub-indices, expects {}",
                    custom.expression(),
                    tree.sub_indices.len(),
                    custom.arity()
                ),
            ));
        }
    }
    if top_level {
        let total: f64 = tree.sub_indices.iter().map(|s| s.weight).sum();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(Error::integrity(owner, format!("sub-index weights sum to {total:.6}")));
        }
    }
    for sub in &tree.sub_indices {
        match &sub.formula {
            Formula::Atomic(tag) if tag.is_composite() => {
                return Err(Error::integrity(owner, format!("sub-index {} uses composite tag {tag}", sub.id)));
            }
            Formula::Atomic(_) => {}
            Formula::Composite(inner) => validate_tree(owner, inner, false)?,
        }
        if sub.parameter_ids.is_empty() && matches!(sub.formula, Formula::Atomic(_)) {
            return Err(Error::integrity(owner, format!("sub-index {} has no parameters", sub.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{FormulaFamily, SubIndex};
    use crate::parameter::VulnerabilityScale;

    fn standard() -> Registry {
        Registry::standard().unwrap()
    }

    #[test]
    fn test_standard_catalog_is_consistent() {
        let registry = standard();
        assert_eq!(registry.parameters().len(), 54);
        assert_eq!(registry.indices().len(), 18);
        assert_eq!(registry.indices()[0].short_name, "CVI");
    }

    #[test]
    fn test_lookup_by_id_and_alias() {
        let registry = standard();
        let by_id = registry.parameter("coastal_slope").unwrap();
        assert_eq!(by_id.scale, VulnerabilityScale::Ordinal);

        let by_alias = registry.parameter_by_alias("income_sources").unwrap();
        assert_eq!(by_alias.id, "livelihood_strategies");
        assert!(registry.parameter_by_alias("no_such_thing").is_none());
        assert!(registry.parameter("income_sources").is_none());
    }

    #[test]
    fn test_every_alias_resolves_to_its_owner() {
        let registry = standard();
        for p in registry.parameters() {
            for alias in &p.aliases {
                assert_eq!(registry.parameter_by_alias(alias).unwrap().id, p.id, "alias {alias}");
            }
        }
    }

    #[test]
    fn test_parameters_for_index_apply_default_weights() {
        let registry = standard();
        let params = registry.parameters_for_index("cvi-thieler-1999").unwrap();
        assert_eq!(params.len(), 6);
        assert!(params.iter().all(|p| p.enabled));
        let total: f64 = params.iter().map(|p| p.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);

        assert!(matches!(
            registry.parameters_for_index("nope"),
            Err(Error::UnknownIndex(_))
        ));
    }

    #[test]
    fn test_formula_for_tag_expands_composites() {
        let registry = standard();
        assert_eq!(registry.formula_for_tag(FormulaTag::Traditional), Formula::Atomic(FormulaTag::Traditional));

        let lvi = registry.formula_for_tag(FormulaTag::Lvi);
        match &lvi {
            Formula::Composite(tree) => {
                assert_eq!(tree.sub_indices.len(), 3);
                assert!(matches!(tree.combine, CombineMethod::Custom(_)));
            }
            Formula::Atomic(_) => panic!("LVI should expand"),
        }
        for tag in FormulaTag::ALL {
            let formula = registry.formula_for_tag(tag);
            assert_eq!(formula.tag(), tag);
            assert_eq!(tag.is_composite(), matches!(formula, Formula::Composite(_)));
            assert_eq!(tag.family().is_some(), !tag.is_composite());
        }
        assert_eq!(FormulaTag::Pcvi.family(), Some(FormulaFamily::Additive));
    }

    #[test]
    fn test_composite_signatures_cover_sub_indices() {
        let registry = standard();
        let ccvi = registry.index("ccvi-kantamaneni-2024").unwrap();
        assert_eq!(ccvi.parameter_ids.len(), 10);
        assert!(ccvi.contains_parameter("sea_defences"));
        assert!(ccvi.contains_parameter("commercial_properties"));
    }

    #[test]
    fn test_rejects_unknown_parameter_reference() {
        let mut indices = indices::standard_indices();
        indices[0].parameter_ids.push("not_a_parameter".into());
        let err = Registry::new(parameters::standard_parameters(), indices).unwrap_err();
        assert!(matches!(err, Error::RegistryIntegrity { ref owner, .. } if owner == "cvi-thieler-1999"));
    }

    #[test]
    fn test_rejects_alias_collision() {
        let mut params = parameters::standard_parameters();
        params[1].aliases.push("coastal_geomorphology".into());
        assert!(Registry::new(params, indices::standard_indices()).is_err());

        let mut params = parameters::standard_parameters();
        let taken = params[0].aliases[0].clone();
        params[2].aliases.push(taken);
        assert!(Registry::new(params, indices::standard_indices()).is_err());
    }

    #[test]
    fn test_rejects_range_gap() {
        let mut params = parameters::standard_parameters();
        let slope = params.iter_mut().find(|p| p.id == "coastal_slope").unwrap();
        if let Scoring::Ranges(ranges) = &mut slope.scoring {
            ranges[1].min = Some(9.5);
        }
        let err = Registry::new(params, indices::standard_indices()).unwrap_err();
        assert!(err.to_string().contains("coastal_slope"));
    }

    #[test]
    fn test_rejects_bad_sub_index_weights() {
        let mut indices = indices::standard_indices();
        let icvi = indices.iter_mut().find(|i| i.id == "icvi-alcantara-2024").unwrap();
        if let Formula::Composite(tree) = &mut icvi.formula {
            tree.sub_indices[0].weight = 0.7;
        }
        assert!(Registry::new(parameters::standard_parameters(), indices).is_err());
    }

    #[test]
    fn test_rejects_custom_arity_mismatch() {
        let mut indices = indices::standard_indices();
        let lvi = indices.iter_mut().find(|i| i.id == "lvi-mudasser-2020").unwrap();
        if let Formula::Composite(tree) = &mut lvi.formula {
            let dropped: SubIndex = tree.sub_indices.pop().unwrap();
            tree.sub_indices[0].weight += dropped.weight;
        }
        let err = Registry::new(parameters::standard_parameters(), indices).unwrap_err();
        assert!(err.to_string().contains("expects 3"));
    }
}
