//! Standard index catalog and the composite trees behind composite formula tags

use std::collections::BTreeMap;

use crate::formula::{CombineMethod, CompositeFormula, CustomCombination, Formula, FormulaTag, SubIndex};
use crate::index::{CoastalIndex, IndexKind};

const ALCANTARA_2024: &str = "Alcántara-Carrió, J., García Echavarría, L. M., & Jaramillo-Vélez, A. (2024)";
const KANTAMANENI_2024: &str = "Kantamaneni, K., Xing, L., Gupta, V., & Campos, L. C. (2024)";

const CVI_PARAMETERS: [&str; 6] = [
    "coastal_geomorphology",
    "coastal_slope",
    "sea_level_change",
    "shoreline_change",
    "mean_tide_range",
    "mean_wave_height",
];
const EVI_PARAMETERS: [&str; 6] = [
    "coastal_geomorphology",
    "coastal_slope",
    "shoreline_change",
    "ecosystem_type",
    "environmental_conservancy",
    "interest_species",
];
const SVI_PARAMETERS: [&str; 5] = [
    "use_of_territory",
    "building_coast_ratio",
    "population_density",
    "economic_value",
    "sociocultural_heritage",
];
const ICVI_RANKED_EVI: [&str; 6] = [
    "icvi_geomorphological_features",
    "icvi_slope",
    "icvi_shoreline_migration",
    "icvi_ecosystem_type",
    "icvi_conservation_measures",
    "icvi_species_interest",
];
const ICVI_RANKED_SVI: [&str; 6] = [
    "icvi_land_use",
    "icvi_building_coast_ratio",
    "icvi_population_density",
    "icvi_economic_activity",
    "icvi_economic_value",
    "icvi_heritage",
];
const PCVI_PARAMETERS: [&str; 6] = [
    "beach_width",
    "dune_width",
    "coastal_slope",
    "vegetation_distance",
    "distance_built_structures",
    "sea_defences",
];
const ECVI_PARAMETERS: [&str; 4] = [
    "commercial_properties",
    "residential_properties",
    "economic_value",
    "population_density",
];
const CVI_SE_SOCIOECONOMIC: [&str; 4] = [
    "population_density",
    "economic_value",
    "infrastructure_density",
    "social_vulnerability",
];
const SEVI_PARAMETERS: [&str; 9] = [
    "livelihood_strategies",
    "food_security",
    "water_security",
    "population_density",
    "economic_value",
    "social_vulnerability",
    "household_composition",
    "infrastructure_density",
    "cultural_heritage",
];
const GCVI_GS: [&str; 2] = ["coastal_geotechnical_map", "median_grain_size"];
const GCVI_CS: [&str; 2] = ["coastal_slope", "posidonia_oceanica"];
const GCVI_HS: [&str; 3] = ["sea_level_change", "mean_tide_range", "mean_wave_height"];

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Split `total` evenly over `list`
fn spread(list: &[&str], total: f64, into: &mut BTreeMap<String, f64>) {
    let share = total / list.len() as f64;
    for id in list {
        into.insert(id.to_string(), share);
    }
}

fn equal_weights(list: &[&str]) -> BTreeMap<String, f64> {
    let mut weights = BTreeMap::new();
    spread(list, 1.0, &mut weights);
    weights
}

/// Default weights that give each sub-index its share, split evenly inside it
fn weights_from_subs(subs: &[SubIndex]) -> BTreeMap<String, f64> {
    let mut weights = BTreeMap::new();
    for sub in subs {
        let list: Vec<&str> = sub.parameter_ids.iter().map(String::as_str).collect();
        spread(&list, sub.weight, &mut weights);
    }
    weights
}

fn sub(id: &str, symbol: &str, name: &str, params: &[&str], formula: impl Into<Formula>, weight: f64) -> SubIndex {
    SubIndex {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        parameter_ids: ids(params),
        formula: formula.into(),
        weight,
    }
}

fn icvi_composite() -> CompositeFormula {
    CompositeFormula {
        tag: FormulaTag::IcviComposite,
        label: "ICVI".into(),
        sub_indices: vec![
            sub("evi", "EVI", "Environmental Vulnerability Index", &EVI_PARAMETERS, FormulaTag::IcviEvi, 0.5),
            sub("svi", "SVI", "Socioeconomic Vulnerability Index", &SVI_PARAMETERS, FormulaTag::IcviSvi, 0.5),
        ],
        combine: CombineMethod::ArithmeticMean,
        expression: Some("(EVI + SVI)/2".into()),
    }
}

/// ICVI over the 0.1–0.9 ranked parameters, each component averaged with `component`
fn icvi_ranked(tag: FormulaTag, component: FormulaTag) -> CompositeFormula {
    CompositeFormula {
        tag,
        label: "ICVI".into(),
        sub_indices: vec![
            sub("evi", "EVI", "Environmental Vulnerability Index", &ICVI_RANKED_EVI, component, 0.5),
            sub("svi", "SVI", "Socioeconomic Vulnerability Index", &ICVI_RANKED_SVI, component, 0.5),
        ],
        combine: CombineMethod::ArithmeticMean,
        expression: Some("(EVI + SVI)/2".into()),
    }
}

fn ccvi() -> CompositeFormula {
    CompositeFormula {
        tag: FormulaTag::CcviComposite,
        label: "CCVI".into(),
        sub_indices: vec![
            sub("pcvi", "PCVI", "Physical Coastal Vulnerability Index", &PCVI_PARAMETERS, FormulaTag::Pcvi, 0.5),
            sub("ecvi", "ECVI", "Economic Coastal Vulnerability Index", &ECVI_PARAMETERS, FormulaTag::Ecvi, 0.5),
        ],
        combine: CombineMethod::ArithmeticMean,
        expression: Some("(PCVI + ECVI)/2".into()),
    }
}

fn cvi_se() -> CompositeFormula {
    CompositeFormula {
        tag: FormulaTag::CviSe,
        label: "CVI-SE".into(),
        sub_indices: vec![
            sub("physical_cvi", "Physical CVI", "Physical CVI", &CVI_PARAMETERS, FormulaTag::Traditional, 0.6),
            sub(
                "socioeconomic_vi",
                "Socioeconomic VI",
                "Socioeconomic Vulnerability",
                &CVI_SE_SOCIOECONOMIC,
                FormulaTag::ArithmeticMean,
                0.4,
            ),
        ],
        combine: CombineMethod::WeightedSum,
        expression: Some("0.6×Physical CVI + 0.4×Socioeconomic VI".into()),
    }
}

fn sovi() -> CompositeFormula {
    let mean = FormulaTag::ArithmeticMean;
    CompositeFormula {
        tag: FormulaTag::Sovi,
        label: "SoVI".into(),
        sub_indices: vec![
            sub("socioeconomic_status", "SES", "Socioeconomic Status", &["economic_value", "population_density"], mean, 0.25),
            sub("household_composition", "HCD", "Household Composition & Disability", &["household_composition"], mean, 0.125),
            sub("minority_language", "MSL", "Minority Status & Language", &["minority_status"], mean, 0.125),
            sub("housing_transportation", "HTT", "Housing Type & Transportation", &["housing_type"], mean, 0.125),
            sub("age_factors", "AGE", "Age Demographics", &["age_demographics"], mean, 0.125),
            sub(
                "infrastructure_factors",
                "INF",
                "Infrastructure & Development",
                &["infrastructure_density", "land_use"],
                mean,
                0.25,
            ),
        ],
        combine: CombineMethod::WeightedSum,
        expression: Some("weighted sum of factor scores".into()),
    }
}

fn lvi() -> CompositeFormula {
    let mean = FormulaTag::ArithmeticMean;
    CompositeFormula {
        tag: FormulaTag::Lvi,
        label: "LVI".into(),
        sub_indices: vec![
            sub(
                "exposure",
                "Exposure",
                "Exposure",
                &["sea_level_change", "mean_wave_height", "shoreline_change"],
                mean,
                0.33,
            ),
            sub(
                "sensitivity",
                "Sensitivity",
                "Sensitivity",
                &["livelihood_strategies", "food_security", "water_security", "population_density"],
                mean,
                0.33,
            ),
            sub(
                "adaptive_capacity",
                "Adaptive Capacity",
                "Adaptive Capacity",
                &["economic_value", "infrastructure_density", "social_vulnerability"],
                mean,
                0.34,
            ),
        ],
        combine: CombineMethod::Custom(CustomCombination::ExposureSensitivityAdaptive),
        expression: Some("(Exposure + Sensitivity - Adaptive Capacity)/3".into()),
    }
}

fn integrated_cvi() -> CompositeFormula {
    CompositeFormula {
        tag: FormulaTag::IntegratedCvi,
        label: "Integrated CVI".into(),
        sub_indices: vec![
            sub(
                "physical_vulnerability",
                "Physical",
                "Physical Vulnerability",
                &[
                    "coastal_geomorphology",
                    "coastal_slope",
                    "coastal_elevation",
                    "sea_level_change",
                    "shoreline_change",
                    "mean_wave_height",
                    "mean_tide_range",
                ],
                FormulaTag::GeometricMean,
                0.4,
            ),
            sub(
                "social_vulnerability",
                "Social",
                "Social Vulnerability",
                &["population_density", "age_demographics", "economic_value", "social_vulnerability"],
                FormulaTag::ArithmeticMean,
                0.3,
            ),
            sub(
                "environmental_vulnerability",
                "Environmental",
                "Environmental Vulnerability",
                &["land_use", "ecosystem_services", "vegetation_distance"],
                FormulaTag::ArithmeticMean,
                0.3,
            ),
        ],
        combine: CombineMethod::WeightedSum,
        expression: Some("0.4×Physical + 0.3×Social + 0.3×Environmental".into()),
    }
}

fn gcvi() -> CompositeFormula {
    let third = 1.0 / 3.0;
    CompositeFormula {
        tag: FormulaTag::GcviComposite,
        label: "GCVI".into(),
        sub_indices: vec![
            sub("gs", "GS", "Geological Subindex", &GCVI_GS, FormulaTag::GcviComponent, third),
            sub("cs", "CS", "Coastal Subindex", &GCVI_CS, FormulaTag::GcviComponent, third),
            sub("hs", "HS", "Hydrodynamic Subindex", &GCVI_HS, FormulaTag::GcviComponent, third),
        ],
        combine: CombineMethod::ArithmeticMean,
        expression: Some("(GS + CS + HS)/3".into()),
    }
}

/// Composite tree implementing a composite tag; `None` for atomic tags
pub(crate) fn composite_formula(tag: FormulaTag) -> Option<CompositeFormula> {
    match tag {
        FormulaTag::IcviComposite => Some(icvi_composite()),
        FormulaTag::IcviArithmetic => Some(icvi_ranked(FormulaTag::IcviArithmetic, FormulaTag::ArithmeticMean)),
        FormulaTag::IcviGeometric => Some(icvi_ranked(FormulaTag::IcviGeometric, FormulaTag::GeometricMean)),
        FormulaTag::CcviComposite => Some(ccvi()),
        FormulaTag::CviSe => Some(cvi_se()),
        FormulaTag::Sovi => Some(sovi()),
        FormulaTag::Lvi => Some(lvi()),
        FormulaTag::IntegratedCvi => Some(integrated_cvi()),
        FormulaTag::GcviComposite => Some(gcvi()),
        _ => None,
    }
}

struct Header {
    id: &'static str,
    name: &'static str,
    short_name: &'static str,
    description: &'static str,
    citation: Option<&'static str>,
    kind: IndexKind,
}

fn atomic(h: Header, params: &[&str], tag: FormulaTag) -> CoastalIndex {
    CoastalIndex {
        id: h.id.into(),
        name: h.name.into(),
        short_name: h.short_name.into(),
        description: h.description.into(),
        citation: h.citation.map(str::to_string),
        kind: h.kind,
        parameter_ids: ids(params),
        default_weights: equal_weights(params),
        formula: Formula::Atomic(tag),
    }
}

fn composite(h: Header, tree: CompositeFormula) -> CoastalIndex {
    let formula = Formula::Composite(Box::new(tree));
    let parameter_ids: Vec<String> = formula.parameter_ids().into_iter().map(str::to_string).collect();
    let default_weights = match &formula {
        Formula::Composite(c) => weights_from_subs(&c.sub_indices),
        Formula::Atomic(_) => BTreeMap::new(),
    };
    CoastalIndex {
        id: h.id.into(),
        name: h.name.into(),
        short_name: h.short_name.into(),
        description: h.description.into(),
        citation: h.citation.map(str::to_string),
        kind: h.kind,
        parameter_ids,
        default_weights,
        formula,
    }
}

/// Every standard index in registry order
pub(crate) fn standard_indices() -> Vec<CoastalIndex> {
    let mut rcvi_params = CVI_PARAMETERS.to_vec();
    rcvi_params.push("natural_protection");

    vec![
        atomic(
            Header {
                id: "cvi-thieler-1999",
                name: "Coastal Vulnerability Index (CVI)",
                short_name: "CVI",
                description: "Classic USGS index: square root of the product of six physical scores over their count",
                citation: Some("Thieler, E. R., & Hammar-Klose, E. S. (1999)"),
                kind: IndexKind::TrueIndex,
            },
            &CVI_PARAMETERS,
            FormulaTag::Traditional,
        ),
        atomic(
            Header {
                id: "rcvi-evelpidou-2025",
                name: "Revised Coastal Vulnerability Index (RCVI)",
                short_name: "RCVI",
                description: "CVI extended with the natural protection of the beach",
                citation: Some("Evelpidou, N., & Karkani, A. (2025)"),
                kind: IndexKind::TrueIndex,
            },
            &rcvi_params,
            FormulaTag::Traditional,
        ),
        atomic(
            Header {
                id: "evi-alcantara-2024",
                name: "Environmental Vulnerability Index (EVI)",
                short_name: "EVI",
                description: "Environmental component of the ICVI on the 0-1 scale",
                citation: Some(ALCANTARA_2024),
                kind: IndexKind::CompositeComponent,
            },
            &EVI_PARAMETERS,
            FormulaTag::IcviEvi,
        ),
        atomic(
            Header {
                id: "svi-alcantara-2024",
                name: "Socioeconomic Vulnerability Index (SVI)",
                short_name: "SVI",
                description: "Socioeconomic component of the ICVI on the 0-1 scale",
                citation: Some(ALCANTARA_2024),
                kind: IndexKind::CompositeComponent,
            },
            &SVI_PARAMETERS,
            FormulaTag::IcviSvi,
        ),
        composite(
            Header {
                id: "icvi-alcantara-2024",
                name: "Integrated Coastal Vulnerability Index (ICVI)",
                short_name: "ICVI",
                description: "Average of the environmental and socioeconomic vulnerability components",
                citation: Some(ALCANTARA_2024),
                kind: IndexKind::CompositeIndex,
            },
            icvi_composite(),
        ),
        composite(
            Header {
                id: "icvi-ranked-alcantara-2024",
                name: "Integrated Coastal Vulnerability Index, 0.1-0.9 ranking",
                short_name: "ICVI-R",
                description: "ICVI computed from twelve parameters ranked directly on the 0.1-0.9 scale",
                citation: Some(ALCANTARA_2024),
                kind: IndexKind::CompositeIndex,
            },
            icvi_ranked(FormulaTag::IcviArithmetic, FormulaTag::ArithmeticMean),
        ),
        atomic(
            Header {
                id: "pcvi-kantamaneni-2024",
                name: "Physical Coastal Vulnerability Index (PCVI)",
                short_name: "PCVI",
                description: "Sum of physical vulnerability scores",
                citation: Some(KANTAMANENI_2024),
                kind: IndexKind::CompositeComponent,
            },
            &PCVI_PARAMETERS,
            FormulaTag::Pcvi,
        ),
        atomic(
            Header {
                id: "ecvi-kantamaneni-2024",
                name: "Economic Coastal Vulnerability Index (ECVI)",
                short_name: "ECVI",
                description: "Sum of economic vulnerability scores",
                citation: Some(KANTAMANENI_2024),
                kind: IndexKind::CompositeComponent,
            },
            &ECVI_PARAMETERS,
            FormulaTag::Ecvi,
        ),
        composite(
            Header {
                id: "ccvi-kantamaneni-2024",
                name: "Combined Coastal Vulnerability Index (CCVI)",
                short_name: "CCVI",
                description: "Average of PCVI and ECVI",
                citation: Some(KANTAMANENI_2024),
                kind: IndexKind::Composite,
            },
            ccvi(),
        ),
        composite(
            Header {
                id: "cvi-se-szlafsztein-2007",
                name: "Socioeconomic Coastal Vulnerability Index (CVI-SE)",
                short_name: "CVI-SE",
                description: "Weighted blend of the physical CVI (60%) and socioeconomic vulnerability (40%)",
                citation: Some("Szlafsztein, C., & Sterr, H. (2007)"),
                kind: IndexKind::CompositeIndex,
            },
            cvi_se(),
        ),
        composite(
            Header {
                id: "sovi-cutter-2003",
                name: "Social Vulnerability Index (SoVI)",
                short_name: "SoVI",
                description: "Weighted sum of social vulnerability factor scores",
                citation: Some("Cutter, S. L., Boruff, B. J., & Shirley, W. L. (2003)"),
                kind: IndexKind::CompositeIndex,
            },
            sovi(),
        ),
        atomic(
            Header {
                id: "sevi",
                name: "Social-ecological Vulnerability Index (SeVI)",
                short_name: "SeVI",
                description: "Equal-weight mean over nine livelihood, resource and social domains",
                citation: None,
                kind: IndexKind::TrueIndex,
            },
            &SEVI_PARAMETERS,
            FormulaTag::Sevi,
        ),
        composite(
            Header {
                id: "lvi-mudasser-2020",
                name: "Livelihood Vulnerability Index (LVI)",
                short_name: "LVI",
                description: "IPCC framing: (Exposure + Sensitivity - Adaptive Capacity)/3",
                citation: Some("Mudasser, M., Hossain, M. Z., Rahaman, K. R., & Ha-Mim, N. M. (2020)"),
                kind: IndexKind::CompositeIndex,
            },
            lvi(),
        ),
        composite(
            Header {
                id: "integrated-cvi-tanim-2022",
                name: "Integrated Coastal Vulnerability Index",
                short_name: "Integrated CVI",
                description: "Physical (40%), social (30%) and environmental (30%) vulnerability",
                citation: Some("Tanim, A. H., Goharian, E., & Moradkhani, H. (2022)"),
                kind: IndexKind::CompositeIndex,
            },
            integrated_cvi(),
        ),
        atomic(
            Header {
                id: "gcvi-gs",
                name: "GCVI Geological Subindex",
                short_name: "GCVI-GS",
                description: "Geotechnical class and sediment grain size",
                citation: None,
                kind: IndexKind::CompositeComponent,
            },
            &GCVI_GS,
            FormulaTag::GcviComponent,
        ),
        atomic(
            Header {
                id: "gcvi-cs",
                name: "GCVI Coastal Subindex",
                short_name: "GCVI-CS",
                description: "Coastal slope and seagrass protection",
                citation: None,
                kind: IndexKind::CompositeComponent,
            },
            &GCVI_CS,
            FormulaTag::GcviComponent,
        ),
        atomic(
            Header {
                id: "gcvi-hs",
                name: "GCVI Hydrodynamic Subindex",
                short_name: "GCVI-HS",
                description: "Sea-level change, tide range and wave height",
                citation: None,
                kind: IndexKind::CompositeComponent,
            },
            &GCVI_HS,
            FormulaTag::GcviComponent,
        ),
        composite(
            Header {
                id: "gcvi",
                name: "Geo-Coastal Vulnerability Index (GCVI)",
                short_name: "GCVI",
                description: "Average of the geological, coastal and hydrodynamic subindices",
                citation: None,
                kind: IndexKind::Composite,
            },
            gcvi(),
        ),
    ]
}
