//! Standard parameter catalog

use crate::parameter::{
    CategoricalOption, Parameter, ParameterCategory, Scoring, VulnerabilityRange, VulnerabilityScale,
    VULNERABILITY_COLORS,
};

use ParameterCategory::{Environmental, Hydroclimate, Infrastructure, Physical, Shoreline, Socioeconomic};

const CLASS_LABELS: [&str; 5] = ["Very Low", "Low", "Moderate", "High", "Very High"];
const ICVI_SCORES: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];
const UNIT_SCORES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Shared header of a catalog entry
struct Def {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ParameterCategory,
    unit: Option<&'static str>,
    weight: f64,
    enabled: bool,
    aliases: &'static [&'static str],
}

impl Def {
    fn build(self, scores: &[f64], scoring: Scoring) -> Parameter {
        let scale = if scores.iter().all(|&s| s <= 1.0) {
            VulnerabilityScale::Unit
        } else {
            VulnerabilityScale::Ordinal
        };
        Parameter {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            unit: self.unit.map(str::to_string),
            scale,
            weight: self.weight,
            enabled: self.enabled,
            aliases: self.aliases.iter().map(|a| a.to_string()).collect(),
            scoring,
        }
    }

    /// Numeric classes as `(min, max, score, label)`
    fn ranges(self, classes: &[(Option<f64>, Option<f64>, f64, &str)]) -> Parameter {
        let scores: Vec<f64> = classes.iter().map(|c| c.2).collect();
        let ranges = classes
            .iter()
            .map(|&(min, max, value, label)| VulnerabilityRange {
                min,
                max,
                value,
                label: label.to_string(),
                color: color_for(value, &scores).to_string(),
            })
            .collect();
        self.build(&scores, Scoring::Ranges(ranges))
    }

    /// Categorical options as `(code, label, score)`
    fn options(self, options: &[(&str, &str, f64)]) -> Parameter {
        let scores: Vec<f64> = options.iter().map(|o| o.2).collect();
        let options = options
            .iter()
            .map(|&(value, label, vulnerability)| CategoricalOption {
                value: value.to_string(),
                label: label.to_string(),
                vulnerability,
                color: color_for(vulnerability, &scores).to_string(),
            })
            .collect();
        self.build(&scores, Scoring::Options(options))
    }

    /// Five criteria scored on the 0.1–0.9 ICVI ranking, codes `very_low`..`very_high`
    fn icvi_criteria(self, criteria: [&str; 5]) -> Parameter {
        const CODES: [&str; 5] = ["very_low", "low", "moderate", "high", "very_high"];
        let options: Vec<(&str, &str, f64)> = (0..5).map(|i| (CODES[i], criteria[i], ICVI_SCORES[i])).collect();
        self.options(&options)
    }
}

fn color_for(score: f64, scores: &[f64]) -> &'static str {
    let rank = scores.iter().filter(|&&s| s < score).count();
    VULNERABILITY_COLORS[rank.min(VULNERABILITY_COLORS.len() - 1)]
}

/// Ascending classes: higher raw values are more vulnerable
fn rising(bounds: [f64; 4], scores: [f64; 5]) -> Vec<(Option<f64>, Option<f64>, f64, &'static str)> {
    let [a, b, c, d] = bounds;
    vec![
        (None, Some(a), scores[0], CLASS_LABELS[0]),
        (Some(a), Some(b), scores[1], CLASS_LABELS[1]),
        (Some(b), Some(c), scores[2], CLASS_LABELS[2]),
        (Some(c), Some(d), scores[3], CLASS_LABELS[3]),
        (Some(d), None, scores[4], CLASS_LABELS[4]),
    ]
}

/// Descending classes: lower raw values are more vulnerable
fn falling(bounds: [f64; 4], scores: [f64; 5]) -> Vec<(Option<f64>, Option<f64>, f64, &'static str)> {
    let [a, b, c, d] = bounds;
    vec![
        (Some(a), None, scores[0], CLASS_LABELS[0]),
        (Some(b), Some(a), scores[1], CLASS_LABELS[1]),
        (Some(c), Some(b), scores[2], CLASS_LABELS[2]),
        (Some(d), Some(c), scores[3], CLASS_LABELS[3]),
        (None, Some(d), scores[4], CLASS_LABELS[4]),
    ]
}

const ORDINAL: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Five-level categorical scale `very_low`..`very_high` with a subject noun in the labels
fn five_levels(subject: &str) -> Vec<(String, String, f64)> {
    ["very_low", "low", "moderate", "high", "very_high"]
        .iter()
        .zip(CLASS_LABELS)
        .zip(ORDINAL)
        .map(|((code, label), score)| (code.to_string(), format!("{label} {subject}"), score))
        .collect()
}

fn owned_options(def: Def, options: Vec<(String, String, f64)>) -> Parameter {
    let borrowed: Vec<(&str, &str, f64)> = options.iter().map(|(c, l, s)| (c.as_str(), l.as_str(), *s)).collect();
    def.options(&borrowed)
}

/// Every standard parameter in catalog order
pub(crate) fn standard_parameters() -> Vec<Parameter> {
    let mut params = classic_parameters();
    params.extend(socioeconomic_parameters());
    params.extend(index_specific_parameters());
    params.extend(icvi_ranking_parameters());
    params
}

fn classic_parameters() -> Vec<Parameter> {
    vec![
        Def {
            id: "coastal_geomorphology",
            name: "Coastal Geomorphology",
            description: "Relative erodibility of the coastal landform",
            category: Physical,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: &["geomorphology", "coastal_landforms", "geomorphological_features", "landform_type"],
        }
        .options(&[
            ("rocky_cliffs", "Rocky, cliffed coasts / Fiords / Fiards", 1.0),
            ("medium_cliffs", "Medium cliffs / Indented coasts", 2.0),
            ("low_cliffs", "Low cliffs / Glacial drift / Alluvial plains", 3.0),
            ("cobble_beaches", "Cobble beaches / Estuary / Lagoon", 4.0),
            (
                "barrier_beaches",
                "Barrier beaches / Sand beaches / Salt marsh / Mud flats / Deltas / Mangrove / Coral reefs",
                5.0,
            ),
        ]),
        Def {
            id: "coastal_slope",
            name: "Coastal Slope",
            description: "Regional slope of the coastal zone",
            category: Physical,
            unit: Some("%"),
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: &["slope", "coastal_gradient", "shore_slope", "beach_slope"],
        }
        .ranges(&falling([12.0, 9.0, 6.0, 3.0], ORDINAL)),
        Def {
            id: "rock_type",
            name: "Rock Type / Geology",
            description: "Resistance of the underlying geology to erosion",
            category: Physical,
            unit: None,
            weight: 1.0 / 9.0,
            enabled: false,
            aliases: &["geology", "geological_type", "bedrock_type", "lithology"],
        }
        .options(&[
            ("hard_rock", "Hard crystalline rocks", 1.0),
            ("medium_rock", "Medium hard sedimentary rocks", 2.0),
            ("soft_rock", "Soft sedimentary rocks", 3.0),
            ("unconsolidated", "Unconsolidated sediments", 4.0),
            ("very_soft", "Very soft/loose sediments", 5.0),
        ]),
        Def {
            id: "sea_level_change",
            name: "Relative Sea-level Change",
            description: "Rate of relative sea-level rise",
            category: Hydroclimate,
            unit: Some("mm/yr"),
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: &["relative_sea_level_rise", "sea_level_rise", "slr_rate", "relative_slr"],
        }
        .ranges(&rising([1.8, 2.5, 3.0, 3.4], ORDINAL)),
        Def {
            id: "mean_tide_range",
            name: "Mean Tide Range",
            description: "Mean tidal range; small ranges concentrate wave energy",
            category: Hydroclimate,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: &["tidal_range", "tide_range", "mean_tidal_range"],
        }
        .ranges(&falling([6.0, 4.0, 2.0, 1.0], ORDINAL)),
        Def {
            id: "mean_wave_height",
            name: "Mean Wave Height",
            description: "Mean significant wave height",
            category: Hydroclimate,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: &["wave_height", "significant_wave_height"],
        }
        .ranges(&rising([0.55, 0.85, 1.05, 1.25], ORDINAL)),
        Def {
            id: "shoreline_change",
            name: "Shoreline Change Rate",
            description: "Rate of shoreline accretion (positive) or erosion (negative)",
            category: Shoreline,
            unit: Some("m/yr"),
            weight: 1.0 / 6.0,
            enabled: true,
            aliases: &["shoreline_erosion", "erosion_rate", "shoreline_migration", "coastal_erosion"],
        }
        .ranges(&falling([2.0, 1.0, -1.0, -2.0], ORDINAL)),
        Def {
            id: "barrier_type",
            name: "Barrier Type",
            description: "Kind of barrier sheltering the shoreline",
            category: Shoreline,
            unit: None,
            weight: 1.0 / 9.0,
            enabled: false,
            aliases: &["coastal_protection", "protection_type", "barrier_system"],
        }
        .options(&[
            ("hard_protection", "Hard coastal protection structures", 1.0),
            ("natural_barrier", "Natural barriers (reefs, islands)", 2.0),
            ("vegetation", "Vegetation barriers (mangroves)", 3.0),
            ("soft_protection", "Soft protection (beach nourishment)", 4.0),
            ("no_protection", "No protection/barriers", 5.0),
        ]),
        Def {
            id: "shoreline_exposure",
            name: "Shoreline Exposure",
            description: "Exposure of the shoreline to open-ocean waves",
            category: Shoreline,
            unit: None,
            weight: 1.0 / 9.0,
            enabled: false,
            aliases: &["wave_exposure", "coastal_exposure", "fetch"],
        }
        .options(&[
            ("very_sheltered", "Very sheltered (enclosed bays)", 1.0),
            ("sheltered", "Sheltered (partial protection)", 2.0),
            ("semi_exposed", "Semi-exposed", 3.0),
            ("exposed", "Exposed to open ocean", 4.0),
            ("very_exposed", "Very exposed (headlands)", 5.0),
        ]),
    ]
}

fn socioeconomic_parameters() -> Vec<Parameter> {
    let mut params = vec![
        Def {
            id: "population_density",
            name: "Population Density",
            description: "Population density in coastal zone",
            category: Socioeconomic,
            unit: Some("people/km²"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["population", "demographic_density", "inhabitants_density"],
        }
        .ranges(&rising([50.0, 200.0, 500.0, 1000.0], ORDINAL)),
        owned_options(
            Def {
                id: "economic_value",
                name: "Economic Value",
                description: "Economic value of coastal assets",
                category: Socioeconomic,
                unit: None,
                weight: 1.0 / 6.0,
                enabled: false,
                aliases: &["asset_value", "economic_assets", "property_value"],
            },
            five_levels("Economic Value"),
        ),
        Def {
            id: "land_use",
            name: "Land Use",
            description: "Dominant land use type in coastal zone",
            category: Environmental,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["land_cover", "land_use_type", "coastal_land_use"],
        }
        .options(&[
            ("natural", "Natural/Protected areas", 1.0),
            ("forest", "Forest/Vegetation", 2.0),
            ("agriculture", "Agricultural", 3.0),
            ("residential", "Residential", 4.0),
            ("urban_industrial", "Urban/Industrial", 5.0),
        ]),
        owned_options(
            Def {
                id: "infrastructure_density",
                name: "Infrastructure Density",
                description: "Density of critical infrastructure in coastal zone",
                category: Socioeconomic,
                unit: None,
                weight: 1.0 / 6.0,
                enabled: false,
                aliases: &["infrastructure", "critical_infrastructure", "built_infrastructure"],
            },
            five_levels("Infrastructure"),
        ),
        Def {
            id: "road_density",
            name: "Road Density",
            description: "Density of roads and transportation networks",
            category: Socioeconomic,
            unit: Some("km/km²"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["transportation_density", "road_network", "transport_infrastructure"],
        }
        .ranges(&rising([0.5, 1.0, 2.0, 4.0], ORDINAL)),
        owned_options(
            Def {
                id: "social_vulnerability",
                name: "Social Vulnerability",
                description: "Social vulnerability index based on demographics",
                category: Socioeconomic,
                unit: None,
                weight: 1.0 / 6.0,
                enabled: false,
                aliases: &["social_index", "demographic_vulnerability", "social_factors"],
            },
            five_levels("Social Vulnerability"),
        ),
        Def {
            id: "cultural_heritage",
            name: "Cultural Heritage Value",
            description: "Value of cultural and historical assets",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["heritage_value", "cultural_assets", "historical_value"],
        }
        .options(&[
            ("none", "No Cultural Heritage", 1.0),
            ("low", "Low Heritage Value", 2.0),
            ("moderate", "Moderate Heritage Value", 3.0),
            ("high", "High Heritage Value", 4.0),
            ("very_high", "Very High Heritage Value", 5.0),
        ]),
        owned_options(
            Def {
                id: "ecosystem_services",
                name: "Ecosystem Services",
                description: "Value of ecosystem services provided",
                category: Environmental,
                unit: None,
                weight: 1.0 / 6.0,
                enabled: false,
                aliases: &["ecosystem_value", "natural_services", "ecological_services"],
            },
            five_levels("Ecosystem Services"),
        ),
        Def {
            id: "vegetation_distance",
            name: "Distance to Vegetation",
            description: "Distance from shoreline to protective vegetation",
            category: Environmental,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["vegetation_buffer", "vegetation_cover"],
        }
        .ranges(&rising([50.0, 100.0, 200.0, 500.0], ORDINAL)),
        Def {
            id: "coastal_elevation",
            name: "Coastal Elevation",
            description: "Average elevation of coastal zone above sea level",
            category: Physical,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["elevation", "coastal_height", "land_elevation"],
        }
        .ranges(&falling([20.0, 10.0, 5.0, 2.0], ORDINAL)),
        Def {
            id: "beach_width",
            name: "Beach Width",
            description: "Width of beach from high tide to backshore",
            category: Physical,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["beach_distance", "shore_width", "beach_extent"],
        }
        .ranges(&falling([100.0, 50.0, 25.0, 10.0], ORDINAL)),
        Def {
            id: "dune_width",
            name: "Dune Width",
            description: "Width of coastal dune system",
            category: Physical,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["dune_distance", "dune_extent", "dune_system_width"],
        }
        .ranges(&falling([200.0, 100.0, 50.0, 20.0], ORDINAL)),
        Def {
            id: "sea_defences",
            name: "Sea Defences",
            description: "Type and effectiveness of coastal protection structures",
            category: Shoreline,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["coastal_defences", "protection_structures"],
        }
        .options(&[
            ("hard_defences", "Hard defences (seawalls, breakwaters)", 1.0),
            ("mixed_defences", "Mixed hard/soft defences", 2.0),
            ("soft_defences", "Soft defences (beach nourishment)", 3.0),
            ("natural_defences", "Natural defences only", 4.0),
            ("no_defences", "No coastal defences", 5.0),
        ]),
    ];

    let graded = |label: &str| -> Vec<(String, String, f64)> {
        [
            ("low_vulnerability", format!("Low {label}Vulnerability")),
            ("moderate_low", "Moderate-Low Vulnerability".to_string()),
            ("moderate", "Moderate Vulnerability".to_string()),
            ("moderate_high", "Moderate-High Vulnerability".to_string()),
            ("high_vulnerability", format!("High {label}Vulnerability")),
        ]
        .into_iter()
        .zip(ORDINAL)
        .map(|((code, text), score)| (code.to_string(), text, score))
        .collect()
    };
    params.push(owned_options(
        Def {
            id: "household_composition",
            name: "Household Composition & Disability",
            description: "Household structure and disability status affecting vulnerability",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 8.0,
            enabled: false,
            aliases: &["household_structure", "family_composition", "disability_status"],
        },
        graded("Household "),
    ));
    params.push(owned_options(
        Def {
            id: "minority_status",
            name: "Minority Status & Language",
            description: "Minority status and language barriers affecting vulnerability",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 8.0,
            enabled: false,
            aliases: &["ethnicity", "language_barriers", "minority_groups"],
        },
        graded("Language/Minority "),
    ));
    params.push(
        Def {
            id: "housing_type",
            name: "Housing Type & Transportation",
            description: "Housing quality and transportation access affecting vulnerability",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 8.0,
            enabled: false,
            aliases: &["housing_quality", "transportation_access", "housing_transportation"],
        }
        .options(&[
            ("high_quality", "High Quality Housing & Transport", 1.0),
            ("good_quality", "Good Quality Housing & Transport", 2.0),
            ("moderate_quality", "Moderate Quality", 3.0),
            ("poor_quality", "Poor Quality Housing & Transport", 4.0),
            ("very_poor", "Very Poor Housing & Transport", 5.0),
        ]),
    );
    params.push(owned_options(
        Def {
            id: "age_demographics",
            name: "Age Demographics",
            description: "Age distribution affecting community vulnerability",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 8.0,
            enabled: false,
            aliases: &["age_distribution", "elderly_population", "age_structure"],
        },
        graded("Age "),
    ));
    params.push(
        Def {
            id: "livelihood_strategies",
            name: "Livelihood Strategies",
            description: "Diversity and resilience of livelihood strategies",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 9.0,
            enabled: false,
            aliases: &["income_sources", "employment_diversity", "livelihood_diversity"],
        }
        .options(&[
            ("highly_diverse", "Highly Diverse Livelihoods", 1.0),
            ("diverse", "Diverse Livelihoods", 2.0),
            ("moderate", "Moderate Diversity", 3.0),
            ("limited", "Limited Livelihood Options", 4.0),
            ("very_limited", "Very Limited/Single Source", 5.0),
        ]),
    );
    for (id, name, description, aliases, noun) in [
        (
            "food_security",
            "Food Security",
            "Access to adequate and nutritious food",
            &["food_access", "nutrition_security", "food_availability"],
            "Food",
        ),
        (
            "water_security",
            "Water Security",
            "Access to safe and adequate water supply",
            &["water_access", "water_quality", "water_availability"],
            "Water",
        ),
    ] {
        let options = vec![
            ("highly_secure".to_string(), format!("Highly {noun} Secure"), 1.0),
            ("secure".to_string(), format!("{noun} Secure"), 2.0),
            ("moderate".to_string(), format!("Moderate {noun} Security"), 3.0),
            ("insecure".to_string(), format!("{noun} Insecure"), 4.0),
            ("highly_insecure".to_string(), format!("Highly {noun} Insecure"), 5.0),
        ];
        params.push(owned_options(
            Def {
                id,
                name,
                description,
                category: Socioeconomic,
                unit: None,
                weight: 1.0 / 9.0,
                enabled: false,
                aliases,
            },
            options,
        ));
    }
    params.push(
        Def {
            id: "natural_protection",
            name: "Natural Protection",
            description: "Natural features protecting the beach from wave attack",
            category: Environmental,
            unit: None,
            weight: 1.0 / 7.0,
            enabled: false,
            aliases: &["beach_protection", "natural_defenses", "coastal_protection_features"],
        }
        .options(&[
            ("submerged_hard", "Submerged hard features (beachrocks, platforms)", 1.0),
            ("stabilized_dunes", "Stabilized sand dunes, coastal lagoons, wetlands", 2.0),
            ("unstabilized_dunes", "Unstabilized sand dunes, uplifted reefs (beachrocks)", 3.0),
            ("gravel_berms", "Beaches with gravels, berms", 4.0),
            ("sandy_low", "Sandy low lying beaches", 5.0),
        ]),
    );
    params
}

fn index_specific_parameters() -> Vec<Parameter> {
    let unit = |codes: [(&'static str, &'static str); 5]| -> Vec<(&'static str, &'static str, f64)> {
        codes.iter().zip(UNIT_SCORES).map(|(&(c, l), s)| (c, l, s)).collect()
    };
    vec![
        Def {
            id: "ecosystem_type",
            name: "Ecosystem Type",
            description: "Coastal ecosystem present along the segment",
            category: Environmental,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["habitat_type", "coastal_ecosystem", "ecosystem_classification"],
        }
        .options(&unit([
            ("rocky_reef", "Rocky reef systems"),
            ("coral_reef", "Coral reef systems"),
            ("seagrass", "Seagrass beds"),
            ("mangrove", "Mangrove forests"),
            ("sandy_beach", "Sandy beach systems"),
        ])),
        Def {
            id: "environmental_conservancy",
            name: "Environmental Conservancy Measures",
            description: "Legal protection status of the coastal environment",
            category: Environmental,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["conservation_measures", "protection_status", "environmental_protection"],
        }
        .options(&unit([
            ("strict_protection", "Strict nature reserves"),
            ("national_park", "National parks"),
            ("managed_reserve", "Managed nature reserves"),
            ("limited_protection", "Limited protection areas"),
            ("no_protection", "No environmental protection"),
        ])),
        Def {
            id: "interest_species",
            name: "Presence of Interest Species",
            description: "Biodiversity and presence of species of conservation interest",
            category: Environmental,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["endangered_species", "species_of_interest", "biodiversity_value"],
        }
        .options(&unit([
            ("high_biodiversity", "High biodiversity with endemic species"),
            ("moderate_biodiversity", "Moderate biodiversity"),
            ("common_species", "Common species only"),
            ("low_biodiversity", "Low biodiversity"),
            ("degraded_habitat", "Degraded habitat"),
        ])),
        Def {
            id: "use_of_territory",
            name: "Use of Territory",
            description: "Human use of the land behind the shoreline",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["territory_use", "land_utilization", "territorial_use"],
        }
        .options(&unit([
            ("natural_protected", "Natural protected areas"),
            ("extensive_agriculture", "Extensive agriculture"),
            ("intensive_agriculture", "Intensive agriculture"),
            ("urban_residential", "Urban residential"),
            ("industrial_commercial", "Industrial/Commercial"),
        ])),
        Def {
            id: "building_coast_ratio",
            name: "Building Coast Ratio",
            description: "Share of the coast front occupied by buildings",
            category: Infrastructure,
            unit: Some("ratio"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["built_coast_ratio", "construction_ratio", "development_ratio"],
        }
        .ranges(&rising([0.1, 0.3, 0.5, 0.7], UNIT_SCORES)),
        Def {
            id: "sociocultural_heritage",
            name: "Sociocultural Heritage",
            description: "Significance of heritage sites along the coast",
            category: Socioeconomic,
            unit: None,
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["cultural_heritage_value", "heritage_significance", "cultural_importance"],
        }
        .options(&unit([
            ("world_heritage", "World Heritage Sites"),
            ("national_heritage", "National Heritage Sites"),
            ("regional_heritage", "Regional Heritage Sites"),
            ("local_heritage", "Local Heritage Sites"),
            ("no_heritage", "No Heritage Significance"),
        ])),
        Def {
            id: "distance_built_structures",
            name: "Distance of Built Structures behind Back Beach",
            description: "Setback of the nearest built structure from the back beach",
            category: Infrastructure,
            unit: Some("m"),
            weight: 1.0 / 6.0,
            enabled: false,
            aliases: &["built_structure_distance", "development_distance", "structure_setback"],
        }
        .ranges(&falling([500.0, 200.0, 100.0, 50.0], ORDINAL)),
        Def {
            id: "commercial_properties",
            name: "Commercial Properties",
            description: "Density of commercial properties exposed to flooding",
            category: Socioeconomic,
            unit: Some("count/km²"),
            weight: 1.0 / 4.0,
            enabled: false,
            aliases: &["commercial_density", "business_properties", "commercial_buildings"],
        }
        .ranges(&rising([5.0, 15.0, 30.0, 50.0], ORDINAL)),
        Def {
            id: "residential_properties",
            name: "Residential Properties",
            description: "Density of residential properties exposed to flooding",
            category: Socioeconomic,
            unit: Some("count/km²"),
            weight: 1.0 / 4.0,
            enabled: false,
            aliases: &["residential_density", "housing_density", "residential_buildings"],
        }
        .ranges(&rising([20.0, 50.0, 100.0, 200.0], ORDINAL)),
        Def {
            id: "median_grain_size",
            name: "Median Grain Size (D50)",
            description: "Median sediment grain size; finer sediment is more mobile",
            category: Physical,
            unit: Some("mm"),
            weight: 1.0 / 7.0,
            enabled: false,
            aliases: &["d50", "grain_size", "sediment_size"],
        }
        .ranges(&falling([2.0, 0.5, 0.25, 0.125], ORDINAL)),
        Def {
            id: "posidonia_oceanica",
            name: "Posidonia Oceanica",
            description: "Coverage of Posidonia oceanica seagrass meadows",
            category: Environmental,
            unit: None,
            weight: 1.0 / 7.0,
            enabled: false,
            aliases: &["seagrass_coverage", "posidonia_presence", "seagrass_beds"],
        }
        .options(&[
            ("dense_coverage", "Dense Posidonia coverage", 1.0),
            ("moderate_coverage", "Moderate coverage", 2.0),
            ("sparse_coverage", "Sparse coverage", 3.0),
            ("degraded_coverage", "Degraded coverage", 4.0),
            ("no_coverage", "No Posidonia coverage", 5.0),
        ]),
        Def {
            id: "coastal_geotechnical_map",
            name: "Coastal Geotechnical Map",
            description: "Geotechnical class of the coastal formation",
            category: Physical,
            unit: None,
            weight: 1.0 / 7.0,
            enabled: false,
            aliases: &["geotechnical_classification", "soil_type", "geotechnical_properties"],
        }
        .options(&[
            ("hard_rock", "Hard rock formations", 1.0),
            ("soft_rock", "Soft rock formations", 2.0),
            ("dense_soil", "Dense cohesive soils", 3.0),
            ("loose_soil", "Loose cohesive soils", 4.0),
            ("very_loose", "Very loose/unconsolidated", 5.0),
        ]),
    ]
}

/// Parameters ranked on the 0.1–0.9 scale of the Alcántara-Carrió ICVI
fn icvi_ranking_parameters() -> Vec<Parameter> {
    let def = |id, name, category, unit| Def {
        id,
        name,
        description: "ICVI ranking on the 0.1-0.9 scale",
        category,
        unit,
        weight: 1.0 / 12.0,
        enabled: false,
        aliases: &[],
    };
    vec![
        def("icvi_geomorphological_features", "Geomorphological Features", Physical, None).icvi_criteria([
            "High cliffs, cliff of coherent rocks",
            "Medium cliffs, cliff of medium resistance rocks",
            "Low cliffs, cliff on sedimentary formations",
            "Extensive beaches attached to low-elevation coastal plains",
            "Barrier islands, tombolos, spits, deltas, tidal marsh fronts",
        ]),
        def("icvi_slope", "Slope", Physical, Some("%")).ranges(&falling([8.0, 4.0, 2.0, 1.0], ICVI_SCORES)),
        def("icvi_shoreline_migration", "Shoreline Migration", Shoreline, Some("m/yr"))
            .ranges(&falling([2.0, 1.0, -1.0, -2.0], ICVI_SCORES)),
        def("icvi_ecosystem_type", "Ecosystem Type", Environmental, None).icvi_criteria([
            "Without vegetation",
            "Coastal plain and coastal cliffs",
            "Shrub vegetation, stubble, grasslands",
            "Forests",
            "Strategic ecosystems: coastal lagoons, mangroves, coral reefs",
        ]),
        def("icvi_conservation_measures", "Conservation Measures", Environmental, None).icvi_criteria([
            "None",
            "Reserve zone for agrarian, fishing or hunting activities",
            "Regional or local conservation parks",
            "Biosphere reserve areas",
            "National Parks, RAMSAR sites",
        ]),
        def("icvi_species_interest", "Species of Interest", Environmental, None).icvi_criteria([
            "Ecosystems colonized by invasive species",
            "Invasive species with normal population growth",
            "Normal population growth and high-value species",
            "Endemism and threatened species with active conservation programs",
            "High quantity of endemism and high-value species",
        ]),
        def("icvi_land_use", "Land Use", Socioeconomic, None).icvi_criteria([
            "Natural areas, without buildings",
            "Rural areas",
            "Semi-urban areas with scattered buildings",
            "Urban areas",
            "Industrial areas",
        ]),
        def("icvi_building_coast_ratio", "Building Coast Ratio", Infrastructure, Some("ratio"))
            .ranges(&rising([0.0001, 0.1, 0.5, 1.0], ICVI_SCORES)),
        def("icvi_population_density", "Population Density", Socioeconomic, Some("pop/ha"))
            .ranges(&rising([20.0, 50.0, 80.0, 170.0], ICVI_SCORES)),
        def("icvi_economic_activity", "Economic Activity", Socioeconomic, None).icvi_criteria([
            "None",
            "Low",
            "Moderate",
            "High",
            "Very high",
        ]),
        def("icvi_economic_value", "Economic Value", Socioeconomic, Some("EUR"))
            .ranges(&rising([1.0e5, 3.5e5, 6.5e5, 1.0e6], ICVI_SCORES)),
        def("icvi_heritage", "Heritage", Socioeconomic, None).icvi_criteria([
            "None",
            "Local relevance",
            "Regional relevance",
            "National relevance",
            "World Heritage",
        ]),
    ]
}
