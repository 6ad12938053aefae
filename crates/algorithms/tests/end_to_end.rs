//! End-to-end workflow: segment a shoreline, score raw measurements through
//! the registry, detect the index, calculate and persist.

use coastcvi_algorithms::prelude::*;
use coastcvi_core::segment::segments_from_collection;
use geo::{line_string, Geometry};

/// Raw measurements that score (3, 2, 4, 4, 3, 2) on the CVI parameters
const CVI_MEASUREMENTS: [(&str, f64); 5] = [
    ("coastal_slope", 10.5),
    ("sea_level_change", 3.2),
    ("shoreline_change", -1.5),
    ("mean_tide_range", 3.0),
    ("mean_wave_height", 0.7),
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn shoreline() -> Vec<Geometry<f64>> {
    vec![Geometry::LineString(line_string![
        (x: -8.90, y: 37.95),
        (x: -8.88, y: 37.97),
        (x: -8.87, y: 38.00),
    ])]
}

fn score_cvi(registry: &Registry, segment: &mut ShorelineSegment) {
    let geomorphology = registry.parameter("coastal_geomorphology").unwrap();
    segment.set_parameter(&geomorphology.id, geomorphology.score_category("low_cliffs").unwrap());
    for (id, raw) in CVI_MEASUREMENTS {
        let parameter = registry.parameter(id).unwrap();
        segment.set_parameter(id, parameter.score_numeric(raw).unwrap());
    }
}

#[test]
fn test_registry_scoring_matches_worked_example() {
    init_tracing();
    let registry = Registry::standard().unwrap();
    let mut segments = segment_shoreline(&shoreline(), &SegmentationParams::default()).unwrap();
    assert!(segments.len() >= 3);

    for segment in segments.iter_mut() {
        score_cvi(&registry, segment);
    }
    let scores: Vec<f64> = ["coastal_geomorphology", "coastal_slope", "sea_level_change"]
        .iter()
        .map(|id| segments[0].parameter(id).unwrap().vulnerability())
        .collect();
    assert_eq!(scores, vec![3.0, 2.0, 4.0]);

    let parameters = registry.parameters_for_index("cvi-thieler-1999").unwrap();
    let outcome = calculate(
        &registry,
        &mut segments,
        &parameters,
        &FormulaSelection::Index("cvi-thieler-1999".into()),
        &CalculationParams::default(),
    )
    .unwrap();

    assert_eq!(outcome.formula, FormulaTag::Traditional);
    assert_eq!(outcome.results.len(), segments.len());
    assert!(outcome.errors.is_empty());
    for segment in &segments {
        assert_eq!(segment.vulnerability_index, Some(9.8));
        assert_eq!(segment.vulnerability_formula, Some(FormulaTag::Traditional));
    }
    assert!(outcome.results[0].result.trace.contains("√(576/6)"));

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["formula"], "traditional");
    assert_eq!(json["results"][0]["value"], 9.8);
}

#[test]
fn test_incomplete_segments_are_skipped() {
    let registry = Registry::standard().unwrap();
    let mut segments = segment_shoreline(&shoreline(), &SegmentationParams {
        resolution: 2000.0,
        ..Default::default()
    })
    .unwrap();
    segments.truncate(3);
    assert_eq!(segments.len(), 3);

    for segment in segments.iter_mut() {
        score_cvi(&registry, segment);
    }
    segments[1].parameters.remove("mean_wave_height");

    let parameters = registry.parameters_for_index("cvi-thieler-1999").unwrap();
    let outcome = calculate(
        &registry,
        &mut segments,
        &parameters,
        &FormulaSelection::Index("cvi-thieler-1999".into()),
        &CalculationParams::default(),
    )
    .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(segments[1].vulnerability_index, None);
    let stats = outcome.statistics.unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.count_for(VulnerabilityCategory::VeryHigh), 2);
}

#[tokio::test]
async fn test_persist_only_when_changed() {
    init_tracing();
    let registry = Registry::standard().unwrap();
    let store = MemoryStore::new();
    let mut segments = segment_shoreline(&shoreline(), &SegmentationParams::default()).unwrap();
    for segment in segments.iter_mut() {
        score_cvi(&registry, segment);
    }
    let parameters = registry.parameters_for_index("cvi-thieler-1999").unwrap();
    let selection = FormulaSelection::Index("cvi-thieler-1999".into());
    let params = CalculationParams::default();

    let first = calculate_and_persist(&registry, &mut segments, &parameters, &selection, &params, &store)
        .await
        .unwrap();
    assert!(first.persisted);
    assert_eq!(first.changed, segments.len());

    let stored = store.get(&params.store_key).await.unwrap().unwrap();
    let reloaded = segments_from_collection(&stored).unwrap();
    assert_eq!(reloaded.len(), segments.len());
    for (back, original) in reloaded.iter().zip(&segments) {
        assert_eq!(back.id, original.id);
        assert_eq!(back.vulnerability_index, Some(9.8));
        assert_eq!(back.vulnerability_formula, Some(FormulaTag::Traditional));
    }

    store.clear().unwrap();
    let second = calculate_and_persist(&registry, &mut segments, &parameters, &selection, &params, &store)
        .await
        .unwrap();
    assert_eq!(second.changed, 0);
    assert!(!second.persisted);
    assert!(store.is_empty());
}

#[test]
fn test_detection_then_calculation() {
    let registry = Registry::standard().unwrap();
    let selected = registry.parameters_for_index("ccvi-kantamaneni-2024").unwrap();

    let detections = IndexDetector::new(&registry).execute_default(selected.clone()).unwrap();
    let best = detections
        .iter()
        .find(|d| d.index_id == "ccvi-kantamaneni-2024")
        .unwrap();
    assert_eq!(best.formula, FormulaTag::CcviComposite);
    assert_eq!(best.confidence, 1.0);
    // PCVI is fully covered too and registered first
    assert_eq!(detections[0].index_id, "pcvi-kantamaneni-2024");

    let mut segments = segment_shoreline(&shoreline(), &SegmentationParams::default()).unwrap();
    for segment in segments.iter_mut() {
        for p in &selected {
            segment.set_parameter(&p.id, ParameterValue::Numerical {
                value: 3.0,
                vulnerability: 3.0,
            });
        }
    }
    let outcome = calculate(
        &registry,
        &mut segments,
        &selected,
        &FormulaSelection::Tag(best.formula),
        &CalculationParams::default(),
    )
    .unwrap();
    assert_eq!(outcome.results.len(), segments.len());
    let components = &outcome.results[0].result.components;
    assert!(components.keys().any(|k| k.starts_with("PCVI")));
    assert!(components.keys().any(|k| k.starts_with("ECVI")));
}

#[test]
fn test_segmentation_conserves_length() {
    let lines = shoreline();
    let plan = plan_segmentation(&lines, &SegmentationParams::default()).unwrap();
    let segments = segment_shoreline(&lines, &SegmentationParams::default()).unwrap();

    assert_eq!(segments.len(), plan.estimated_segments);
    let sum: f64 = segments.iter().map(|s| s.properties.length).sum();
    assert!((sum - plan.total_length).abs() < 1e-6 * plan.total_length);
    assert!(segments.iter().all(|s| s.properties.length <= 1000.0 + 1e-6));
}
