//! Shoreline analysis segments.
//!
//! Segments are produced by the segmenter, receive parameter values from
//! value-assignment workflows, and receive a vulnerability index from the
//! calculation orchestrator. They persist as [`Feature`]s.

use std::collections::BTreeMap;

use geo_types::{Geometry, LineString};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formula::FormulaTag;
use crate::parameter::ParameterValue;
use crate::vector::{AttributeValue, Feature, FeatureCollection};

/// Where a segment came from on its parent line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentProperties {
    /// Index of the source feature in the segmenter input
    pub feature_index: usize,
    /// Index of the component line inside a multi-part source feature
    pub line_index: usize,
    /// Position of the segment along its component line
    pub segment_index: usize,
    /// Offset of the segment start along the parent line (meters)
    pub start_distance: f64,
    /// Offset of the segment end along the parent line (meters)
    pub end_distance: f64,
    /// Geodesic length (meters)
    pub length: f64,
}

/// An analysis unit of coastline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShorelineSegment {
    pub id: String,
    pub geometry: LineString<f64>,
    pub properties: SegmentProperties,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_formula: Option<FormulaTag>,
}

const KEY_FEATURE_INDEX: &str = "featureIndex";
const KEY_LINE_INDEX: &str = "lineIndex";
const KEY_SEGMENT_INDEX: &str = "index";
const KEY_START: &str = "startDistance";
const KEY_END: &str = "endDistance";
const KEY_LENGTH: &str = "length";
const KEY_PARAMETERS: &str = "parameters";
const KEY_INDEX: &str = "vulnerabilityIndex";
const KEY_FORMULA: &str = "vulnerabilityFormula";

impl ShorelineSegment {
    pub fn new(id: impl Into<String>, geometry: LineString<f64>, properties: SegmentProperties) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties,
            parameters: BTreeMap::new(),
            vulnerability_index: None,
            vulnerability_formula: None,
        }
    }

    /// Assign a scored value, replacing any previous value for the parameter
    pub fn set_parameter(&mut self, id: impl Into<String>, value: ParameterValue) {
        self.parameters.insert(id.into(), value);
    }

    pub fn parameter(&self, id: &str) -> Option<&ParameterValue> {
        self.parameters.get(id)
    }

    /// Whether every id in `required` has an assigned value
    pub fn has_all<'a>(&self, mut required: impl Iterator<Item = &'a str>) -> bool {
        required.all(|id| self.parameters.contains_key(id))
    }

    pub fn to_feature(&self) -> Feature {
        let mut feature = Feature::new(Geometry::LineString(self.geometry.clone())).with_id(&self.id);
        let p = &self.properties;
        feature.set_property(KEY_FEATURE_INDEX, p.feature_index);
        feature.set_property(KEY_LINE_INDEX, p.line_index);
        feature.set_property(KEY_SEGMENT_INDEX, p.segment_index);
        feature.set_property(KEY_START, p.start_distance);
        feature.set_property(KEY_END, p.end_distance);
        feature.set_property(KEY_LENGTH, p.length);

        if !self.parameters.is_empty() {
            let params = self
                .parameters
                .iter()
                .map(|(id, v)| (id.clone(), value_to_attribute(v)))
                .collect();
            feature.set_property(KEY_PARAMETERS, AttributeValue::Map(params));
        }
        if let Some(v) = self.vulnerability_index {
            feature.set_property(KEY_INDEX, v);
        }
        if let Some(tag) = self.vulnerability_formula {
            feature.set_property(KEY_FORMULA, tag.as_str());
        }
        feature
    }

    pub fn from_feature(feature: &Feature) -> Result<Self> {
        let id = feature.id.clone().unwrap_or_default();
        let invalid = |reason: String| Error::InvalidFeature {
            id: id.clone(),
            reason,
        };

        let geometry = match &feature.geometry {
            Some(Geometry::LineString(ls)) => ls.clone(),
            Some(_) => return Err(invalid("geometry is not a LineString".into())),
            None => return Err(invalid("missing geometry".into())),
        };

        let number = |key: &str| -> Result<f64> {
            feature
                .get_property(key)
                .and_then(AttributeValue::as_f64)
                .ok_or_else(|| invalid(format!("missing numeric property {key}")))
        };
        let properties = SegmentProperties {
            feature_index: number(KEY_FEATURE_INDEX)? as usize,
            line_index: number(KEY_LINE_INDEX)? as usize,
            segment_index: number(KEY_SEGMENT_INDEX)? as usize,
            start_distance: number(KEY_START)?,
            end_distance: number(KEY_END)?,
            length: number(KEY_LENGTH)?,
        };

        let mut parameters = BTreeMap::new();
        if let Some(attr) = feature.get_property(KEY_PARAMETERS) {
            let map = attr
                .as_map()
                .ok_or_else(|| invalid("parameters is not a map".into()))?;
            for (pid, value) in map {
                let value = attribute_to_value(value)
                    .ok_or_else(|| invalid(format!("malformed value for parameter {pid}")))?;
                parameters.insert(pid.clone(), value);
            }
        }

        let vulnerability_formula = match feature.get_property(KEY_FORMULA) {
            Some(attr) => {
                let s = attr
                    .as_str()
                    .ok_or_else(|| invalid("formula tag is not a string".into()))?;
                Some(s.parse::<FormulaTag>()?)
            }
            None => None,
        };

        Ok(Self {
            id,
            geometry,
            properties,
            parameters,
            vulnerability_index: feature.get_property(KEY_INDEX).and_then(AttributeValue::as_f64),
            vulnerability_formula,
        })
    }
}

fn value_to_attribute(value: &ParameterValue) -> AttributeValue {
    let mut map = BTreeMap::new();
    match value {
        ParameterValue::Numerical {
            value,
            vulnerability,
        } => {
            map.insert("type".into(), "numerical".into());
            map.insert("value".into(), (*value).into());
            map.insert("vulnerability".into(), (*vulnerability).into());
        }
        ParameterValue::Categorical {
            value,
            vulnerability,
        } => {
            map.insert("type".into(), "categorical".into());
            map.insert("value".into(), value.as_str().into());
            map.insert("vulnerability".into(), (*vulnerability).into());
        }
    }
    AttributeValue::Map(map)
}

fn attribute_to_value(attr: &AttributeValue) -> Option<ParameterValue> {
    let map = attr.as_map()?;
    let vulnerability = map.get("vulnerability")?.as_f64()?;
    match map.get("type")?.as_str()? {
        "numerical" => Some(ParameterValue::Numerical {
            value: map.get("value")?.as_f64()?,
            vulnerability,
        }),
        "categorical" => Some(ParameterValue::Categorical {
            value: map.get("value")?.as_str()?.to_string(),
            vulnerability,
        }),
        _ => None,
    }
}

/// Build the persisted document for a segment set
pub fn segments_to_collection(segments: &[ShorelineSegment]) -> FeatureCollection {
    segments.iter().map(ShorelineSegment::to_feature).collect()
}

/// Rebuild segments from a persisted document
pub fn segments_from_collection(collection: &FeatureCollection) -> Result<Vec<ShorelineSegment>> {
    collection.iter().map(ShorelineSegment::from_feature).collect()
}
