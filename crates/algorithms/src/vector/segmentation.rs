//! Shoreline segmentation
//!
//! Splits each line into `ceil(length / resolution)` pieces of equal
//! geodesic length. Multi-part lines are exploded first; every part keeps
//! its `line_index`.

use geo::{Geometry, LineString};
use tracing::{debug, warn};

use coastcvi_core::segment::{SegmentProperties, ShorelineSegment};
use coastcvi_core::{Algorithm, Error, Result};

use super::measurements::{cumulative_distances, geodesic_length, slice_along};
use crate::maybe_rayon::*;

/// Parameters for shoreline segmentation
#[derive(Debug, Clone)]
pub struct SegmentationParams {
    /// Target segment length in meters
    pub resolution: f64,
    /// Estimated count above which a warning is logged
    pub warning_threshold: usize,
    /// Estimated count above which `confirmed` must be set
    pub confirmation_threshold: usize,
    /// Caller has acknowledged a large segment count
    pub confirmed: bool,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            resolution: 1000.0,
            warning_threshold: 5_000,
            confirmation_threshold: 10_000,
            confirmed: false,
        }
    }
}

/// What a segmentation run would produce
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationPlan {
    /// Total geodesic length of all lines (meters)
    pub total_length: f64,
    /// Exact number of segments `segment_shoreline` would emit
    pub estimated_segments: usize,
    pub exceeds_warning: bool,
    pub requires_confirmation: bool,
}

/// One component line with its provenance
struct Part<'a> {
    feature_index: usize,
    line_index: usize,
    line: &'a LineString<f64>,
}

fn explode(lines: &[Geometry<f64>]) -> Result<Vec<Part<'_>>> {
    let mut parts = Vec::new();
    for (feature_index, geom) in lines.iter().enumerate() {
        match geom {
            Geometry::LineString(ls) => parts.push(Part {
                feature_index,
                line_index: 0,
                line: ls,
            }),
            Geometry::MultiLineString(mls) => {
                parts.extend(mls.0.iter().enumerate().map(|(line_index, line)| Part {
                    feature_index,
                    line_index,
                    line,
                }))
            }
            other => return Err(Error::UnsupportedGeometry(geometry_name(other))),
        }
    }
    Ok(parts)
}

fn geometry_name(geom: &Geometry<f64>) -> &'static str {
    match geom {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

fn check_resolution(resolution: f64) -> Result<()> {
    if resolution.is_finite() && resolution > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "resolution",
            value: resolution.to_string(),
            reason: "must be a positive number of meters".into(),
        })
    }
}

/// `ceil(length / resolution)`; `None` when the count is not a representable `usize`
fn segment_count(length: f64, resolution: f64) -> Option<usize> {
    let n = (length / resolution).ceil();
    // `usize::MAX as f64` rounds up past usize::MAX, so it is excluded too
    if n.is_finite() && n >= 0.0 && n < usize::MAX as f64 {
        Some(n as usize)
    } else {
        None
    }
}

fn too_many_segments(resolution: f64) -> Error {
    Error::InvalidParameter {
        name: "resolution",
        value: resolution.to_string(),
        reason: "segment count overflows; use a coarser resolution".into(),
    }
}

/// Estimate a segmentation without producing geometry.
///
/// # Errors
///
/// [`Error::InvalidParameter`] for a non-positive resolution or one so fine
/// that the segment count overflows, and [`Error::UnsupportedGeometry`] for
/// non-linear input.
pub fn plan_segmentation(lines: &[Geometry<f64>], params: &SegmentationParams) -> Result<SegmentationPlan> {
    check_resolution(params.resolution)?;
    let parts = explode(lines)?;

    let lengths: Vec<f64> = parts.iter().map(|p| geodesic_length(p.line)).collect();
    let mut estimated_segments: usize = 0;
    for &length in &lengths {
        estimated_segments = segment_count(length, params.resolution)
            .and_then(|n| estimated_segments.checked_add(n))
            .ok_or_else(|| too_many_segments(params.resolution))?;
    }

    Ok(SegmentationPlan {
        total_length: lengths.iter().sum(),
        estimated_segments,
        exceeds_warning: estimated_segments > params.warning_threshold,
        requires_confirmation: estimated_segments > params.confirmation_threshold,
    })
}

fn segment_part(part: &Part<'_>, resolution: f64) -> Vec<(SegmentProperties, LineString<f64>)> {
    let cumulative = cumulative_distances(part.line);
    let total = cumulative.last().copied().unwrap_or(0.0);
    let n = match segment_count(total, resolution) {
        Some(n) if n > 0 => n,
        _ => return Vec::new(),
    };
    let step = total / n as f64;

    (0..n)
        .filter_map(|i| {
            let start = i as f64 * step;
            let end = if i + 1 == n { total } else { (i + 1) as f64 * step };
            let geometry = slice_along(part.line, &cumulative, start, end)?;
            let length = geodesic_length(&geometry);
            Some((
                SegmentProperties {
                    feature_index: part.feature_index,
                    line_index: part.line_index,
                    segment_index: i,
                    start_distance: start,
                    end_distance: end,
                    length,
                },
                geometry,
            ))
        })
        .collect()
}

/// Split lines into equal-length analysis segments.
///
/// Segment ids are `segment-NNNNNN`, numbered from 1 in input order.
///
/// # Errors
///
/// Everything [`plan_segmentation`] rejects, plus [`Error::ConfirmationRequired`]
/// when the estimate exceeds the confirmation threshold and `confirmed` is unset.
pub fn segment_shoreline(lines: &[Geometry<f64>], params: &SegmentationParams) -> Result<Vec<ShorelineSegment>> {
    let plan = plan_segmentation(lines, params)?;
    debug!(
        estimated = plan.estimated_segments,
        total_length = plan.total_length,
        resolution = params.resolution,
        "segmentation plan"
    );
    if plan.requires_confirmation && !params.confirmed {
        return Err(Error::ConfirmationRequired {
            estimated: plan.estimated_segments,
            threshold: params.confirmation_threshold,
        });
    }
    if plan.exceeds_warning {
        warn!(estimated = plan.estimated_segments, "large segment count");
    }

    let parts = explode(lines)?;
    let pieces: Vec<Vec<(SegmentProperties, LineString<f64>)>> = parts
        .into_par_iter()
        .map(|part| segment_part(&part, params.resolution))
        .collect();

    Ok(pieces
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(i, (properties, geometry))| ShorelineSegment::new(format!("segment-{:06}", i + 1), geometry, properties))
        .collect())
}

/// Shoreline segmentation as an [`Algorithm`]
#[derive(Debug, Clone, Default)]
pub struct ShorelineSegmenter;

impl Algorithm for ShorelineSegmenter {
    type Input = Vec<Geometry<f64>>;
    type Output = Vec<ShorelineSegment>;
    type Params = SegmentationParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ShorelineSegmentation"
    }

    fn description(&self) -> &'static str {
        "Split shoreline lines into equal-length geodesic segments at a target resolution"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        segment_shoreline(&input, &params)
    }
}
