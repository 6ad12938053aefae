//! Vector operations on shorelines
//!
//! - Measurements: geodesic length, cumulative distance, interpolation along a line
//! - Segmentation: split lines into equal-length analysis segments

mod measurements;
mod segmentation;

pub use measurements::{cumulative_distances, geodesic_length, point_at_distance, slice_along};
pub use segmentation::{
    plan_segmentation, segment_shoreline, SegmentationParams, SegmentationPlan, ShorelineSegmenter,
};
