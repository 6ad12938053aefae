//! Geodesic measurements on `[longitude, latitude]` lines
//!
//! Distances use the haversine formula on the mean Earth radius, in meters.

use geo::{Coord, Distance, Haversine, InterpolatePoint, Length, LineString, Point};

/// Geodesic length of a line in meters
pub fn geodesic_length(line: &LineString<f64>) -> f64 {
    line.length::<Haversine>()
}

/// Distance from the first vertex to every vertex, in meters
pub fn cumulative_distances(line: &LineString<f64>) -> Vec<f64> {
    let mut out = Vec::with_capacity(line.0.len());
    let mut total = 0.0;
    for (i, c) in line.0.iter().enumerate() {
        if i > 0 {
            total += Haversine::distance(Point::from(line.0[i - 1]), Point::from(*c));
        }
        out.push(total);
    }
    out
}

/// Point `distance` meters along the line, clamped to its ends
pub fn point_at_distance(line: &LineString<f64>, cumulative: &[f64], distance: f64) -> Option<Coord<f64>> {
    let first = *line.0.first()?;
    let last = *line.0.last()?;
    let total = *cumulative.last()?;
    if distance <= 0.0 {
        return Some(first);
    }
    if distance >= total {
        return Some(last);
    }

    // First vertex at or beyond the target; the target lies on the edge ending there
    let end = cumulative.partition_point(|&d| d < distance).max(1);
    let span = cumulative[end] - cumulative[end - 1];
    let ratio = if span > 0.0 {
        (distance - cumulative[end - 1]) / span
    } else {
        0.0
    };
    let p = Haversine::point_at_ratio_between(Point::from(line.0[end - 1]), Point::from(line.0[end]), ratio);
    Some(p.into())
}

/// The part of `line` between two offsets, keeping the original vertices in between
pub fn slice_along(line: &LineString<f64>, cumulative: &[f64], start: f64, end: f64) -> Option<LineString<f64>> {
    let head = point_at_distance(line, cumulative, start)?;
    let tail = point_at_distance(line, cumulative, end)?;

    let mut coords = vec![head];
    coords.extend(
        line.0
            .iter()
            .zip(cumulative)
            .filter(|&(_, &d)| d > start && d < end)
            .map(|(c, _)| *c),
    );
    coords.push(tail);
    Some(LineString::new(coords))
}
