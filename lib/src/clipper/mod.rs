//! Clipping and offsetting of fill regions.
//!
//! Two operations are needed around infill generation:
//! - Polygon offsetting (insetting a surface before it is filled), done with
//!   the geo-clipper library.
//! - Intersection of open line geometry with polygons-with-holes, which turns
//!   the unbounded candidate line families into bounded toolpath polylines.
//!
//! Line clipping works directly on the scaled integer geometry: every segment is
//! split at its exact crossings with the contour and hole edges, and each piece
//! is kept when its midpoint lies inside the region. Crossing points are rounded
//! to the integer grid, so clipped endpoints may sit up to one unit off the
//! boundary.

use crate::geometry::{ExPolygon, ExPolygons, Line, Point, Polygon, Polyline};
use crate::{scale, unscale, CoordF};
use geo::{Coord as GeoCoord, LineString, MultiPolygon, Polygon as GeoPolygon};
use geo_clipper::{Clipper, EndType, JoinType};

/// Precision factor handed to clipper for mm-valued geometry (1 µm).
const CLIPPER_FACTOR: f64 = 1000.0;

/// Join type for offset corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetJoinType {
    /// Square corners
    Square,
    /// Round corners
    #[default]
    Round,
    /// Mitered corners
    Miter,
}

impl From<OffsetJoinType> for JoinType {
    fn from(jt: OffsetJoinType) -> Self {
        match jt {
            OffsetJoinType::Square => JoinType::Square,
            OffsetJoinType::Round => JoinType::Round(0.25), // Default arc tolerance
            OffsetJoinType::Miter => JoinType::Miter(2.0),  // Default miter limit
        }
    }
}

/// Convert a ring of scaled points to a closed geo ring in mm.
///
/// Clipper tells contours from holes by winding, so the ring is emitted
/// counter-clockwise for contours and clockwise for holes.
fn ring_to_geo(poly: &Polygon, counter_clockwise: bool) -> LineString<f64> {
    let mut ring: Vec<GeoCoord<f64>> = poly
        .points()
        .iter()
        .map(|p| GeoCoord {
            x: unscale(p.x),
            y: unscale(p.y),
        })
        .collect();
    if (poly.signed_area() > 0.0) != counter_clockwise {
        ring.reverse();
    }

    // Close the ring if needed
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(*first);
        }
    }
    LineString::new(ring)
}

/// Convert a geo ring back to our Polygon (without the closing point).
fn geo_to_ring(ring: &LineString<f64>) -> Polygon {
    let mut points: Vec<Point> = ring
        .coords()
        .map(|c| Point::new(scale(c.x), scale(c.y)))
        .collect();

    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Polygon::from_points(points)
}

/// Convert our ExPolygon to geo's Polygon type (with holes).
fn expolygon_to_geo(expoly: &ExPolygon) -> GeoPolygon<f64> {
    let holes = expoly.holes.iter().map(|h| ring_to_geo(h, false)).collect();
    GeoPolygon::new(ring_to_geo(&expoly.contour, true), holes)
}

/// Convert geo's Polygon to our ExPolygon type (with holes).
fn geo_to_expolygon(geo_poly: &GeoPolygon<f64>) -> ExPolygon {
    let holes = geo_poly.interiors().iter().map(geo_to_ring).collect();
    ExPolygon::with_holes(geo_to_ring(geo_poly.exterior()), holes)
}

fn expolygons_to_geo_multi(expolys: &[ExPolygon]) -> MultiPolygon<f64> {
    MultiPolygon::new(expolys.iter().map(expolygon_to_geo).collect())
}

fn geo_multi_to_expolygons(multi: &MultiPolygon<f64>) -> ExPolygons {
    multi
        .0
        .iter()
        .map(geo_to_expolygon)
        .filter(|expoly| !expoly.is_empty())
        .collect()
}

// ============================================================================
// Offset Operations
// ============================================================================

/// Offset multiple ExPolygons by a given distance.
///
/// Positive delta (mm) inflates the polygons, negative delta deflates them.
/// Polygons that collapse under a negative offset disappear from the result.
pub fn offset_expolygons(
    expolygons: &[ExPolygon],
    delta: CoordF,
    join_type: OffsetJoinType,
) -> ExPolygons {
    if expolygons.is_empty() {
        return vec![];
    }
    if delta == 0.0 {
        return expolygons.to_vec();
    }

    let geo_multi = expolygons_to_geo_multi(expolygons);
    let result = geo_multi.offset(delta, join_type.into(), EndType::ClosedPolygon, CLIPPER_FACTOR);
    geo_multi_to_expolygons(&result)
}

// ============================================================================
// Line Clipping
// ============================================================================

/// Intersect polylines with a set of ExPolygons, returning clipped polylines.
///
/// This keeps only the portions of the input polylines that lie inside an
/// ExPolygon's contour and outside all of its holes. Each input polyline may
/// produce zero, one, or multiple output polylines. Output order follows input
/// order, and pieces of one polyline are emitted in walking order.
///
/// # Arguments
/// * `polylines` - The polylines to clip
/// * `clip` - The ExPolygons to clip against (portions inside these are kept)
pub fn intersect_polylines_with_expolygons(
    polylines: &[Polyline],
    clip: &[ExPolygon],
) -> Vec<Polyline> {
    if polylines.is_empty() || clip.is_empty() {
        return vec![];
    }

    let mut result = Vec::new();
    for polyline in polylines {
        result.extend(clip_polyline_to_expolygons(polyline, clip));
    }
    result
}

/// Clip a single polyline to a set of ExPolygons.
fn clip_polyline_to_expolygons(polyline: &Polyline, clip: &[ExPolygon]) -> Vec<Polyline> {
    if !polyline.is_valid() {
        return vec![];
    }

    let mut result = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for edge in polyline.edges() {
        for piece in clip_segment_to_expolygons(&edge, clip) {
            // Pieces continuing from the previous segment extend the current run
            if current.last() == piece.first() {
                current.extend(piece.into_iter().skip(1));
            } else {
                if current.len() >= 2 {
                    result.push(Polyline::from_points(std::mem::take(&mut current)));
                }
                current = piece;
            }
        }
    }

    if current.len() >= 2 {
        result.push(Polyline::from_points(current));
    }
    result
}

/// Clip a line segment to a set of ExPolygons.
/// Returns the portions of the segment that are inside any of the ExPolygons.
fn clip_segment_to_expolygons(line: &Line, clip: &[ExPolygon]) -> Vec<Vec<Point>> {
    if line.is_point() {
        return if point_in_expolygons(&line.a, clip) {
            vec![vec![line.a, line.b]]
        } else {
            vec![]
        };
    }

    let mut params = vec![0.0, 1.0];
    for expoly in clip {
        for polygon in std::iter::once(&expoly.contour).chain(expoly.holes.iter()) {
            for edge in polygon.edges() {
                if let Some(t) = line.intersection_parameter(&edge) {
                    if t > 0.0 && t < 1.0 {
                        params.push(t);
                    }
                }
            }
        }
    }
    params.sort_by(|a, b| a.total_cmp(b));
    params.dedup();

    let mut pieces: Vec<Vec<Point>> = Vec::new();
    for window in params.windows(2) {
        let (t0, t1) = (window[0], window[1]);
        let start = line.point_at(t0);
        let end = line.point_at(t1);
        if start == end {
            continue;
        }
        if !point_in_expolygons(&line.point_at((t0 + t1) / 2.0), clip) {
            continue;
        }
        match pieces.last_mut() {
            // Collinear continuation: move the end point instead of adding one
            Some(last) if last.last() == Some(&start) => {
                if let Some(tail) = last.last_mut() {
                    *tail = end;
                }
            }
            _ => pieces.push(vec![start, end]),
        }
    }
    pieces
}

/// Check if a point is inside any of the given ExPolygons.
fn point_in_expolygons(pt: &Point, expolygons: &[ExPolygon]) -> bool {
    expolygons.iter().any(|expoly| expoly.contains_point(pt))
}
