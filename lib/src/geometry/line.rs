//! Line segment type.
//!
//! This module provides the Line type representing a line segment between two points.
//! Infill line families are built as `Lines` and only turned into polylines when
//! they are clipped against the fill region.

use super::{Point, Polyline};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line segment defined by two endpoints.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    /// Create a new line segment from two points.
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Create a line from coordinates.
    #[inline]
    pub const fn from_coords(ax: Coord, ay: Coord, bx: Coord, by: Coord) -> Self {
        Self {
            a: Point::new(ax, ay),
            b: Point::new(bx, by),
        }
    }

    /// Create a line from floating-point coordinates (in mm).
    #[inline]
    pub fn from_coords_scale(ax: CoordF, ay: CoordF, bx: CoordF, by: CoordF) -> Self {
        Self {
            a: Point::new_scale(ax, ay),
            b: Point::new_scale(bx, by),
        }
    }

    /// Get the direction vector (b - a).
    #[inline]
    pub fn direction(&self) -> Point {
        self.b - self.a
    }

    /// Get the midpoint of the line segment.
    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new((self.a.x + self.b.x) / 2, (self.a.y + self.b.y) / 2)
    }

    /// Get the length of the line segment.
    #[inline]
    pub fn length(&self) -> CoordF {
        self.a.distance(&self.b)
    }

    /// Check if this line segment is a point (zero length).
    #[inline]
    pub fn is_point(&self) -> bool {
        self.a == self.b
    }

    /// Check if the segment is parallel to the Y axis.
    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.a.x == self.b.x
    }

    /// Reverse the direction of the line segment.
    #[inline]
    pub fn reverse(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    /// Point at parameter `t` along the segment (0 = a, 1 = b), rounded to the grid.
    #[inline]
    pub fn point_at(&self, t: CoordF) -> Point {
        Point::new(
            (self.a.x as CoordF + t * (self.b.x - self.a.x) as CoordF).round() as Coord,
            (self.a.y as CoordF + t * (self.b.y - self.a.y) as CoordF).round() as Coord,
        )
    }

    /// Check if a point lies exactly on this line segment.
    pub fn contains_point(&self, p: &Point) -> bool {
        let d = self.direction();
        let ap = *p - self.a;
        let cross = d.x as i128 * ap.y as i128 - d.y as i128 * ap.x as i128;
        if cross != 0 {
            return false;
        }
        p.x >= self.a.x.min(self.b.x)
            && p.x <= self.a.x.max(self.b.x)
            && p.y >= self.a.y.min(self.b.y)
            && p.y <= self.a.y.max(self.b.y)
    }

    /// Parameter `t` along this segment at which it crosses `edge`.
    ///
    /// Returns `None` for parallel segments or when the crossing falls outside
    /// `edge`. The returned `t` is not clamped to this segment.
    pub fn intersection_parameter(&self, edge: &Line) -> Option<CoordF> {
        let d1x = (self.b.x - self.a.x) as CoordF;
        let d1y = (self.b.y - self.a.y) as CoordF;
        let d2x = (edge.b.x - edge.a.x) as CoordF;
        let d2y = (edge.b.y - edge.a.y) as CoordF;

        let cross = d1x * d2y - d1y * d2x;
        if cross.abs() < 1e-10 {
            return None;
        }

        let dx = (edge.a.x - self.a.x) as CoordF;
        let dy = (edge.a.y - self.a.y) as CoordF;

        let t = (dx * d2y - dy * d2x) / cross;
        let u = (dx * d1y - dy * d1x) / cross;

        if (0.0..=1.0).contains(&u) {
            Some(t)
        } else {
            None
        }
    }

    /// Convert to a two-point polyline.
    #[inline]
    pub fn to_polyline(&self) -> Polyline {
        Polyline::from_points(vec![self.a, self.b])
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?} -> {:?})", self.a, self.b)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.a, self.b)
    }
}

impl From<Line> for Polyline {
    fn from(line: Line) -> Self {
        line.to_polyline()
    }
}

/// Type alias for a collection of lines.
pub type Lines = Vec<Line>;
