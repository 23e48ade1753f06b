//! Point type with scaled integer coordinates.

use crate::{scale, unscale, Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A 2D point in scaled integer coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    /// Create a new point from scaled coordinates.
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Create a point from coordinates in mm.
    #[inline]
    pub fn new_scale(x: CoordF, y: CoordF) -> Self {
        Self {
            x: scale(x),
            y: scale(y),
        }
    }

    /// Coordinates in mm.
    #[inline]
    pub fn to_mm(&self) -> (CoordF, CoordF) {
        (unscale(self.x), unscale(self.y))
    }

    /// Euclidean distance to another point (scaled units).
    #[inline]
    pub fn distance(&self, other: &Point) -> CoordF {
        let dx = (other.x - self.x) as CoordF;
        let dy = (other.y - self.y) as CoordF;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotate the point about `center` by `angle` radians (counter-clockwise).
    ///
    /// The result is rounded to the nearest scaled unit.
    pub fn rotate(&mut self, angle: CoordF, center: Point) {
        let (s, c) = angle.sin_cos();
        let dx = (self.x - center.x) as CoordF;
        let dy = (self.y - center.y) as CoordF;
        self.x = (center.x as CoordF + c * dx - s * dy).round() as Coord;
        self.y = (center.y as CoordF + c * dy + s * dx).round() as Coord;
    }

    /// Return a copy rotated about `center` by `angle` radians.
    #[inline]
    pub fn rotated(&self, angle: CoordF, center: Point) -> Self {
        let mut p = *self;
        p.rotate(angle, center);
        p
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", unscale(self.x), unscale(self.y))
    }
}

/// Type alias for a collection of points.
pub type Points = Vec<Point>;
