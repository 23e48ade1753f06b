//! Axis-aligned bounding box.

use super::Point;
use crate::Coord;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in scaled coordinates.
///
/// A box built from no points is undefined and reports itself as empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
    pub defined: bool,
}

impl BoundingBox {
    /// Create an undefined (empty) bounding box.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bounding box from explicit corners.
    #[inline]
    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self {
            min,
            max,
            defined: true,
        }
    }

    /// Bounding box of a set of points.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bbox = Self::new();
        for p in points {
            bbox.merge_point(*p);
        }
        bbox
    }

    /// Grow the box to include `p`.
    pub fn merge_point(&mut self, p: Point) {
        if self.defined {
            self.min.x = self.min.x.min(p.x);
            self.min.y = self.min.y.min(p.y);
            self.max.x = self.max.x.max(p.x);
            self.max.y = self.max.y.max(p.y);
        } else {
            self.min = p;
            self.max = p;
            self.defined = true;
        }
    }

    /// Grow the box to include another box.
    pub fn merge(&mut self, other: &BoundingBox) {
        if other.defined {
            self.merge_point(other.min);
            self.merge_point(other.max);
        }
    }

    /// Expand the box by `delta` on every side. Undefined boxes stay undefined.
    pub fn offset(&mut self, delta: Coord) {
        if self.defined {
            self.min.x -= delta;
            self.min.y -= delta;
            self.max.x += delta;
            self.max.y += delta;
        }
    }

    /// Return a copy expanded by `delta` on every side.
    #[inline]
    pub fn inflated(&self, delta: Coord) -> Self {
        let mut bbox = *self;
        bbox.offset(delta);
        bbox
    }

    #[inline]
    pub fn width(&self) -> Coord {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> Coord {
        self.max.y - self.min.y
    }

    /// True when undefined, zero-area or inverted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.defined || self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    /// Check whether `p` lies inside or on the border of the box.
    #[inline]
    pub fn contains(&self, p: &Point) -> bool {
        self.defined
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(&[
            Point::new(5, -3),
            Point::new(-2, 8),
            Point::new(1, 1),
        ]);
        assert!(bbox.defined);
        assert_eq!(bbox.min, Point::new(-2, -3));
        assert_eq!(bbox.max, Point::new(5, 8));
        assert_eq!(bbox.center(), Point::new(1, 2));
    }

    #[test]
    fn test_empty_box() {
        let bbox = BoundingBox::from_points(&[]);
        assert!(!bbox.defined);
        assert!(bbox.is_empty());

        // Expanding an undefined box must not make it defined
        assert!(bbox.inflated(1_000).is_empty());
    }

    #[test]
    fn test_degenerate_and_inverted() {
        let flat = BoundingBox::from_min_max(Point::new(0, 5), Point::new(10, 5));
        assert!(flat.is_empty());

        let inverted = BoundingBox::from_min_max(Point::new(10, 10), Point::new(0, 0));
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_inflated() {
        let bbox = BoundingBox::from_min_max(Point::new(0, 0), Point::new(10, 20));
        let grown = bbox.inflated(5);
        assert_eq!(grown.min, Point::new(-5, -5));
        assert_eq!(grown.max, Point::new(15, 25));
        assert!(grown.contains(&Point::new(-5, 25)));
        assert!(!grown.contains(&Point::new(-6, 0)));
    }
}
