//! Polygon with holes.

use super::{BoundingBox, Point, Polygon};
use crate::CoordF;
use serde::{Deserialize, Serialize};

/// A polygon with holes: an outer contour and zero or more hole contours.
///
/// This is the material cross-section of one region of a slice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExPolygon {
    pub contour: Polygon,
    pub holes: Vec<Polygon>,
}

impl ExPolygon {
    /// Create an ExPolygon without holes.
    #[inline]
    pub fn new(contour: Polygon) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn with_holes(contour: Polygon, holes: Vec<Polygon>) -> Self {
        Self { contour, holes }
    }

    /// Area of the contour minus the area of the holes (scaled units squared).
    pub fn area(&self) -> CoordF {
        self.contour.area() - self.holes.iter().map(|h| h.area()).sum::<CoordF>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contour.len() < 3
    }

    /// Bounding box of the outer contour.
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.contour.bounding_box()
    }

    /// Rotate the contour and every hole about `center` by `angle` radians.
    pub fn rotate(&mut self, angle: CoordF, center: Point) {
        self.contour.rotate(angle, center);
        for hole in &mut self.holes {
            hole.rotate(angle, center);
        }
    }

    /// Return a rotated copy.
    pub fn rotated(&self, angle: CoordF, center: Point) -> Self {
        let mut copy = self.clone();
        copy.rotate(angle, center);
        copy
    }

    /// Check whether `p` is inside the contour and not strictly inside any hole.
    ///
    /// Points on the contour or on a hole boundary count as inside.
    pub fn contains_point(&self, p: &Point) -> bool {
        if !self.contour.contains_point(p) {
            return false;
        }
        !self
            .holes
            .iter()
            .any(|hole| hole.contains_point(p) && !hole.on_boundary(p))
    }
}

impl From<Polygon> for ExPolygon {
    fn from(contour: Polygon) -> Self {
        Self::new(contour)
    }
}

/// Type alias for a collection of ExPolygons.
pub type ExPolygons = Vec<ExPolygon>;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_square_with_hole() -> ExPolygon {
        let outer = Polygon::rectangle(Point::new(0, 0), Point::new(300, 300));
        let hole = Polygon::rectangle(Point::new(100, 100), Point::new(200, 200));
        ExPolygon::with_holes(outer, vec![hole])
    }

    #[test]
    fn test_area_subtracts_holes() {
        let expoly = make_square_with_hole();
        assert!((expoly.area() - 80_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains_point_with_hole() {
        let expoly = make_square_with_hole();
        assert!(expoly.contains_point(&Point::new(50, 50)));
        assert!(!expoly.contains_point(&Point::new(150, 150)));
        assert!(expoly.contains_point(&Point::new(100, 150))); // hole boundary
        assert!(!expoly.contains_point(&Point::new(350, 150)));
    }

    #[test]
    fn test_rotate_moves_holes() {
        let expoly = make_square_with_hole();
        let rotated = expoly.rotated(std::f64::consts::PI, Point::new(150, 150));
        // A half turn about the center maps the square onto itself
        assert_eq!(rotated.bounding_box(), expoly.bounding_box());
        assert_eq!(rotated.holes[0].bounding_box(), expoly.holes[0].bounding_box());
    }

    #[test]
    fn test_empty() {
        assert!(ExPolygon::default().is_empty());
        assert!(!make_square_with_hole().is_empty());
    }
}
