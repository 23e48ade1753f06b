//! Closed polygon type.
//!
//! A Polygon stores its vertices without repeating the first point at the end;
//! the closing edge from the last vertex back to the first is implicit.

use super::{BoundingBox, Line, Point};
use crate::CoordF;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed polygon defined by a sequence of points.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create an axis-aligned rectangle (counter-clockwise).
    pub fn rectangle(min: Point, max: Point) -> Self {
        Self::from_points(vec![
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.points.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| Line::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed area in scaled units squared (positive for counter-clockwise).
    pub fn signed_area(&self) -> CoordF {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice: i128 = 0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128;
        }
        twice as CoordF / 2.0
    }

    /// Absolute area in scaled units squared.
    #[inline]
    pub fn area(&self) -> CoordF {
        self.signed_area().abs()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Rotate every vertex about `center` by `angle` radians.
    pub fn rotate(&mut self, angle: CoordF, center: Point) {
        for p in &mut self.points {
            p.rotate(angle, center);
        }
    }

    /// Check whether `p` lies on one of the polygon's edges.
    pub fn on_boundary(&self, p: &Point) -> bool {
        self.edges().any(|edge| edge.contains_point(p))
    }

    /// Point-in-polygon test (even-odd crossing rule).
    ///
    /// Points on the boundary count as inside.
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        if self.on_boundary(p) {
            return true;
        }
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                // x coordinate of the edge at height p.y
                let t = (p.y - a.y) as CoordF / (b.y - a.y) as CoordF;
                let x = a.x as CoordF + t * (b.x - a.x) as CoordF;
                if (p.x as CoordF) < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} points)", self.points.len())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

/// Type alias for a collection of polygons.
pub type Polygons = Vec<Polygon>;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_square() -> Polygon {
        Polygon::rectangle(Point::new(0, 0), Point::new(100, 100))
    }

    #[test]
    fn test_rectangle_area() {
        let square = make_square();
        assert_eq!(square.len(), 4);
        assert!((square.signed_area() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_clockwise_area_is_negative() {
        let mut points = make_square().into_points();
        points.reverse();
        let cw = Polygon::from_points(points);
        assert!(cw.signed_area() < 0.0);
        assert!((cw.area() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_edges_include_closing_edge() {
        let square = make_square();
        let edges: Vec<Line> = square.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], Line::new(Point::new(0, 100), Point::new(0, 0)));
    }

    #[test]
    fn test_contains_point() {
        let square = make_square();
        assert!(square.contains_point(&Point::new(50, 50)));
        assert!(square.contains_point(&Point::new(0, 50))); // boundary
        assert!(square.contains_point(&Point::new(100, 100))); // corner
        assert!(!square.contains_point(&Point::new(101, 50)));
        assert!(!square.contains_point(&Point::new(50, -1)));
    }

    #[test]
    fn test_contains_point_concave() {
        // L-shape with the notch at the top right
        let l = Polygon::from_points(vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 50),
            Point::new(50, 50),
            Point::new(50, 100),
            Point::new(0, 100),
        ]);
        assert!(l.contains_point(&Point::new(25, 75)));
        assert!(l.contains_point(&Point::new(75, 25)));
        assert!(!l.contains_point(&Point::new(75, 75)));
    }

    #[test]
    fn test_rotate_preserves_area() {
        let mut square = make_square();
        square.rotate(std::f64::consts::PI / 2.0, Point::new(50, 50));
        assert!((square.area() - 10_000.0).abs() < 1e-9);
        assert_eq!(square.points()[0], Point::new(100, 0));
    }
}
