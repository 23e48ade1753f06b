//! Geometry primitives for the infill generator.
//!
//! This module provides the fundamental geometric types:
//! - [`Point`] - 2D point with integer coordinates (scaled)
//! - [`Line`] - Line segment between two points
//! - [`Polygon`] - Closed polygon (boundary)
//! - [`Polyline`] - Open polyline (path)
//! - [`ExPolygon`] - Polygon with holes (exterior + interior contours)
//! - [`BoundingBox`] - Axis-aligned bounding box
//!
//! ## Coordinate System
//!
//! Coordinates are scaled integers to avoid floating-point precision issues.
//! They are scaled by `SCALING_FACTOR` (1,000,000), so 1 unit = 1 nanometer.
//!
//! - Use `scale()` to convert from mm to internal units
//! - Use `unscale()` to convert from internal units to mm
//!
//! Rotations round every vertex back onto the integer grid, so a rotate /
//! inverse-rotate round trip may move a point by one unit.

mod bounding_box;
mod expolygon;
mod line;
mod point;
mod polygon;
mod polyline;

pub use bounding_box::BoundingBox;
pub use expolygon::{ExPolygon, ExPolygons};
pub use line::{Line, Lines};
pub use point::{Point, Points};
pub use polygon::{Polygon, Polygons};
pub use polyline::{Polyline, Polylines};
