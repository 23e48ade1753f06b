//! # Horizontal Honeycomb
//!
//! Per-layer hexagonal infill generator for a 3D-printing slicing pipeline.
//!
//! Each layer only ever draws straight, parallel lines. Stacked over many layers
//! the lines trace the walls of a honeycomb lattice lying on its side: on the
//! vertical faces of the hexagon prisms a single family of lines is printed, and
//! on the sloped faces that family splits into two which drift apart until they
//! merge into the next row of hexagons.
//!
//! This crate provides:
//! - Fixed-point geometry primitives (points, polygons with holes, polylines)
//! - Clipping of line geometry against polygons with holes
//! - The honeycomb line generator and a rectilinear baseline pattern
//! - Surface- and multi-layer entry points driven by a [`FillConfig`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use horizontal_honeycomb::{fill_surface, ExPolygon, FillConfig, Point, Polygon};
//!
//! let square = Polygon::rectangle(Point::new_scale(0.0, 0.0), Point::new_scale(20.0, 20.0));
//! let config = FillConfig::default();
//! let polylines = fill_surface(&config, 1.2, 6, &[ExPolygon::new(square)])?;
//! ```

pub mod clipper;
pub mod config;
pub mod geometry;
pub mod infill;

pub use config::{FillConfig, FillPattern, SplitMode, DEFAULT_BOUNDARY_MARGIN};
pub use geometry::{
    BoundingBox, ExPolygon, ExPolygons, Line, Lines, Point, Polygon, Polyline, Polylines,
};
pub use infill::honeycomb::{HexGeometry, HoneycombStrategy, Phase, RowPhase};
pub use infill::{
    fill_layers, fill_surface, infill_direction, FillDirection, LayerContext, LayerSlice,
};

/// Coordinate type used throughout the crate.
/// Using i64 for integer coordinates (scaled by SCALING_FACTOR) to avoid floating-point issues.
pub type Coord = i64;

/// Floating-point coordinate type for unscaled values.
pub type CoordF = f64;

/// Scaling factor: coordinates are stored as integers scaled by this factor.
/// 1 unit = 1 nanometer, so 1mm = 1_000_000 units.
pub const SCALING_FACTOR: f64 = 1_000_000.0;

/// Scale a floating-point coordinate to integer.
#[inline]
pub fn scale(v: CoordF) -> Coord {
    (v * SCALING_FACTOR).round() as Coord
}

/// Unscale an integer coordinate to floating-point.
#[inline]
pub fn unscale(v: Coord) -> CoordF {
    v as CoordF / SCALING_FACTOR
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for configuration and I/O around the generator.
///
/// The line generator itself never fails; only loading and validating its
/// configuration can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
