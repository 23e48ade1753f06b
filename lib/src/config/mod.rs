//! Configuration module.
//!
//! Settings that stay fixed for a whole fill instance: line spacing, density,
//! the pattern to draw and its parameters.

mod fill_config;

pub use fill_config::{FillConfig, FillPattern, SplitMode, DEFAULT_BOUNDARY_MARGIN};
