//! Fill configuration types.
//!
//! A [`FillConfig`] is fixed for the lifetime of a fill instance and is only
//! ever read by the generators. It is validated once, up front, so the line
//! generators themselves never have to re-check it.

use crate::{CoordF, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default expansion of the region bounding box before lines are laid out (mm).
pub const DEFAULT_BOUNDARY_MARGIN: CoordF = 1.0;

/// How the split (angled-face) regime of the honeycomb emits its two line families.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Emit both slanted faces on every layer.
    #[default]
    Both,
    /// Emit the `offset - padding` face on even layers and the
    /// `offset + padding` face on odd layers.
    LayerParity,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::Both => write!(f, "both"),
            SplitMode::LayerParity => write!(f, "layer-parity"),
        }
    }
}

/// Fill pattern, carrying the parameters specific to each pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillPattern {
    /// Parallel lines at `spacing / density`, turned 90° on every odd layer.
    Rectilinear,
    /// Horizontal honeycomb: hexagon prisms lying on their side, built up
    /// from straight lines whose phase follows the layer height.
    HorizontalHoneycomb {
        #[serde(default)]
        split_mode: SplitMode,
    },
}

impl Default for FillPattern {
    fn default() -> Self {
        FillPattern::HorizontalHoneycomb {
            split_mode: SplitMode::Both,
        }
    }
}

impl fmt::Display for FillPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPattern::Rectilinear => write!(f, "Rectilinear"),
            FillPattern::HorizontalHoneycomb { split_mode } => {
                write!(f, "Horizontal Honeycomb (split: {})", split_mode)
            }
        }
    }
}

/// Configuration of a fill instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Extrusion line spacing (mm). This is also the smallest separation
    /// between two lines the process can resolve.
    pub spacing: CoordF,

    /// Target fill fraction, in (0, 1].
    pub density: CoordF,

    /// Base fill angle (degrees).
    pub angle: CoordF,

    /// Overlap between infill and perimeters (mm).
    pub overlap: CoordF,

    /// Expansion of the bounding box used for line layout (mm), so clipping
    /// never leaves a gap along the region edge.
    pub boundary_margin: CoordF,

    /// Center of the fill rotation (mm, `[x, y]`).
    ///
    /// Shared by every region and layer of an object, so the line grid stays
    /// at the same world positions as the cross-section changes. Callers
    /// normally set it to the object's bounding-box center.
    pub pivot: [CoordF; 2],

    /// Pattern to generate.
    pub pattern: FillPattern,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            spacing: 0.45,
            density: 0.2,
            angle: 0.0,
            overlap: 0.0,
            boundary_margin: DEFAULT_BOUNDARY_MARGIN,
            pivot: [0.0, 0.0],
            pattern: FillPattern::default(),
        }
    }
}

impl FillConfig {
    /// Create a honeycomb configuration with the given spacing and density.
    pub fn new(spacing: CoordF, density: CoordF) -> Self {
        Self {
            spacing,
            density,
            ..Default::default()
        }
    }

    /// Builder method: set the fill pattern.
    pub fn pattern(mut self, pattern: FillPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Builder method: set the base fill angle (degrees).
    pub fn angle(mut self, angle: CoordF) -> Self {
        self.angle = angle;
        self
    }

    /// Builder method: set the perimeter overlap (mm).
    pub fn overlap(mut self, overlap: CoordF) -> Self {
        self.overlap = overlap;
        self
    }

    /// Builder method: set the bounding box margin (mm).
    pub fn boundary_margin(mut self, margin: CoordF) -> Self {
        self.boundary_margin = margin;
        self
    }

    /// Builder method: set the rotation center (mm).
    pub fn pivot(mut self, x: CoordF, y: CoordF) -> Self {
        self.pivot = [x, y];
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("spacing", self.spacing),
            ("density", self.density),
            ("angle", self.angle),
            ("overlap", self.overlap),
            ("boundary_margin", self.boundary_margin),
            ("pivot.x", self.pivot[0]),
            ("pivot.y", self.pivot[1]),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::Config(format!("{} must be finite", name)));
        }
        if self.spacing <= 0.0 {
            return Err(Error::Config("spacing must be positive".into()));
        }
        if self.density <= 0.0 || self.density > 1.0 {
            return Err(Error::Config(format!(
                "density must be in (0, 1], got {}",
                self.density
            )));
        }
        if self.boundary_margin < 0.0 {
            return Err(Error::Config("boundary_margin must not be negative".into()));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FillConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for FillConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FillConfig({}, spacing={:.3}mm, density={:.0}%)",
            self.pattern,
            self.spacing,
            self.density * 100.0
        )
    }
}
