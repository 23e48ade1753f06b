//! Infill generation.
//!
//! This module turns a layer's fill region into straight toolpath
//! centerlines. The pattern itself is chosen by [`FillPattern`]; this module
//! owns everything around it:
//!
//! # Algorithm
//!
//! 1. Validate the [`FillConfig`]
//! 2. Inset the region by half a spacing (less the perimeter overlap), so the
//!    centerlines keep the extrusion inside the region
//! 3. Rotate each resulting ExPolygon about the configured pivot
//! 4. Generate the pattern in the rotated frame (see [`FillPattern::generate`])
//! 5. Rotate the polylines back into the region's frame
//!
//! Every step is a pure function of its inputs, so layers can be filled in
//! parallel ([`fill_layers`]).

pub mod honeycomb;

use crate::clipper::{intersect_polylines_with_expolygons, offset_expolygons, OffsetJoinType};
use crate::config::{FillConfig, FillPattern};
use crate::geometry::{ExPolygon, ExPolygons, Line, Point, Polyline, Polylines};
use crate::{scale, CoordF, Result};
use log::{debug, trace};
use rayon::prelude::*;
use std::f64::consts::FRAC_PI_2;

/// Rotation applied to a region before its fill lines are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FillDirection {
    /// Rotation angle (radians, counter-clockwise).
    pub angle: CoordF,
    /// Center of rotation.
    pub pivot: Point,
}

/// Per-layer inputs of a fill call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerContext {
    /// Slice height (mm).
    pub z: CoordF,
    /// Layer index.
    pub layer_id: usize,
    /// Fill direction of the region being filled.
    pub direction: FillDirection,
}

/// One layer's fill region, as passed to [`fill_layers`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerSlice {
    /// Slice height (mm).
    pub z: CoordF,
    /// Layer index.
    pub layer_id: usize,
    /// Region to fill.
    pub surface: ExPolygons,
}

impl LayerSlice {
    pub fn new(z: CoordF, layer_id: usize, surface: ExPolygons) -> Self {
        Self {
            z,
            layer_id,
            surface,
        }
    }
}

impl FillPattern {
    /// Generate fill lines for one region.
    ///
    /// `expolygon` is given in its own frame and is rotated by
    /// `context.direction` internally. The polylines are returned in the
    /// rotated frame, so the caller must rotate them back by
    /// `-context.direction.angle` about the same pivot.
    pub fn generate(
        &self,
        config: &FillConfig,
        context: &LayerContext,
        expolygon: &ExPolygon,
    ) -> Polylines {
        match *self {
            FillPattern::HorizontalHoneycomb { split_mode } => {
                honeycomb::fill_expolygon(config, split_mode, context, expolygon)
            }
            FillPattern::Rectilinear => fill_rectilinear(config, context, expolygon),
        }
    }

    /// Extra rotation for this layer (radians).
    ///
    /// The honeycomb lines must keep their direction on every layer for the
    /// prisms to stack, so only rectilinear alternates.
    pub fn layer_angle(&self, layer_id: usize) -> CoordF {
        match self {
            FillPattern::HorizontalHoneycomb { .. } => 0.0,
            FillPattern::Rectilinear if layer_id % 2 == 1 => FRAC_PI_2,
            FillPattern::Rectilinear => 0.0,
        }
    }
}

/// Parallel lines at `spacing / density`, anchored at x = 0 in the rotated frame.
fn fill_rectilinear(
    config: &FillConfig,
    context: &LayerContext,
    expolygon: &ExPolygon,
) -> Polylines {
    let region = expolygon.rotated(context.direction.angle, context.direction.pivot);
    let bounding_box = region.bounding_box();
    if bounding_box.is_empty() {
        return Polylines::new();
    }
    let bounding_box = bounding_box.inflated(scale(config.boundary_margin));

    let line_spacing = scale(config.spacing / config.density);
    let lines = honeycomb::generate_single_lines(&bounding_box, line_spacing, 0);
    let candidates: Vec<Polyline> = lines.iter().map(Line::to_polyline).collect();
    let clipped = intersect_polylines_with_expolygons(&candidates, std::slice::from_ref(&region));
    trace!(
        "rectilinear layer {}: {} candidate lines, {} clipped polylines",
        context.layer_id,
        candidates.len(),
        clipped.len()
    );
    clipped
}

/// Compute the fill direction for a layer.
///
/// The lines are laid out vertically in the rotated frame, so a quarter turn
/// is added on top of the configured angle to make a 0° fill run along X.
/// The pivot comes from the configuration, never from the region, so every
/// region and layer shares one line grid.
pub fn infill_direction(
    config: &FillConfig,
    pattern: &FillPattern,
    layer_id: usize,
) -> FillDirection {
    FillDirection {
        angle: config.angle.to_radians() + pattern.layer_angle(layer_id) + FRAC_PI_2,
        pivot: Point::new_scale(config.pivot[0], config.pivot[1]),
    }
}

/// Fill a layer's surface and return the toolpath centerlines in the
/// surface's own frame.
///
/// # Arguments
/// * `config` - Fill configuration, validated before anything is generated
/// * `z` - Slice height (mm)
/// * `layer_id` - Layer index
/// * `surface` - Region to fill, before any inset
///
/// # Returns
/// The polylines of every ExPolygon, concatenated in input order. An empty
/// surface, or one that vanishes under the inset, yields no polylines.
pub fn fill_surface(
    config: &FillConfig,
    z: CoordF,
    layer_id: usize,
    surface: &[ExPolygon],
) -> Result<Polylines> {
    config.validate()?;
    Ok(fill_surface_unchecked(config, z, layer_id, surface))
}

fn fill_surface_unchecked(
    config: &FillConfig,
    z: CoordF,
    layer_id: usize,
    surface: &[ExPolygon],
) -> Polylines {
    if surface.is_empty() {
        return Polylines::new();
    }

    let inset = config.overlap - config.spacing / 2.0;
    let fill_area = offset_expolygons(surface, inset, OffsetJoinType::Miter);

    let direction = infill_direction(config, &config.pattern, layer_id);
    let context = LayerContext {
        z,
        layer_id,
        direction,
    };

    let mut polylines = Polylines::new();
    for expolygon in &fill_area {
        for mut polyline in config.pattern.generate(config, &context, expolygon) {
            if !polyline.is_valid() {
                continue;
            }
            polyline.rotate(-direction.angle, direction.pivot);
            polylines.push(polyline);
        }
    }

    debug!(
        "layer {} z={:.3}: {} regions, {} polylines",
        layer_id,
        z,
        fill_area.len(),
        polylines.len()
    );
    polylines
}

/// Fill several layers in parallel.
///
/// Returns one set of polylines per input layer, in input order.
pub fn fill_layers(config: &FillConfig, layers: &[LayerSlice]) -> Result<Vec<Polylines>> {
    config.validate()?;
    Ok(layers
        .par_iter()
        .map(|layer| fill_surface_unchecked(config, layer.z, layer.layer_id, &layer.surface))
        .collect())
}
