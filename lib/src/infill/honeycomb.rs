//! Horizontal honeycomb infill.
//!
//! The infill approximates a lattice of hexagonal prisms lying on their side,
//! with their axes parallel to the build plate. A horizontal slice through that
//! lattice is always a set of straight parallel lines; only their x positions
//! change with the slice height.
//!
//! # Algorithm
//!
//! Each hexagon is `2 * hex_side` tall, and successive rows share
//! `0.5 * hex_side`, so the height is divided into rows of `1.5 * hex_side`.
//! Within a row, `hex_fraction` runs from 0 to 1.5:
//!
//! - above 0.5 the slice cuts the vertical faces: one line per hexagon,
//!   `hex_width` apart, shifted by half a hexagon on odd rows;
//! - up to 0.5 the slice cuts the sloped faces: each line splits into two,
//!   `padding` either side of the vertical-face position, and `padding`
//!   shrinks to zero as the slice climbs towards the vertical faces.
//!
//! When the two halves of a split are closer than one extrusion spacing they
//! are printed as a single line, either at the vertical-face position (split
//! too narrow) or at the neighbouring row's position (split so wide the faces
//! of adjacent hexagons meet).
//!
//! Lines are laid out on a grid anchored at the line offset rather than at the
//! region's bounding box, so the same x positions recur on every layer and in
//! every region that shares an offset.

use super::LayerContext;
use crate::clipper::intersect_polylines_with_expolygons;
use crate::config::{FillConfig, SplitMode};
use crate::geometry::{BoundingBox, ExPolygon, Line, Lines, Point, Polyline, Polylines};
use crate::{scale, Coord, CoordF};
use log::{debug, trace};

/// Row height in units of `hex_side`.
const ROW_HEIGHT: CoordF = 1.5;

/// Above this `hex_fraction` the slice cuts the vertical hexagon faces.
const VERTICAL_FACE_START: CoordF = 0.5;

/// Hexagon dimensions derived from the fill spacing and density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGeometry {
    /// Horizontal width of one cell (mm).
    pub hex_width: CoordF,
    /// Side length of the hexagon (mm).
    pub hex_side: CoordF,
}

impl HexGeometry {
    pub fn new(spacing: CoordF, density: CoordF) -> Self {
        let hex_width = spacing / density * 1.5;
        Self {
            hex_width,
            hex_side: hex_width / 3.0_f64.sqrt(),
        }
    }
}

/// Which part of the hexagon the slice is cutting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// The vertical sides of the prisms.
    Vertical,
    /// The sloped transition between rows, with the two faces `padding` mm
    /// either side of the vertical-face position.
    Angled { padding: CoordF },
}

/// Position of a slice height within the stack of hexagon rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowPhase {
    /// Row index.
    pub hex_index: u64,
    /// Position within the row, in `[0, 1.5)` units of `hex_side`.
    pub hex_fraction: CoordF,
}

impl RowPhase {
    /// Locate height `z` (mm) in the row stack.
    pub fn at(z: CoordF, geometry: &HexGeometry) -> Self {
        let a = z / geometry.hex_side;
        let mut hex_index = (a / ROW_HEIGHT).floor().max(0.0) as u64;
        let mut hex_fraction = a - hex_index as CoordF * ROW_HEIGHT;

        // a / 1.5 can round across an integer; keep the fraction in range
        if hex_fraction >= ROW_HEIGHT {
            hex_index += 1;
            hex_fraction -= ROW_HEIGHT;
        }
        if hex_fraction < 0.0 {
            hex_fraction = 0.0;
        }

        Self {
            hex_index,
            hex_fraction,
        }
    }

    /// Horizontal shift of this row's lines: 0 on even rows, half a cell on odd rows.
    #[inline]
    pub fn offset(&self, hex_width: CoordF) -> CoordF {
        hex_width * (self.hex_index % 2) as CoordF / 2.0
    }

    /// The offset of the opposite row parity.
    #[inline]
    pub fn flipped_offset(&self, hex_width: CoordF) -> CoordF {
        hex_width * ((self.hex_index + 1) % 2) as CoordF / 2.0
    }

    pub fn phase(&self, hex_width: CoordF) -> Phase {
        if self.hex_fraction > VERTICAL_FACE_START {
            Phase::Vertical
        } else {
            Phase::Angled {
                padding: hex_width * (VERTICAL_FACE_START - self.hex_fraction),
            }
        }
    }
}

/// Line layout chosen for one slice height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoneycombStrategy {
    /// Vertical faces: one family at the row offset.
    Vertical { offset: CoordF },
    /// Sloped faces closer together than the spacing: one family at the row offset.
    CollapseLow { offset: CoordF },
    /// Sloped faces of neighbouring cells closer than the spacing: one family
    /// at the opposite row parity's offset.
    CollapseHigh { offset: CoordF },
    /// Both sloped faces, at `offset - padding` and `offset + padding`.
    Split { offset: CoordF, padding: CoordF },
}

impl HoneycombStrategy {
    /// Pick the line layout for a row phase. `spacing` is the extrusion spacing (mm).
    pub fn select(geometry: &HexGeometry, row: &RowPhase, spacing: CoordF) -> Self {
        let hex_width = geometry.hex_width;
        let offset = row.offset(hex_width);

        match row.phase(hex_width) {
            Phase::Vertical => HoneycombStrategy::Vertical { offset },
            Phase::Angled { padding } => {
                if 2.0 * padding < spacing {
                    HoneycombStrategy::CollapseLow { offset }
                } else if hex_width - 2.0 * padding < spacing {
                    HoneycombStrategy::CollapseHigh {
                        offset: row.flipped_offset(hex_width),
                    }
                } else {
                    HoneycombStrategy::Split { offset, padding }
                }
            }
        }
    }

    /// Line families this strategy emits, in emission order, as
    /// `(offset, shift)` pairs (mm). Each family sits at `offset + shift`.
    fn families(&self, split_mode: SplitMode, layer_id: usize) -> Vec<(CoordF, CoordF)> {
        match *self {
            HoneycombStrategy::Vertical { offset }
            | HoneycombStrategy::CollapseLow { offset }
            | HoneycombStrategy::CollapseHigh { offset } => vec![(offset, 0.0)],
            HoneycombStrategy::Split { offset, padding } => match split_mode {
                SplitMode::Both => vec![(offset, -padding), (offset, padding)],
                SplitMode::LayerParity if layer_id % 2 == 0 => vec![(offset, -padding)],
                SplitMode::LayerParity => vec![(offset, padding)],
            },
        }
    }

    /// Offsets (mm) of the line families this strategy emits, in emission order.
    pub fn family_offsets(&self, split_mode: SplitMode, layer_id: usize) -> Vec<CoordF> {
        self.families(split_mode, layer_id)
            .into_iter()
            .map(|(offset, shift)| offset + shift)
            .collect()
    }

    /// Lay out this strategy's line families across `bounding_box`.
    ///
    /// Offset and shift are scaled separately, so the two split families are
    /// exactly `2 * scale(padding)` apart.
    pub fn generate_lines(
        &self,
        bounding_box: &BoundingBox,
        hex_width: CoordF,
        split_mode: SplitMode,
        layer_id: usize,
    ) -> Lines {
        let center_spacing = scale(hex_width);
        self.families(split_mode, layer_id)
            .into_iter()
            .flat_map(|(offset, shift)| {
                generate_single_lines(bounding_box, center_spacing, scale(offset) + scale(shift))
            })
            .collect()
    }

    /// Short name for logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            HoneycombStrategy::Vertical { .. } => "vertical",
            HoneycombStrategy::CollapseLow { .. } => "collapse-low",
            HoneycombStrategy::CollapseHigh { .. } => "collapse-high",
            HoneycombStrategy::Split { .. } => "split",
        }
    }
}

/// Generate full-height vertical lines every `center_spacing`, on the grid
/// `x = offset + k * center_spacing`, from the first grid position at or right
/// of `bounding_box.min.x` up to `bounding_box.max.x`.
///
/// Returns lines ordered left to right; an empty or inverted box yields none.
pub fn generate_single_lines(
    bounding_box: &BoundingBox,
    center_spacing: Coord,
    offset: Coord,
) -> Lines {
    if bounding_box.is_empty() || center_spacing <= 0 {
        return Lines::new();
    }

    let remainder = (bounding_box.min.x - offset).rem_euclid(center_spacing);
    let mut x = if remainder == 0 {
        bounding_box.min.x
    } else {
        bounding_box.min.x + center_spacing - remainder
    };

    let count = ((bounding_box.max.x - x) / center_spacing + 1).max(0) as usize;
    let mut lines = Lines::with_capacity(count);
    while x <= bounding_box.max.x {
        lines.push(Line::new(
            Point::new(x, bounding_box.min.y),
            Point::new(x, bounding_box.max.y),
        ));
        x += center_spacing;
    }
    lines
}

/// Generate the two sloped-face families: the family at `offset - padding`
/// followed by the family at `offset + padding`.
pub fn generate_split_lines(
    bounding_box: &BoundingBox,
    center_spacing: Coord,
    padding: Coord,
    offset: Coord,
) -> Lines {
    let mut lines = generate_single_lines(bounding_box, center_spacing, offset - padding);
    lines.extend(generate_single_lines(bounding_box, center_spacing, offset + padding));
    lines
}

/// Fill one region with horizontal honeycomb lines.
///
/// The region is rotated by the layer direction first, and the returned
/// polylines stay in that rotated frame; rotating them back is up to the caller.
pub fn fill_expolygon(
    config: &FillConfig,
    split_mode: SplitMode,
    context: &LayerContext,
    expolygon: &ExPolygon,
) -> Polylines {
    let region = expolygon.rotated(context.direction.angle, context.direction.pivot);
    let bounding_box = region.bounding_box();
    if bounding_box.is_empty() {
        return Polylines::new();
    }
    let bounding_box = bounding_box.inflated(scale(config.boundary_margin));

    let geometry = HexGeometry::new(config.spacing, config.density);
    let row = RowPhase::at(context.z, &geometry);
    let strategy = HoneycombStrategy::select(&geometry, &row, config.spacing);
    debug!(
        "honeycomb z={:.3} layer={} row={} fraction={:.4} strategy={}",
        context.z,
        context.layer_id,
        row.hex_index,
        row.hex_fraction,
        strategy.name()
    );

    let lines =
        strategy.generate_lines(&bounding_box, geometry.hex_width, split_mode, context.layer_id);
    let candidates: Vec<Polyline> = lines.iter().map(Line::to_polyline).collect();
    let clipped = intersect_polylines_with_expolygons(&candidates, std::slice::from_ref(&region));
    trace!(
        "honeycomb layer {}: {} candidate lines, {} clipped polylines",
        context.layer_id,
        candidates.len(),
        clipped.len()
    );
    clipped
}
