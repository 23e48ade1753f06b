//! Layer-stack tests for the horizontal honeycomb fill.
//!
//! These drive the public API across z sweeps the way a slicing pipeline
//! would, and check the properties that only show up between layers.

use horizontal_honeycomb::{
    fill_layers, fill_surface, scale, BoundingBox, ExPolygon, FillConfig, FillPattern, HexGeometry,
    HoneycombStrategy, LayerSlice, Phase, Point, Polygon, Polylines, RowPhase, SplitMode,
};

const EPS: f64 = 1e-9;

fn make_square_mm(x: f64, y: f64, size: f64) -> ExPolygon {
    Polygon::rectangle(Point::new_scale(x, y), Point::new_scale(x + size, y + size)).into()
}

fn make_square_with_hole_mm(
    x: f64,
    y: f64,
    outer_size: f64,
    hole_offset: f64,
    hole_size: f64,
) -> ExPolygon {
    let outer = Polygon::rectangle(
        Point::new_scale(x, y),
        Point::new_scale(x + outer_size, y + outer_size),
    );
    let inner = Polygon::rectangle(
        Point::new_scale(x + hole_offset, y + hole_offset),
        Point::new_scale(x + hole_offset + hole_size, y + hole_offset + hole_size),
    );
    ExPolygon::with_holes(outer, vec![inner])
}

/// Distance between two line positions on the repeating hexagon grid.
fn cyclic_distance(a: f64, b: f64, period: f64) -> f64 {
    let d = (a - b).rem_euclid(period);
    d.min(period - d)
}

fn family_positions(spacing: f64, density: f64, z: f64) -> Vec<f64> {
    let geometry = HexGeometry::new(spacing, density);
    let row = RowPhase::at(z, &geometry);
    HoneycombStrategy::select(&geometry, &row, spacing).family_offsets(SplitMode::Both, 0)
}

#[test]
fn test_scenario_first_layer_collapses_to_flipped_row() {
    let geometry = HexGeometry::new(0.4, 0.2);
    assert!((geometry.hex_width - 3.0).abs() < EPS);
    assert!((geometry.hex_side - 1.7320508).abs() < 1e-7);

    let row = RowPhase::at(0.0, &geometry);
    assert_eq!(row.hex_index, 0);
    assert_eq!(row.phase(geometry.hex_width), Phase::Angled { padding: 1.5 });
    assert_eq!(
        HoneycombStrategy::select(&geometry, &row, 0.4),
        HoneycombStrategy::CollapseHigh { offset: 1.5 }
    );
}

#[test]
fn test_scenario_vertical_faces() {
    let geometry = HexGeometry::new(0.4, 0.2);
    let row = RowPhase::at(0.75 * geometry.hex_side, &geometry);
    assert_eq!(row.phase(geometry.hex_width), Phase::Vertical);
    assert_eq!(
        HoneycombStrategy::select(&geometry, &row, 0.4),
        HoneycombStrategy::Vertical { offset: 0.0 }
    );
}

#[test]
fn test_scenario_split_faces() {
    let geometry = HexGeometry::new(0.4, 0.2);
    let row = RowPhase::at(0.3 * geometry.hex_side, &geometry);
    let strategy = HoneycombStrategy::select(&geometry, &row, 0.4);
    let offsets = strategy.family_offsets(SplitMode::Both, 0);

    assert!(matches!(strategy, HoneycombStrategy::Split { .. }));
    assert_eq!(offsets.len(), 2);
    assert!((offsets[0] + 0.6).abs() < 1e-6);
    assert!((offsets[1] - 0.6).abs() < 1e-6);
}

#[test]
fn test_line_positions_move_continuously_with_z() {
    for &(spacing, density) in &[(0.4, 0.2), (0.45, 0.15), (0.5, 0.35)] {
        let period = HexGeometry::new(spacing, density).hex_width;
        let mut previous = family_positions(spacing, density, 0.0);

        for i in 1..=3000 {
            let z = i as f64 * 0.01;
            let current = family_positions(spacing, density, z);

            // Every line has a neighbour on the previous layer no further
            // than one extrusion spacing away, in both directions.
            for &x in &current {
                let nearest = previous
                    .iter()
                    .map(|&p| cyclic_distance(x, p, period))
                    .fold(f64::INFINITY, f64::min);
                assert!(nearest <= spacing, "jump of {} mm at z={}", nearest, z);
            }
            for &p in &previous {
                let nearest = current
                    .iter()
                    .map(|&x| cyclic_distance(x, p, period))
                    .fold(f64::INFINITY, f64::min);
                assert!(nearest <= spacing, "line vanished by {} mm at z={}", nearest, z);
            }
            previous = current;
        }
    }
}

#[test]
fn test_every_row_visits_all_layouts() {
    let geometry = HexGeometry::new(0.4, 0.2);
    let row_height = 1.5 * geometry.hex_side;
    let mut seen = [false; 4];

    for i in 0..300 {
        let z = row_height * 2.0 + i as f64 * row_height / 300.0;
        let row = RowPhase::at(z, &geometry);
        let index = match HoneycombStrategy::select(&geometry, &row, 0.4) {
            HoneycombStrategy::CollapseHigh { .. } => 0,
            HoneycombStrategy::Split { .. } => 1,
            HoneycombStrategy::CollapseLow { .. } => 2,
            HoneycombStrategy::Vertical { .. } => 3,
        };
        seen[index] = true;
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn test_fill_is_pure() {
    let config = FillConfig::new(0.4, 0.2).angle(20.0);
    let surface = vec![make_square_with_hole_mm(0.0, 0.0, 30.0, 10.0, 8.0)];
    let before = surface.clone();

    let first = fill_surface(&config, 2.1, 10, &surface).unwrap();
    let second = fill_surface(&config, 2.1, 10, &surface).unwrap();

    assert_eq!(first, second);
    assert_eq!(surface, before);
}

#[test]
fn test_lines_stay_inside_region_and_out_of_hole() {
    let config = FillConfig::new(0.4, 0.2);
    let region = make_square_with_hole_mm(0.0, 0.0, 30.0, 10.0, 8.0);
    let hole = BoundingBox::from_min_max(Point::new_scale(10.0, 10.0), Point::new_scale(18.0, 18.0))
        .inflated(-2);
    let mut crossed_hole_rows = 0;

    for i in 0..40 {
        let z = 0.2 + i as f64 * 0.2;
        let polylines = fill_surface(&config, z, i, &[region.clone()]).unwrap();
        assert!(!polylines.is_empty(), "no infill at z={}", z);

        for polyline in &polylines {
            assert!(polyline.len() >= 2);
            for edge in polyline.edges() {
                let mid = edge.midpoint();
                assert!(region.contains_point(&mid), "{:?} outside region at z={}", mid, z);
                assert!(!hole.contains(&mid), "{:?} inside hole at z={}", mid, z);
            }
        }

        // Rows crossing the hole come out as two pieces on the same line
        let mut ys: Vec<_> = polylines.iter().map(|p| p.first_point().y).collect();
        ys.sort_unstable();
        if ys.windows(2).any(|w| (w[1] - w[0]).abs() <= 1) {
            crossed_hole_rows += 1;
        }
    }
    assert!(crossed_hole_rows > 0);
}

#[test]
fn test_rotated_fill_lines_are_parallel() {
    let config = FillConfig::new(0.4, 0.2).angle(30.0);
    let square = make_square_mm(0.0, 0.0, 40.0);
    let polylines = fill_surface(&config, 5.0, 3, &[square]).unwrap();
    assert!(!polylines.is_empty());

    let expected = -30.0_f64.to_radians();
    for polyline in polylines.iter().filter(|p| p.length_mm() > 2.0) {
        let a = polyline.first_point();
        let b = polyline.last_point();
        let mut direction = ((b.y - a.y) as f64).atan2((b.x - a.x) as f64);
        // Fold onto (-90°, 90°]
        if direction <= -std::f64::consts::FRAC_PI_2 {
            direction += std::f64::consts::PI;
        } else if direction > std::f64::consts::FRAC_PI_2 {
            direction -= std::f64::consts::PI;
        }
        assert!((direction - expected).abs() < 1e-3, "direction {}", direction);
    }
}

#[test]
fn test_honeycomb_direction_is_fixed_across_layers() {
    let config = FillConfig::new(0.4, 0.2);
    let square = make_square_mm(0.0, 0.0, 20.0);

    for layer_id in 0..6 {
        let z = 1.3 + layer_id as f64 * 2.0 * 1.5 * HexGeometry::new(0.4, 0.2).hex_side;
        let polylines = fill_surface(&config, z, layer_id, &[square.clone()]).unwrap();
        assert!(!polylines.is_empty());
        for polyline in &polylines {
            assert!((polyline.first_point().y - polyline.last_point().y).abs() <= 1);
        }
    }
}

#[test]
fn test_layer_parity_keeps_one_family_per_layer() {
    let both = FillConfig::new(0.4, 0.2);
    let parity = both.clone().pattern(FillPattern::HorizontalHoneycomb {
        split_mode: SplitMode::LayerParity,
    });
    let square = make_square_mm(0.0, 0.0, 30.0);
    let geometry = HexGeometry::new(0.4, 0.2);
    // Split band of the first row, fraction 0.3
    let z = 0.3 * geometry.hex_side;

    for layer_id in 0..2 {
        let all = fill_surface(&both, z, layer_id, &[square.clone()]).unwrap();
        let one = fill_surface(&parity, z, layer_id, &[square.clone()]).unwrap();
        assert!(!one.is_empty());
        assert!(one.len() < all.len());
        for polyline in &one {
            assert!(all.contains(polyline));
        }
    }

    let even = fill_surface(&parity, z, 0, &[square.clone()]).unwrap();
    let odd = fill_surface(&parity, z, 1, &[square]).unwrap();
    assert!(even.iter().all(|p| !odd.contains(p)));
}

#[test]
fn test_fill_layers_matches_sequential() {
    let config = FillConfig::new(0.45, 0.25);
    let surface = vec![
        make_square_mm(0.0, 0.0, 15.0),
        make_square_with_hole_mm(20.0, 0.0, 20.0, 5.0, 6.0),
    ];
    let layers: Vec<LayerSlice> = (0..60)
        .map(|i| LayerSlice::new((i + 1) as f64 * 0.15, i, surface.clone()))
        .collect();

    let parallel: Vec<Polylines> = fill_layers(&config, &layers).unwrap();
    assert_eq!(parallel.len(), layers.len());
    for (layer, result) in layers.iter().zip(&parallel) {
        let sequential = fill_surface(&config, layer.z, layer.layer_id, &layer.surface).unwrap();
        assert_eq!(&sequential, result, "layer {} differs", layer.layer_id);
    }
}

#[test]
fn test_fill_layers_empty_input() {
    let config = FillConfig::default();
    assert!(fill_layers(&config, &[]).unwrap().is_empty());
}

/// World y positions of lines running along X, reduced modulo `hex_width`.
fn grid_residues(polylines: &Polylines, hex_width: i64) -> Vec<i64> {
    polylines
        .iter()
        .map(|p| p.first_point().y.rem_euclid(hex_width))
        .collect()
}

fn is_near(residue: i64, target: i64, period: i64) -> bool {
    let d = (residue - target).rem_euclid(period);
    d <= 1 || d >= period - 1
}

#[test]
fn test_regions_and_layers_share_world_grid() {
    let config = FillConfig::new(0.4, 0.2);
    let geometry = HexGeometry::new(0.4, 0.2);
    let hex_width = scale(geometry.hex_width);

    // Two islands on one layer, then a different outline two rows up
    let islands = vec![
        make_square_mm(1.1, 0.0, 11.0),
        make_square_mm(17.3, 2.7, 13.0),
    ];
    let taller: ExPolygon = Polygon::rectangle(
        Point::new_scale(-4.3, -1.9),
        Point::new_scale(15.7, 19.1),
    )
    .into();

    let row0 = fill_surface(&config, 0.75 * geometry.hex_side, 0, &islands).unwrap();
    let row2 = fill_surface(&config, 3.75 * geometry.hex_side, 14, &[taller.clone()]).unwrap();
    assert!(row0.len() > 4 && !row2.is_empty());
    let residues = grid_residues(&row0, hex_width)
        .into_iter()
        .chain(grid_residues(&row2, hex_width));
    for residue in residues {
        assert!(is_near(residue, 0, hex_width), "residue {}", residue);
    }

    // Odd rows sit half a cell over, on the same world grid
    let row1 = fill_surface(&config, 2.25 * geometry.hex_side, 7, &[taller]).unwrap();
    assert!(!row1.is_empty());
    for residue in grid_residues(&row1, hex_width) {
        assert!(is_near(residue, hex_width / 2, hex_width), "residue {}", residue);
    }
}

#[test]
fn test_pivot_moves_grid_for_every_region() {
    // Rotating about (7, 3) shifts world lines to y = 10 - offset - k * hex_width
    let config = FillConfig::new(0.4, 0.2).pivot(7.0, 3.0);
    let geometry = HexGeometry::new(0.4, 0.2);
    let hex_width = scale(geometry.hex_width);
    let surface = vec![
        make_square_mm(0.0, 0.0, 14.0),
        make_square_with_hole_mm(20.0, 5.0, 18.0, 6.0, 5.0),
    ];

    let polylines = fill_surface(&config, 0.75 * geometry.hex_side, 0, &surface).unwrap();
    assert!(!polylines.is_empty());
    for residue in grid_residues(&polylines, hex_width) {
        assert!(is_near(residue, scale(1.0), hex_width), "residue {}", residue);
    }
}
