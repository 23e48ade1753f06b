//! Honeycomb CLI - Command-line front end for the horizontal honeycomb generator
//!
//! Usage:
//!   honeycomb-cli inspect --spacing 0.4 --density 0.2 --z 1.3
//!   honeycomb-cli fill --config fill.json --region region.json --z 1.3 -o lines.json
//!   honeycomb-cli sweep --config fill.json --region region.json --layer-height 0.2 --layers 100

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use horizontal_honeycomb::{
    fill_layers, fill_surface, unscale, ExPolygon, ExPolygons, FillConfig, HexGeometry,
    HoneycombStrategy, LayerSlice, Phase, Point, Polygon, Polylines, RowPhase, SplitMode,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Horizontal honeycomb infill generator
#[derive(Parser, Debug)]
#[command(name = "honeycomb-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the hexagon geometry and line layout chosen at a height
    Inspect {
        /// Extrusion spacing in mm
        #[arg(long, default_value = "0.45")]
        spacing: f64,

        /// Fill density (0-1]
        #[arg(long, default_value = "0.2")]
        density: f64,

        /// Slice height in mm
        #[arg(long)]
        z: f64,

        /// Layer index
        #[arg(long, default_value = "0")]
        layer: usize,

        /// How the split layout emits its two line families
        #[arg(long, value_enum, default_value = "both")]
        split_mode: SplitModeArg,
    },

    /// Fill a region at one height and write the polylines as JSON
    Fill {
        /// Fill configuration file (JSON format)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Region file (JSON format, mm)
        #[arg(short, long, value_name = "REGION")]
        region: PathBuf,

        /// Slice height in mm
        #[arg(long)]
        z: f64,

        /// Layer index
        #[arg(long, default_value = "0")]
        layer: usize,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Fill a region on a stack of layers
    Sweep {
        /// Fill configuration file (JSON format)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Region file (JSON format, mm)
        #[arg(short, long, value_name = "REGION")]
        region: PathBuf,

        /// Layer height in mm
        #[arg(long, default_value = "0.2")]
        layer_height: f64,

        /// Number of layers
        #[arg(long, default_value = "50")]
        layers: usize,

        /// Output file for all layers' polylines (JSON format)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Number of threads to use (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        threads: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SplitModeArg {
    Both,
    LayerParity,
}

impl From<SplitModeArg> for SplitMode {
    fn from(arg: SplitModeArg) -> Self {
        match arg {
            SplitModeArg::Both => SplitMode::Both,
            SplitModeArg::LayerParity => SplitMode::LayerParity,
        }
    }
}

/// A region as written in region files: a contour and optional holes, in mm.
#[derive(Debug, Deserialize)]
struct RegionFile {
    contour: Vec<[f64; 2]>,
    #[serde(default)]
    holes: Vec<Vec<[f64; 2]>>,
}

/// Region files hold either one region or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegionInput {
    Single(RegionFile),
    Many(Vec<RegionFile>),
}

impl RegionFile {
    fn to_expolygon(&self) -> ExPolygon {
        let ring = |points: &[[f64; 2]]| {
            Polygon::from_points(points.iter().map(|p| Point::new_scale(p[0], p[1])).collect())
        };
        ExPolygon::with_holes(
            ring(&self.contour),
            self.holes.iter().map(|h| ring(h)).collect(),
        )
    }
}

/// One layer's output, in mm.
#[derive(Debug, Serialize)]
struct LayerOutput {
    z: f64,
    layer_id: usize,
    polylines: Vec<Vec<[f64; 2]>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Inspect {
            spacing,
            density,
            z,
            layer,
            split_mode,
        } => cmd_inspect(spacing, density, z, layer, split_mode.into()),
        Commands::Fill {
            config,
            region,
            z,
            layer,
            output,
        } => cmd_fill(config, region, z, layer, output),
        Commands::Sweep {
            config,
            region,
            layer_height,
            layers,
            output,
            threads,
        } => cmd_sweep(config, region, layer_height, layers, output, threads),
    }
}

fn cmd_inspect(
    spacing: f64,
    density: f64,
    z: f64,
    layer: usize,
    split_mode: SplitMode,
) -> Result<()> {
    FillConfig::new(spacing, density)
        .validate()
        .context("Invalid fill parameters")?;

    let geometry = HexGeometry::new(spacing, density);
    let row = RowPhase::at(z, &geometry);
    let strategy = HoneycombStrategy::select(&geometry, &row, spacing);

    println!("Hexagon:");
    println!("  Width: {:.4} mm", geometry.hex_width);
    println!("  Side: {:.4} mm", geometry.hex_side);
    println!("  Row height: {:.4} mm", 1.5 * geometry.hex_side);
    println!("Row at z = {:.4} mm:", z);
    println!("  Index: {}", row.hex_index);
    println!("  Fraction: {:.4}", row.hex_fraction);
    match row.phase(geometry.hex_width) {
        Phase::Vertical => println!("  Phase: vertical faces"),
        Phase::Angled { padding } => println!("  Phase: sloped faces (padding {:.4} mm)", padding),
    }
    println!("Layout: {}", strategy.name());
    for offset in strategy.family_offsets(split_mode, layer) {
        println!(
            "  Lines at x = {:.4} + k * {:.4} mm",
            offset, geometry.hex_width
        );
    }

    Ok(())
}

fn cmd_fill(
    config_path: Option<PathBuf>,
    region_path: PathBuf,
    z: f64,
    layer: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let surface = load_region(&region_path)?;

    let polylines = fill_surface(&config, z, layer, &surface).context("Failed to fill region")?;
    info!("Generated {} polylines", polylines.len());
    if polylines.is_empty() {
        warn!("Region produced no infill at z = {:.3} mm", z);
    }

    write_json(output.as_deref(), &polylines_to_mm(&polylines))
}

fn cmd_sweep(
    config_path: Option<PathBuf>,
    region_path: PathBuf,
    layer_height: f64,
    layer_count: usize,
    output: Option<PathBuf>,
    threads: usize,
) -> Result<()> {
    if !layer_height.is_finite() || layer_height <= 0.0 {
        bail!("Layer height must be positive, got {}", layer_height);
    }

    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    let config = load_config(config_path.as_deref())?;
    let surface = load_region(&region_path)?;
    info!("Using {}", config);

    let layers: Vec<LayerSlice> = (0..layer_count)
        .map(|i| LayerSlice::new((i + 1) as f64 * layer_height, i, surface.clone()))
        .collect();

    let progress = ProgressBar::new(layer_count as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template(concat!(
                "{spinner:.green} [{elapsed_precise}] ",
                "[{bar:40.cyan/blue}] {pos}/{len} layers {msg}",
            ))
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    // Fill in chunks so the bar moves while rayon works through each chunk
    let chunk_size = rayon::current_num_threads().max(1) * 4;
    let mut results: Vec<Polylines> = Vec::with_capacity(layer_count);
    for chunk in layers.chunks(chunk_size) {
        let filled = fill_layers(&config, chunk).context("Failed to fill layers")?;
        progress.inc(chunk.len() as u64);
        results.extend(filled);
    }
    progress.finish_with_message("done");

    println!("Layers: {}", layer_count);
    let mut total_polylines = 0;
    let mut total_length = 0.0;
    for (layer, polylines) in layers.iter().zip(&results) {
        let length: f64 = polylines.iter().map(|p| p.length_mm()).sum();
        total_polylines += polylines.len();
        total_length += length;
        info!(
            "  Layer {:>4} z={:.3}: {} polylines, {:.1} mm",
            layer.layer_id,
            layer.z,
            polylines.len(),
            length
        );
    }
    println!("Polylines: {}", total_polylines);
    println!("Total length: {:.1} mm", total_length);

    if let Some(path) = output {
        let layer_outputs: Vec<LayerOutput> = layers
            .iter()
            .zip(&results)
            .map(|(layer, polylines)| LayerOutput {
                z: layer.z,
                layer_id: layer.layer_id,
                polylines: polylines_to_mm(polylines),
            })
            .collect();
        write_json(Some(&path), &layer_outputs)?;
        println!("Output: {}", path.display());
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FillConfig> {
    match path {
        Some(path) => {
            info!("Loading fill config from: {}", path.display());
            FillConfig::from_json_file(path)
                .with_context(|| format!("Failed to load fill config {}", path.display()))
        }
        None => Ok(FillConfig::default()),
    }
}

fn load_region(path: &Path) -> Result<ExPolygons> {
    info!("Loading region from: {}", path.display());
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read region file {}", path.display()))?;
    let input: RegionInput = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse region file {}", path.display()))?;

    let regions = match input {
        RegionInput::Single(region) => vec![region],
        RegionInput::Many(regions) => regions,
    };
    let surface: ExPolygons = regions.iter().map(RegionFile::to_expolygon).collect();
    if surface.iter().any(ExPolygon::is_empty) {
        bail!("Region file {} has a contour with fewer than 3 points", path.display());
    }
    Ok(surface)
}

fn polylines_to_mm(polylines: &Polylines) -> Vec<Vec<[f64; 2]>> {
    polylines
        .iter()
        .map(|polyline| {
            polyline
                .points()
                .iter()
                .map(|p| [unscale(p.x), unscale(p.y)])
                .collect()
        })
        .collect()
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write output file {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
