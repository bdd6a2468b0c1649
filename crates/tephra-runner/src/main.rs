//! `tephra` command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tephra_geometry::{
    multi_polygon_from_json, GeometryCatalog, IsopachLayer, LocationDescriptor, MultiPolygon,
};
use tephra_model::ZoneMode;
use tephra_runner::export::render_table;
use tephra_runner::{init_tracing, run, EstimateRequest, EstimatorConfig, Result};
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "tephra",
    version,
    about = "Estimate the volume of volcanic tephra requiring municipal clean-up"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level (overridden by TEPHRA_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate for a named place, e.g. "Napier, New Zealand"
    Place {
        place: String,
        #[command(flatten)]
        thickness: ThicknessArgs,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Estimate for the area around a point
    Point {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius (m)
        #[arg(long)]
        radius: f64,
        /// Label for the result
        #[arg(long)]
        name: String,
        #[command(flatten)]
        thickness: ThicknessArgs,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Estimate for polygons given as GeoJSON-style coordinates in the catalog frame
    Polygon {
        #[arg(long)]
        polygon: PathBuf,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        thickness: ThicknessArgs,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Estimate from isopach contours carrying min_thick/max_thick
    Isopach {
        #[arg(long)]
        contours: PathBuf,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct ThicknessArgs {
    /// Minimum tephra thickness (mm)
    #[arg(long)]
    min_thickness: f64,
    /// Maximum tephra thickness (mm)
    #[arg(long)]
    max_thickness: f64,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Geometry catalog JSON
    #[arg(long)]
    catalog: PathBuf,
    /// Export the sample CDF and histogram
    #[arg(long)]
    figure: bool,
    /// Export the result table
    #[arg(long)]
    csv: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    draws: Option<usize>,
    /// Fetch attempts before giving up on timeouts
    #[arg(long)]
    retries: Option<u32>,
    #[arg(long)]
    backoff_ms: Option<u64>,
    /// Count each feature in one thickness zone only
    #[arg(long)]
    disjoint_zones: bool,
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl CommonArgs {
    fn estimator_config(&self) -> Result<EstimatorConfig> {
        let mut config = match &self.config {
            Some(path) => EstimatorConfig::from_file(path)?,
            None => EstimatorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(draws) = self.draws {
            config.draws = draws;
        }
        if let Some(retries) = self.retries {
            config.retry.max_attempts = retries;
        }
        if let Some(backoff_ms) = self.backoff_ms {
            config.retry.backoff_ms = backoff_ms;
        }
        if self.disjoint_zones {
            config.zone_mode = ZoneMode::Disjoint;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Read a `MultiPolygon` coordinate array: polygons of rings, holes after the exterior.
fn load_polygons(path: &Path) -> Result<MultiPolygon<f64>> {
    let content = std::fs::read_to_string(path)?;
    Ok(multi_polygon_from_json(&content)?)
}

fn execute(command: Command) -> Result<()> {
    let (request, common) = match command {
        Command::Place {
            place,
            thickness,
            common,
        } => (
            EstimateRequest::for_place(&place, thickness.min_thickness, thickness.max_thickness),
            common,
        ),
        Command::Point {
            lat,
            lon,
            radius,
            name,
            thickness,
            common,
        } => (
            EstimateRequest::new(
                name,
                LocationDescriptor::point(lat, lon, radius),
                thickness.min_thickness,
                thickness.max_thickness,
            ),
            common,
        ),
        Command::Polygon {
            polygon,
            name,
            thickness,
            common,
        } => (
            EstimateRequest::new(
                name,
                LocationDescriptor::Polygon {
                    polygons: load_polygons(&polygon)?,
                },
                thickness.min_thickness,
                thickness.max_thickness,
            ),
            common,
        ),
        Command::Isopach {
            contours,
            name,
            common,
        } => (
            EstimateRequest::isopach(name, IsopachLayer::from_file(&contours)?),
            common,
        ),
    };

    let config = common.estimator_config()?;
    let catalog = GeometryCatalog::from_file(&common.catalog)?;
    let request = request.with_figure(common.figure).with_csv(common.csv);

    let (estimate, written) = run(&catalog, &request, &config)?;
    print!("{}", render_table(&estimate));
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
