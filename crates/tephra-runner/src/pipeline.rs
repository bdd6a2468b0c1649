//! The estimation pipeline.
//!
//! Every entry mode runs the same steps: fetch geometry (with bounded
//! retries), turn it into sampling bounds, draw Monte Carlo samples and
//! summarize them. Only the bounds step differs:
//!
//! - a thickness range goes through the area classifier and is sampled jointly
//! - an isopach layer is overlaid on the geometry, aggregated by zone and
//!   sampled directly

use crate::config::EstimatorConfig;
use crate::export;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tephra_geometry::{fetch_with_retry, GeometryProvider, IsopachLayer, LocationDescriptor};
use tephra_model::{
    aggregate_zones, summarize, CleanupResult, SampleBounds, SampleStatistics, SurfaceTotals,
    ThicknessRange, ThicknessZone, VolumeSample, VolumeSampler, ZoneVolumes,
};
use tracing::{debug, info};

/// Where the thickness information comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ThicknessInput {
    /// One thickness range (mm) applied to the whole location.
    Range { min_mm: f64, max_mm: f64 },
    /// Per-feature thickness from isopach contours.
    Isopach(IsopachLayer),
}

/// One estimation request.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRequest {
    /// Label used for the result and output file names.
    pub name: String,
    pub location: LocationDescriptor,
    pub thickness: ThicknessInput,
    /// Export the sample distribution (CDF and histogram).
    pub figure: bool,
    /// Export the result table.
    pub csv: bool,
}

impl EstimateRequest {
    /// Request for a location with a uniform thickness range.
    pub fn new(name: impl Into<String>, location: LocationDescriptor, min_mm: f64, max_mm: f64) -> Self {
        Self {
            name: name.into(),
            location,
            thickness: ThicknessInput::Range { min_mm, max_mm },
            figure: false,
            csv: false,
        }
    }

    /// Request for a place name, labelled with that name.
    pub fn for_place(place: &str, min_mm: f64, max_mm: f64) -> Self {
        Self::new(place, LocationDescriptor::place(place), min_mm, max_mm)
    }

    /// Request covering the footprint of an isopach layer.
    pub fn isopach(name: impl Into<String>, layer: IsopachLayer) -> Self {
        Self {
            name: name.into(),
            location: layer.footprint(),
            thickness: ThicknessInput::Isopach(layer),
            figure: false,
            csv: false,
        }
    }

    pub fn with_figure(mut self, figure: bool) -> Self {
        self.figure = figure;
        self
    }

    pub fn with_csv(mut self, csv: bool) -> Self {
        self.csv = csv;
        self
    }
}

/// Everything an estimation run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub result: CleanupResult,
    pub bounds: SampleBounds,
    /// Surface totals (simplified model only).
    pub surfaces: Option<SurfaceTotals>,
    /// Per-zone bounds (isopach model only).
    pub zones: Option<ZoneVolumes>,
    pub statistics: SampleStatistics,
    /// Seed the samples were drawn with; rerunning with it reproduces them.
    pub seed: u64,
    #[serde(skip)]
    pub samples: Vec<VolumeSample>,
}

impl Estimate {
    /// True when nothing needs clearing, in which case no distribution is exported.
    pub fn is_zero(&self) -> bool {
        self.bounds.is_zero()
    }
}

/// Fetch geometry and estimate the clean-up volume without writing anything.
pub fn estimate<P: GeometryProvider + ?Sized>(
    provider: &P,
    request: &EstimateRequest,
    config: &EstimatorConfig,
) -> Result<Estimate> {
    config.validate()?;
    let sampler = VolumeSampler::new(config.draws)?;

    info!("Initiating tephra clean-up estimate for {}", request.name);
    let geometry = fetch_with_retry(provider, &request.location, &config.retry_policy())?;
    info!(
        "Fetched {} buildings and {} roads for {}",
        geometry.buildings.len(),
        geometry.roads.len(),
        request.location
    );

    let (bounds, surfaces, zones) = match &request.thickness {
        ThicknessInput::Range { min_mm, max_mm } => {
            let thickness = ThicknessRange::new(*min_mm, *max_mm)?;
            let totals = geometry.totals(config.road_width_m);
            let area = totals.classify(thickness.max_mm);
            info!(
                "Road area {:.1} m², building area {:.1} m²; clean-up area [{:.1}, {:.1}] m²",
                totals.road_area, totals.building_area, area.min, area.max
            );
            (SampleBounds::Joint { thickness, area }, Some(totals), None)
        }
        ThicknessInput::Isopach(layer) => {
            let overlaid = layer.overlay(&geometry, config.road_width_m)?;
            let zones = aggregate_zones(&overlaid.buildings, &overlaid.roads, config.zone_mode);
            for zone in ThicknessZone::ALL {
                let bound = zones.get(zone);
                debug!("{} zone volume [{:.1}, {:.1}] m³", zone, bound.min, bound.max);
            }
            let volume = zones.total();
            info!(
                "Clean-up volume bound [{:.1}, {:.1}] m³ ({:?} zones)",
                volume.min, volume.max, config.zone_mode
            );
            (SampleBounds::Direct { volume }, None, Some(zones))
        }
    };

    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!("No seed configured, using {}", seed);
            seed
        }
    };

    let samples = sampler.sample_seeded(&bounds, seed)?;
    let result = summarize(&samples, &request.name)?;
    let statistics = SampleStatistics::from_samples(&samples)?;
    debug!(
        "Samples: count {}, mean {:.2}, std {:.2}, min {:.2}, 25% {:.2}, 50% {:.2}, 75% {:.2}, max {:.2}",
        statistics.count,
        statistics.mean,
        statistics.std_dev,
        statistics.min,
        statistics.p25,
        statistics.p50,
        statistics.p75,
        statistics.max
    );
    info!(
        "{}: p10 {:.1} m³, p50 {:.1} m³, p90 {:.1} m³",
        result.place_name, result.p10, result.p50, result.p90
    );

    Ok(Estimate {
        result,
        bounds,
        surfaces,
        zones,
        statistics,
        seed,
        samples,
    })
}

/// Estimate, then write whatever outputs the request asks for.
///
/// Returns the estimate and the paths of every file written.
pub fn run<P: GeometryProvider + ?Sized>(
    provider: &P,
    request: &EstimateRequest,
    config: &EstimatorConfig,
) -> Result<(Estimate, Vec<PathBuf>)> {
    let estimate = estimate(provider, request, config)?;
    let mut written = Vec::new();

    if request.csv {
        written.extend(export::write_tables(&estimate, &config.output_dir)?);
    } else {
        info!("Table export not requested");
    }

    if request.figure {
        if estimate.is_zero() {
            info!("No tephra expected to require removal; no distribution will be exported");
        } else {
            written.extend(export::write_distribution(&estimate, &config.output_dir)?);
        }
    } else {
        info!("Distribution export not requested");
    }

    Ok((estimate, written))
}
