//! Thickness zones and the isopach-mode zone aggregator.
//!
//! Features overlaid on an isopach layer are grouped into three zones by
//! thickness and each zone contributes a ±10% volume bound:
//!
//! | zone   | threshold | surfaces                     |
//! |--------|-----------|------------------------------|
//! | Heavy  | ≥ 1000 mm | buildings + roads (×2)       |
//! | Medium | ≥ 10 mm   | buildings + roads (×2)       |
//! | Light  | ≥ 0.5 mm  | roads only                   |
//!
//! With [`ZoneMode::Cumulative`] (the default) each zone is an independent
//! "at least this thick" filter, so a feature under 1200 mm of tephra is
//! counted in all three zones. [`ZoneMode::Disjoint`] restricts each zone to
//! its own band instead.

use crate::surface::{CleanupVolumeBound, SurfaceFeature};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A thickness-based clean-up zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThicknessZone {
    /// At least 1000 mm.
    Heavy,
    /// At least 10 mm.
    Medium,
    /// At least 0.5 mm, roads only.
    Light,
}

impl ThicknessZone {
    /// All zones, heaviest first.
    pub const ALL: [ThicknessZone; 3] = [Self::Heavy, Self::Medium, Self::Light];

    /// Lower thickness threshold of the zone (mm).
    pub const fn threshold_mm(self) -> f64 {
        match self {
            Self::Heavy => 1000.0,
            Self::Medium => 10.0,
            Self::Light => 0.5,
        }
    }

    /// Exclusive upper end of the zone's band when zones are disjoint (mm).
    pub const fn band_upper_mm(self) -> f64 {
        match self {
            Self::Heavy => f64::INFINITY,
            Self::Medium => 1000.0,
            Self::Light => 10.0,
        }
    }

    /// Weight applied to road volume relative to buildings.
    pub const fn road_weight(self) -> f64 {
        match self {
            Self::Heavy | Self::Medium => 2.0,
            Self::Light => 1.0,
        }
    }

    /// Whether building footprints contribute to this zone.
    pub const fn includes_buildings(self) -> bool {
        !matches!(self, Self::Light)
    }

    /// The heaviest zone whose threshold `thickness_mm` reaches, if any.
    pub fn for_thickness(thickness_mm: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|zone| thickness_mm >= zone.threshold_mm())
    }

    /// Whether a thickness value falls in this zone under the given mode.
    pub fn admits(self, thickness_mm: f64, mode: ZoneMode) -> bool {
        match mode {
            ZoneMode::Cumulative => thickness_mm >= self.threshold_mm(),
            ZoneMode::Disjoint => {
                thickness_mm >= self.threshold_mm() && thickness_mm < self.band_upper_mm()
            }
        }
    }
}

impl std::fmt::Display for ThicknessZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThicknessZone::Heavy => write!(f, "heavy"),
            ThicknessZone::Medium => write!(f, "medium"),
            ThicknessZone::Light => write!(f, "light"),
        }
    }
}

/// How zone membership is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneMode {
    /// Independent "at least this thick" filters; a feature can count in several zones.
    #[default]
    Cumulative,
    /// Non-overlapping bands: [1000, ∞), [10, 1000), [0.5, 10).
    Disjoint,
}

/// Volume bound contributed by each zone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneVolumes {
    /// Heavy zone bound (m³).
    pub heavy: CleanupVolumeBound,
    /// Medium zone bound (m³).
    pub medium: CleanupVolumeBound,
    /// Light zone bound (m³).
    pub light: CleanupVolumeBound,
}

impl ZoneVolumes {
    /// Bound for a single zone.
    pub fn get(&self, zone: ThicknessZone) -> CleanupVolumeBound {
        match zone {
            ThicknessZone::Heavy => self.heavy,
            ThicknessZone::Medium => self.medium,
            ThicknessZone::Light => self.light,
        }
    }

    /// Sum of the three zone bounds.
    pub fn total(&self) -> CleanupVolumeBound {
        self.heavy + self.medium + self.light
    }
}

/// Aggregate building and road features into a clean-up volume bound using
/// cumulative zones.
pub fn aggregate(buildings: &[SurfaceFeature], roads: &[SurfaceFeature]) -> CleanupVolumeBound {
    aggregate_zones(buildings, roads, ZoneMode::Cumulative).total()
}

/// Aggregate features into per-zone volume bounds.
///
/// The lower end of each zone sums `volume_min` over features whose
/// `min_thick` is admitted; the upper end sums `volume_max` over features
/// whose `max_thick` is admitted. The two filters are applied independently.
/// Features without thickness attributes are ignored.
pub fn aggregate_zones(
    buildings: &[SurfaceFeature],
    roads: &[SurfaceFeature],
    mode: ZoneMode,
) -> ZoneVolumes {
    let mut volumes = ZoneVolumes::default();

    for zone in ThicknessZone::ALL {
        let (building_min, building_max) = if zone.includes_buildings() {
            zone_sums(buildings, zone, mode)
        } else {
            (0.0, 0.0)
        };
        let (road_min, road_max) = zone_sums(roads, zone, mode);

        let weight = zone.road_weight();
        let bound = CleanupVolumeBound::widened(
            building_min + road_min * weight,
            building_max + road_max * weight,
        );

        debug!(
            "Zone {}: buildings [{:.2}, {:.2}] m³, roads [{:.2}, {:.2}] m³ (x{}), bound [{:.2}, {:.2}] m³",
            zone, building_min, building_max, road_min, road_max, weight, bound.min, bound.max
        );

        match zone {
            ThicknessZone::Heavy => volumes.heavy = bound,
            ThicknessZone::Medium => volumes.medium = bound,
            ThicknessZone::Light => volumes.light = bound,
        }
    }

    volumes
}

/// Sum of (`volume_min`, `volume_max`) over the features admitted to a zone.
fn zone_sums(features: &[SurfaceFeature], zone: ThicknessZone, mode: ZoneMode) -> (f64, f64) {
    features
        .iter()
        .filter_map(|f| f.thickness.map(|t| (f, t)))
        .fold((0.0, 0.0), |(min_sum, max_sum), (f, t)| {
            let min_add = f
                .volume_min()
                .filter(|_| zone.admits(t.min_mm, mode))
                .unwrap_or(0.0);
            let max_add = f
                .volume_max()
                .filter(|_| zone.admits(t.max_mm, mode))
                .unwrap_or(0.0);
            (min_sum + min_add, max_sum + max_add)
        })
}
