//! Surface features and the area/volume bounds derived from them.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Relative perturbation applied to every area or volume term (±10%).
pub const PERTURBATION: f64 = 0.1;

/// Millimetres per metre, used to turn tephra thickness into a depth.
pub const MM_PER_M: f64 = 1000.0;

/// Tephra thickness range in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessRange {
    /// Minimum thickness (mm).
    pub min_mm: f64,
    /// Maximum thickness (mm).
    pub max_mm: f64,
}

impl ThicknessRange {
    /// Create a thickness range, rejecting `min_mm > max_mm` and non-finite values.
    pub fn new(min_mm: f64, max_mm: f64) -> Result<Self> {
        check_range("thickness", min_mm, max_mm)?;
        Ok(Self { min_mm, max_mm })
    }

    /// Minimum thickness in metres.
    pub fn min_m(&self) -> f64 {
        self.min_mm / MM_PER_M
    }

    /// Maximum thickness in metres.
    pub fn max_m(&self) -> f64 {
        self.max_mm / MM_PER_M
    }
}

/// A single building footprint or road segment.
///
/// `thickness` is only present once the feature has been overlaid on an
/// isopach layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceFeature {
    /// Planar area in square metres.
    pub area: f64,
    /// Thickness bounds at this feature's location.
    pub thickness: Option<ThicknessRange>,
}

impl SurfaceFeature {
    /// A feature with no thickness attributes.
    pub fn new(area: f64) -> Self {
        Self {
            area,
            thickness: None,
        }
    }

    /// A feature carrying isopach thickness attributes.
    pub fn with_thickness(area: f64, thickness: ThicknessRange) -> Self {
        Self {
            area,
            thickness: Some(thickness),
        }
    }

    /// Volume (m³) using the minimum thickness, or `None` without thickness data.
    pub fn volume_min(&self) -> Option<f64> {
        self.thickness.map(|t| self.area * t.min_m())
    }

    /// Volume (m³) using the maximum thickness, or `None` without thickness data.
    pub fn volume_max(&self) -> Option<f64> {
        self.thickness.map(|t| self.area * t.max_m())
    }
}

/// Clean-up area range (m²) feeding the simplified model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CleanupAreaBound {
    /// Lower bound (m²).
    pub min: f64,
    /// Upper bound (m²).
    pub max: f64,
}

impl CleanupAreaBound {
    /// No clean-up area.
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    /// Bound a single area term by ±10%.
    pub fn perturbed(area: f64) -> Self {
        let (min, max) = perturb(area, area);
        Self { min, max }
    }

    /// True when no area contributes to clean-up.
    pub fn is_zero(&self) -> bool {
        self.max <= 0.0
    }
}

impl Add for CleanupAreaBound {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

/// Clean-up volume range (m³).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CleanupVolumeBound {
    /// Lower bound (m³).
    pub min: f64,
    /// Upper bound (m³).
    pub max: f64,
}

impl CleanupVolumeBound {
    /// No clean-up volume.
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    /// Widen a `[min, max]` volume pair by ±10%: the lower end shrinks, the upper end grows.
    pub fn widened(min: f64, max: f64) -> Self {
        let (min, max) = perturb(min, max);
        Self { min, max }
    }

    /// True when no volume contributes to clean-up.
    pub fn is_zero(&self) -> bool {
        self.max <= 0.0
    }
}

impl Add for CleanupVolumeBound {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            min: self.min + rhs.min,
            max: self.max + rhs.max,
        }
    }
}

fn perturb(low: f64, high: f64) -> (f64, f64) {
    (low - low * PERTURBATION, high + high * PERTURBATION)
}

/// Reject ranges that cannot be sampled uniformly.
pub(crate) fn check_range(what: &'static str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(ModelError::InvalidRange { what, min, max });
    }
    Ok(())
}
