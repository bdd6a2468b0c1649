//! Monte Carlo sampling of clean-up volume.
//!
//! Two modes are supported:
//! - **Joint**: each draw takes an independent uniform thickness and an
//!   independent uniform area and multiplies them.
//! - **Direct**: each draw is a uniform volume from an aggregated bound.
//!
//! Draws are i.i.d. The random generator is supplied by the caller, so the
//! same seed and bounds always produce the same sample sequence.

use crate::surface::{
    check_range, CleanupAreaBound, CleanupVolumeBound, ThicknessRange, MM_PER_M,
};
use crate::{ModelError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

/// Default number of draws per estimation run.
pub const DEFAULT_DRAWS: usize = 10_000;

/// One Monte Carlo volume draw (m³).
pub type VolumeSample = f64;

/// The bounds a run samples from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SampleBounds {
    /// Thickness and area drawn independently and multiplied.
    Joint {
        /// Thickness range (mm).
        thickness: ThicknessRange,
        /// Clean-up area range (m²).
        area: CleanupAreaBound,
    },
    /// Volume drawn directly.
    Direct {
        /// Clean-up volume range (m³).
        volume: CleanupVolumeBound,
    },
}

impl SampleBounds {
    /// True when every draw is necessarily zero.
    pub fn is_zero(&self) -> bool {
        match self {
            SampleBounds::Joint { area, .. } => area.is_zero(),
            SampleBounds::Direct { volume } => volume.is_zero(),
        }
    }
}

/// A uniform range that tolerates zero width.
#[derive(Debug, Clone, Copy)]
enum UniformRange {
    Constant(f64),
    Spread(Uniform<f64>),
}

impl UniformRange {
    fn new(what: &'static str, min: f64, max: f64) -> Result<Self> {
        check_range(what, min, max)?;
        if min == max {
            Ok(UniformRange::Constant(min))
        } else {
            Ok(UniformRange::Spread(Uniform::new(min, max)))
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            UniformRange::Constant(value) => *value,
            UniformRange::Spread(dist) => dist.sample(rng),
        }
    }
}

/// Draws volume samples from [`SampleBounds`].
#[derive(Debug, Clone, Copy)]
pub struct VolumeSampler {
    draws: usize,
}

impl Default for VolumeSampler {
    fn default() -> Self {
        Self {
            draws: DEFAULT_DRAWS,
        }
    }
}

impl VolumeSampler {
    /// Create a sampler producing `draws` samples per run.
    pub fn new(draws: usize) -> Result<Self> {
        if draws == 0 {
            return Err(ModelError::InvalidSampleCount);
        }
        Ok(Self { draws })
    }

    /// Number of draws per run.
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Draw samples using the supplied generator.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        bounds: &SampleBounds,
        rng: &mut R,
    ) -> Result<Vec<VolumeSample>> {
        match bounds {
            SampleBounds::Joint { thickness, area } => {
                let thickness_mm =
                    UniformRange::new("thickness", thickness.min_mm, thickness.max_mm)?;
                let area_m2 = UniformRange::new("area", area.min, area.max)?;
                Ok((0..self.draws)
                    .map(|_| {
                        let depth = thickness_mm.draw(rng) / MM_PER_M;
                        depth * area_m2.draw(rng)
                    })
                    .collect())
            }
            SampleBounds::Direct { volume } => {
                let volume = UniformRange::new("volume", volume.min, volume.max)?;
                Ok((0..self.draws).map(|_| volume.draw(rng)).collect())
            }
        }
    }

    /// Draw samples from a ChaCha generator seeded with `seed`.
    pub fn sample_seeded(&self, bounds: &SampleBounds, seed: u64) -> Result<Vec<VolumeSample>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.sample(bounds, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joint(min_mm: f64, max_mm: f64, area_min: f64, area_max: f64) -> SampleBounds {
        SampleBounds::Joint {
            thickness: ThicknessRange::new(min_mm, max_mm).unwrap(),
            area: CleanupAreaBound {
                min: area_min,
                max: area_max,
            },
        }
    }

    #[test]
    fn test_draw_count() {
        let sampler = VolumeSampler::new(250).unwrap();
        let samples = sampler.sample_seeded(&joint(5.0, 50.0, 3600.0, 4400.0), 1).unwrap();
        assert_eq!(samples.len(), 250);
        assert_eq!(VolumeSampler::default().draws(), DEFAULT_DRAWS);
    }

    #[test]
    fn test_zero_draws_rejected() {
        assert!(matches!(VolumeSampler::new(0), Err(ModelError::InvalidSampleCount)));
    }

    #[test]
    fn test_joint_samples_within_product_range() {
        let bounds = joint(5.0, 50.0, 3600.0, 4400.0);
        let samples = VolumeSampler::default().sample_seeded(&bounds, 7).unwrap();
        // 3600 m² x 5 mm up to 4400 m² x 50 mm.
        assert!(samples.iter().all(|&v| (18.0..=220.0).contains(&v)));
    }

    #[test]
    fn test_zero_area_gives_all_zero_samples() {
        let bounds = joint(0.1, 0.4, 0.0, 0.0);
        assert!(bounds.is_zero());
        let samples = VolumeSampler::default().sample_seeded(&bounds, 3).unwrap();
        assert_eq!(samples.len(), DEFAULT_DRAWS);
        assert!(samples.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let bounds = SampleBounds::Direct {
            volume: CleanupVolumeBound { min: 42.0, max: 42.0 },
        };
        let samples = VolumeSampler::new(100).unwrap().sample_seeded(&bounds, 9).unwrap();
        assert!(samples.iter().all(|&v| v == 42.0));

        let samples = VolumeSampler::new(100)
            .unwrap()
            .sample_seeded(&joint(20.0, 20.0, 500.0, 500.0), 9)
            .unwrap();
        assert!(samples.iter().all(|&v| (v - 10.0).abs() < 1e-12));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let bounds = SampleBounds::Direct {
            volume: CleanupVolumeBound { min: 10.0, max: 1.0 },
        };
        let result = VolumeSampler::default().sample_seeded(&bounds, 1);
        assert!(matches!(
            result,
            Err(ModelError::InvalidRange { what: "volume", .. })
        ));

        let bounds = SampleBounds::Joint {
            thickness: ThicknessRange { min_mm: 9.0, max_mm: 1.0 },
            area: CleanupAreaBound { min: 1.0, max: 2.0 },
        };
        let result = VolumeSampler::default().sample_seeded(&bounds, 1);
        assert!(matches!(
            result,
            Err(ModelError::InvalidRange { what: "thickness", .. })
        ));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let bounds = joint(1.0, 100.0, 10.0, 20.0);
        let sampler = VolumeSampler::new(1000).unwrap();
        let a = sampler.sample_seeded(&bounds, 12345).unwrap();
        let b = sampler.sample_seeded(&bounds, 12345).unwrap();
        assert_eq!(a, b);

        let c = sampler.sample_seeded(&bounds, 54321).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_direct_mode_stays_in_bounds() {
        let bounds = SampleBounds::Direct {
            volume: CleanupVolumeBound { min: 486.0, max: 742.5 },
        };
        let samples = VolumeSampler::default().sample_seeded(&bounds, 2).unwrap();
        assert!(samples.iter().all(|&v| (486.0..742.5).contains(&v)));
    }
}
