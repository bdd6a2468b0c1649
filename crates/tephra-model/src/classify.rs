//! Area classification for the simplified (non-isopach) model.

use crate::surface::CleanupAreaBound;
use crate::zones::ThicknessZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Total surface areas of a location (m²).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceTotals {
    /// Road area: segment length times road width.
    pub road_area: f64,
    /// Building footprint area.
    pub building_area: f64,
}

impl SurfaceTotals {
    /// Generic impervious surface, approximated as equal to the road area.
    pub fn impervious_area(&self) -> f64 {
        self.road_area
    }

    /// Roads, impervious surface and buildings together.
    pub fn all_area(&self) -> f64 {
        self.road_area + self.building_area + self.impervious_area()
    }

    /// Classify these totals at the given maximum thickness.
    pub fn classify(&self, max_thickness_mm: f64) -> CleanupAreaBound {
        classify(max_thickness_mm, self.road_area, self.building_area)
    }
}

/// Decide which surfaces need clean-up at `max_thickness_mm` and bound their area by ±10%.
///
/// Tiers, first match wins:
/// - `≥ 1000 mm`: roads + buildings + impervious, perturbed as one sum
/// - `≥ 10 mm`: roads, impervious and buildings, each perturbed on its own
/// - `≥ 0.5 mm`: roads only
/// - otherwise nothing
///
/// Impervious area equals road area, so roads count twice in the two upper tiers.
pub fn classify(max_thickness_mm: f64, road_area: f64, building_area: f64) -> CleanupAreaBound {
    let totals = SurfaceTotals {
        road_area,
        building_area,
    };

    let tier = ThicknessZone::for_thickness(max_thickness_mm);
    let bound = match tier {
        Some(ThicknessZone::Heavy) => CleanupAreaBound::perturbed(totals.all_area()),
        Some(ThicknessZone::Medium) => {
            CleanupAreaBound::perturbed(totals.road_area)
                + CleanupAreaBound::perturbed(totals.impervious_area())
                + CleanupAreaBound::perturbed(totals.building_area)
        }
        Some(ThicknessZone::Light) => CleanupAreaBound::perturbed(totals.road_area),
        None => CleanupAreaBound::ZERO,
    };

    debug!(
        "Clean-up tier at {} mm: {}, area [{:.1}, {:.1}] m²",
        max_thickness_mm,
        tier.map_or_else(|| "none".to_string(), |z| z.to_string()),
        bound.min,
        bound.max
    );

    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_below_light_threshold_is_zero() {
        for thickness in [0.0, 0.1, 0.49, 0.4999] {
            assert_eq!(classify(thickness, 1000.0, 2000.0), CleanupAreaBound::ZERO);
        }
    }

    #[test]
    fn test_light_tier_roads_only() {
        let b = classify(0.5, 1000.0, 2000.0);
        assert_relative_eq!(b.min, 900.0);
        assert_relative_eq!(b.max, 1100.0);

        let b = classify(9.99, 1000.0, 2000.0);
        assert_relative_eq!(b.max, 1100.0);
    }

    #[test]
    fn test_medium_tier_sums_terms() {
        let b = classify(50.0, 1000.0, 2000.0);
        assert_relative_eq!(b.min, 3600.0, epsilon = 1e-9);
        assert_relative_eq!(b.max, 4400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heavy_tier_double_counts_roads() {
        let b = classify(1000.0, 1000.0, 2000.0);
        // (1000 roads + 1000 impervious + 2000 buildings) * [0.9, 1.1]
        assert_relative_eq!(b.min, 3600.0, epsilon = 1e-9);
        assert_relative_eq!(b.max, 4400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tier_boundaries() {
        let (roads, buildings) = (1000.0, 2000.0);
        assert_eq!(classify(0.4999, roads, buildings).max, 0.0);
        assert!(classify(0.5, roads, buildings).max > 0.0);

        // Buildings join at 10 mm.
        assert!(classify(10.0, roads, buildings).max > classify(9.9999, roads, buildings).max);

        // The two upper tiers give the same total for the same areas.
        assert_relative_eq!(
            classify(999.99, roads, buildings).max,
            classify(1000.0, roads, buildings).max,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_monotonic_in_thickness() {
        let thicknesses = [0.0, 0.25, 0.5, 1.0, 5.0, 9.99, 10.0, 100.0, 999.0, 1000.0, 5000.0];
        for pair in thicknesses.windows(2) {
            let lower = classify(pair[0], 1234.0, 5678.0);
            let upper = classify(pair[1], 1234.0, 5678.0);
            assert!(
                upper.max >= lower.max - 1e-9,
                "bound decreased between {} mm and {} mm",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_surface_totals() {
        let totals = SurfaceTotals {
            road_area: 300.0,
            building_area: 700.0,
        };
        assert_eq!(totals.impervious_area(), 300.0);
        assert_eq!(totals.all_area(), 1300.0);
        assert_eq!(totals.classify(20.0), classify(20.0, 300.0, 700.0));
    }
}
