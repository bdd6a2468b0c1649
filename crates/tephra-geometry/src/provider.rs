//! Geometry provider seam and the bounded retry wrapper.

use crate::{FetchError, LocationDescriptor, Result};
use geo::{Area, EuclideanLength, LineString, Polygon};
use std::time::Duration;
use tephra_model::{SurfaceFeature, SurfaceTotals};
use tracing::{debug, warn};

/// Assumed road width (m) used to turn road length into area.
pub const DEFAULT_ROAD_WIDTH_M: f64 = 3.0;

/// Default number of fetch attempts before giving up on timeouts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Buildings and drivable roads for a location, in a projected frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedGeometry {
    /// Building footprints.
    pub buildings: Vec<Polygon<f64>>,
    /// Road centrelines.
    pub roads: Vec<LineString<f64>>,
}

impl FetchedGeometry {
    /// Buildings paired with their footprint as a surface feature.
    pub fn building_features(&self) -> impl Iterator<Item = (&Polygon<f64>, SurfaceFeature)> + '_ {
        self.buildings
            .iter()
            .map(|b| (b, SurfaceFeature::new(b.unsigned_area())))
    }

    /// Roads paired with their surface feature, centreline length times road width.
    pub fn road_features(
        &self,
        road_width_m: f64,
    ) -> impl Iterator<Item = (&LineString<f64>, SurfaceFeature)> + '_ {
        self.roads
            .iter()
            .map(move |r| (r, SurfaceFeature::new(r.euclidean_length() * road_width_m)))
    }

    /// Total building footprint area (m²).
    pub fn building_area(&self) -> f64 {
        self.building_features().map(|(_, f)| f.area).sum()
    }

    /// Total road area (m²).
    pub fn road_area(&self, road_width_m: f64) -> f64 {
        self.road_features(road_width_m).map(|(_, f)| f.area).sum()
    }

    pub fn totals(&self, road_width_m: f64) -> SurfaceTotals {
        SurfaceTotals {
            road_area: self.road_area(road_width_m),
            building_area: self.building_area(),
        }
    }
}

/// A source of building and road geometry.
///
/// Implementations signal unknown locations with
/// [`FetchError::LocationNotFound`] and retryable network failures with
/// [`FetchError::TransientTimeout`].
pub trait GeometryProvider {
    /// Fetch buildings and roads for a location.
    fn fetch(&self, location: &LocationDescriptor) -> Result<FetchedGeometry>;
}

impl<P: GeometryProvider + ?Sized> GeometryProvider for &P {
    fn fetch(&self, location: &LocationDescriptor) -> Result<FetchedGeometry> {
        (**self).fetch(location)
    }
}

/// How often and how patiently to retry timed-out fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::ZERO,
        }
    }
}

/// Fetch with bounded retries.
///
/// Only [`FetchError::TransientTimeout`] is retried; any other error aborts
/// immediately. When every attempt times out the result is
/// [`FetchError::RetriesExhausted`].
pub fn fetch_with_retry<P: GeometryProvider + ?Sized>(
    provider: &P,
    location: &LocationDescriptor,
    policy: &RetryPolicy,
) -> Result<FetchedGeometry> {
    let attempts = policy.max_attempts.max(1);
    let mut last = String::new();

    for attempt in 1..=attempts {
        debug!("Fetching geometry for {} (attempt {}/{})", location, attempt, attempts);
        match provider.fetch(location) {
            Ok(geometry) => return Ok(geometry),
            Err(FetchError::TransientTimeout(msg)) => {
                warn!("Timeout fetching geometry for {} (attempt {}/{}): {}", location, attempt, attempts, msg);
                last = msg;
                if attempt < attempts && !policy.backoff.is_zero() {
                    std::thread::sleep(policy.backoff);
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(FetchError::RetriesExhausted { attempts, last })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{line_string, polygon};
    use std::cell::Cell;

    /// Times out a fixed number of times, then succeeds.
    struct FlakyProvider {
        timeouts: u32,
        calls: Cell<u32>,
    }

    impl GeometryProvider for FlakyProvider {
        fn fetch(&self, _location: &LocationDescriptor) -> Result<FetchedGeometry> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call <= self.timeouts {
                Err(FetchError::TransientTimeout(format!("call {}", call)))
            } else {
                Ok(FetchedGeometry::default())
            }
        }
    }

    struct MissingProvider {
        calls: Cell<u32>,
    }

    impl GeometryProvider for MissingProvider {
        fn fetch(&self, location: &LocationDescriptor) -> Result<FetchedGeometry> {
            self.calls.set(self.calls.get() + 1);
            Err(FetchError::LocationNotFound(location.to_string()))
        }
    }

    fn flaky(timeouts: u32) -> FlakyProvider {
        FlakyProvider {
            timeouts,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_retry_recovers_after_timeouts() {
        let provider = flaky(3);
        let result = fetch_with_retry(&provider, &LocationDescriptor::place("Napier"), &RetryPolicy::default());
        assert!(result.is_ok());
        assert_eq!(provider.calls.get(), 4);
    }

    #[test]
    fn test_retry_gives_up_after_budget() {
        let provider = flaky(u32::MAX);
        let result = fetch_with_retry(&provider, &LocationDescriptor::place("Napier"), &RetryPolicy::default());
        match result {
            Err(FetchError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, DEFAULT_MAX_ATTEMPTS);
                assert_eq!(last, "call 10");
            }
            other => panic!("expected RetriesExhausted, got {:?}", other),
        }
        assert_eq!(provider.calls.get(), DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_not_found_is_not_retried() {
        let provider = MissingProvider { calls: Cell::new(0) };
        let result = fetch_with_retry(&provider, &LocationDescriptor::place("Atlantis"), &RetryPolicy::default());
        assert!(matches!(result, Err(FetchError::LocationNotFound(_))));
        assert_eq!(provider.calls.get(), 1);
    }

    #[test]
    fn test_custom_attempt_budget() {
        let provider = flaky(5);
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff: Duration::from_millis(1),
        };
        let result = fetch_with_retry(&provider, &LocationDescriptor::place("Napier"), &policy);
        assert!(matches!(result, Err(FetchError::RetriesExhausted { attempts: 2, .. })));
        assert_eq!(provider.calls.get(), 2);
    }

    #[test]
    fn test_fetched_geometry_areas() {
        let geometry = FetchedGeometry {
            buildings: vec![
                polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
                polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 0.0, y: 3.0)],
            ],
            roads: vec![line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)]],
        };
        assert_relative_eq!(geometry.building_area(), 106.0);
        assert_relative_eq!(geometry.road_area(DEFAULT_ROAD_WIDTH_M), 300.0);

        let totals = geometry.totals(DEFAULT_ROAD_WIDTH_M);
        assert_relative_eq!(totals.impervious_area(), 300.0);
        assert_eq!(geometry.building_features().count(), 2);
    }
}
