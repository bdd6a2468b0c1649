//! Location descriptors accepted by geometry providers.

use crate::shape::multi_polygon_coords;
use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// Mean Earth radius (m) used for the local equirectangular projection.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Where to fetch buildings and roads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationDescriptor {
    /// A named place, e.g. `"Auckland, New Zealand"`.
    PlaceName { name: String },
    /// A geographic point and a search radius in metres.
    PointAndRadius { lat: f64, lon: f64, radius_m: f64 },
    /// One or more polygons, holes allowed, in the provider's projected frame.
    Polygon {
        #[serde(with = "multi_polygon_coords")]
        polygons: MultiPolygon<f64>,
    },
}

impl LocationDescriptor {
    pub fn place(name: impl Into<String>) -> Self {
        LocationDescriptor::PlaceName { name: name.into() }
    }

    pub fn point(lat: f64, lon: f64, radius_m: f64) -> Self {
        LocationDescriptor::PointAndRadius { lat, lon, radius_m }
    }

    pub fn polygon(polygons: Vec<Polygon<f64>>) -> Self {
        LocationDescriptor::Polygon {
            polygons: MultiPolygon::new(polygons),
        }
    }
}

impl std::fmt::Display for LocationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationDescriptor::PlaceName { name } => write!(f, "{}", name),
            LocationDescriptor::PointAndRadius { lat, lon, radius_m } => {
                write!(f, "({:.5}, {:.5}) r={}m", lat, lon, radius_m)
            }
            LocationDescriptor::Polygon { polygons } => {
                write!(f, "polygon ({} parts)", polygons.0.len())
            }
        }
    }
}

/// Geographic origin of a projected frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoOrigin {
    pub lat: f64,
    pub lon: f64,
}

impl GeoOrigin {
    /// Project a latitude/longitude to metres east/north of this origin.
    ///
    /// Equirectangular approximation about the origin latitude; adequate over
    /// the few kilometres a clean-up study area spans.
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let x = (lon - self.lon).to_radians() * EARTH_RADIUS_M * self.lat.to_radians().cos();
        let y = (lat - self.lat).to_radians() * EARTH_RADIUS_M;
        (x, y)
    }
}
