//! File-backed geometry catalog.
//!
//! A catalog is a JSON document holding building footprints and road
//! centrelines for a study region, already projected into a metre-based
//! frame, together with the named places it can resolve:
//!
//! ```json
//! {
//!   "origin": { "lat": -39.49, "lon": 176.91 },
//!   "places": [ { "name": "Napier", "boundary": [[[0, 0], [500, 0], [500, 500], [0, 500]]] } ],
//!   "buildings": [ [[[10, 10], [20, 10], [20, 20], [10, 20]]] ],
//!   "roads": [ [[0, 5], [500, 5]] ]
//! }
//! ```
//!
//! Boundaries and buildings are polygons: the exterior ring first, then any
//! holes. Selection follows the map-database semantics: a feature is returned
//! when it intersects the requested area. A point and radius selects the
//! square bounding box of side `2 * radius_m` centred on the point.

use crate::location::GeoOrigin;
use crate::provider::{FetchedGeometry, GeometryProvider};
use crate::shape::{
    intersects_any, is_valid_polygon, line_strings_coords, polygon_coords, polygons_coords, square,
    union_rect,
};
use crate::{FetchError, LocationDescriptor, Result};
use geo::{BoundingRect, Coord, Intersects, LineString, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A named place and its boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPlace {
    pub name: String,
    #[serde(with = "polygon_coords")]
    pub boundary: Polygon<f64>,
}

/// Geometry for a study region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCatalog {
    /// Geographic position of the frame's `(0, 0)`.
    pub origin: GeoOrigin,
    #[serde(default)]
    pub places: Vec<CatalogPlace>,
    #[serde(default, with = "polygons_coords")]
    pub buildings: Vec<Polygon<f64>>,
    #[serde(default, with = "line_strings_coords")]
    pub roads: Vec<LineString<f64>>,
}

impl GeometryCatalog {
    /// Load a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "Loaded geometry catalog {}: {} places, {} buildings, {} roads",
            path.display(),
            catalog.places.len(),
            catalog.buildings.len(),
            catalog.roads.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: GeometryCatalog = serde_json::from_str(json)?;
        if let Some(place) = catalog.places.iter().find(|p| !is_valid_polygon(&p.boundary)) {
            return Err(FetchError::InvalidGeometry(format!(
                "place '{}' boundary rings need at least 3 vertices",
                place.name
            )));
        }
        Ok(catalog)
    }

    /// Find a place by name.
    ///
    /// Only the text before the first comma is compared, case-insensitively,
    /// so `"Napier, New Zealand"` resolves to a place named `"Napier"`.
    pub fn find_place(&self, name: &str) -> Option<&CatalogPlace> {
        let wanted = primary_name(name);
        self.places
            .iter()
            .find(|p| primary_name(&p.name).eq_ignore_ascii_case(wanted))
    }

    /// Bounding box of every feature and place in the catalog.
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.buildings
            .iter()
            .filter_map(|b| b.bounding_rect())
            .chain(self.roads.iter().filter_map(|r| r.bounding_rect()))
            .chain(self.places.iter().filter_map(|p| p.boundary.bounding_rect()))
            .reduce(union_rect)
    }

    /// Buildings and roads intersecting `area`.
    pub fn select(&self, area: &MultiPolygon<f64>) -> FetchedGeometry {
        let buildings = self
            .buildings
            .iter()
            .filter(|b| intersects_any(*b, area))
            .cloned()
            .collect();
        let roads = self
            .roads
            .iter()
            .filter(|r| intersects_any(*r, area))
            .cloned()
            .collect();
        FetchedGeometry { buildings, roads }
    }
}

impl GeometryProvider for GeometryCatalog {
    fn fetch(&self, location: &LocationDescriptor) -> Result<FetchedGeometry> {
        let area = match location {
            LocationDescriptor::PlaceName { name } => {
                let place = self
                    .find_place(name)
                    .ok_or_else(|| FetchError::LocationNotFound(name.clone()))?;
                MultiPolygon::new(vec![place.boundary.clone()])
            }
            LocationDescriptor::PointAndRadius { lat, lon, radius_m } => {
                let (x, y) = self.origin.project(*lat, *lon);
                let query = square(Coord { x, y }, *radius_m);
                // Outside the catalog only when the query square misses it entirely.
                let covered = match (self.extent(), query.bounding_rect()) {
                    (Some(extent), Some(bounds)) => extent.intersects(&bounds),
                    _ => false,
                };
                if !covered {
                    return Err(FetchError::LocationNotFound(location.to_string()));
                }
                MultiPolygon::new(vec![query])
            }
            LocationDescriptor::Polygon { polygons } => {
                if polygons.0.is_empty() || !polygons.iter().all(is_valid_polygon) {
                    return Err(FetchError::InvalidGeometry(
                        "polygon location needs at least one polygon whose rings have 3 or more vertices"
                            .to_string(),
                    ));
                }
                polygons.clone()
            }
        };

        let geometry = self.select(&area);
        debug!(
            "Selected {} buildings and {} roads for {}",
            geometry.buildings.len(),
            geometry.roads.len(),
            location
        );
        Ok(geometry)
    }
}

fn primary_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name).trim()
}
