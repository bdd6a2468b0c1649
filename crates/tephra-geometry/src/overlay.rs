//! Isopach layers and the overlay that attaches thickness to features.

use crate::provider::FetchedGeometry;
use crate::shape::{is_valid_polygon, polygon_coords};
use crate::{FetchError, LocationDescriptor, Result};
use geo::{Intersects, Polygon};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tephra_model::{SurfaceFeature, ThicknessRange};
use tracing::{debug, info};

/// A polygon of tephra thickness bounds (mm).
///
/// Bands between two isopachs are polygons with a hole where the next,
/// thicker contour sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsopachContour {
    pub min_thick: f64,
    pub max_thick: f64,
    #[serde(with = "polygon_coords")]
    pub polygon: Polygon<f64>,
}

impl IsopachContour {
    fn thickness(&self) -> Result<ThicknessRange> {
        ThicknessRange::new(self.min_thick, self.max_thick)
            .map_err(|e| FetchError::InvalidGeometry(format!("isopach contour: {}", e)))
    }
}

/// A set of isopach contours in the same projected frame as the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsopachLayer {
    pub contours: Vec<IsopachContour>,
}

/// Buildings and roads carrying thickness attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaidFeatures {
    pub buildings: Vec<SurfaceFeature>,
    pub roads: Vec<SurfaceFeature>,
}

impl IsopachLayer {
    /// Load a layer from a JSON file of the form `{"contours": [{"min_thick", "max_thick", "polygon"}]}`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let layer = Self::from_json_str(&content)?;
        info!("Loaded {} isopach contours from {}", layer.contours.len(), path.display());
        Ok(layer)
    }

    /// Parse and validate a layer from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let layer: IsopachLayer = serde_json::from_str(json)?;
        layer.validate()?;
        Ok(layer)
    }

    /// Reject empty layers, degenerate polygons and inverted thickness ranges.
    pub fn validate(&self) -> Result<()> {
        if self.contours.is_empty() {
            return Err(FetchError::InvalidGeometry("isopach layer has no contours".to_string()));
        }
        for contour in &self.contours {
            if !is_valid_polygon(&contour.polygon) {
                return Err(FetchError::InvalidGeometry(
                    "isopach polygon rings need at least 3 vertices".to_string(),
                ));
            }
            contour.thickness()?;
        }
        Ok(())
    }

    /// The area covered by every contour, as a polygon location.
    pub fn footprint(&self) -> LocationDescriptor {
        LocationDescriptor::polygon(self.contours.iter().map(|c| c.polygon.clone()).collect())
    }

    /// Inner join of features against contours on intersection.
    ///
    /// A feature touching several contours appears once per contour, each
    /// copy carrying that contour's thickness. Features touching no contour
    /// are dropped.
    pub fn overlay(&self, geometry: &FetchedGeometry, road_width_m: f64) -> Result<OverlaidFeatures> {
        let mut overlaid = OverlaidFeatures::default();

        for contour in &self.contours {
            let thickness = contour.thickness()?;
            overlaid.buildings.extend(
                geometry
                    .building_features()
                    .filter(|(b, _)| b.intersects(&contour.polygon))
                    .map(|(_, f)| SurfaceFeature::with_thickness(f.area, thickness)),
            );
            overlaid.roads.extend(
                geometry
                    .road_features(road_width_m)
                    .filter(|(r, _)| r.intersects(&contour.polygon))
                    .map(|(_, f)| SurfaceFeature::with_thickness(f.area, thickness)),
            );
        }

        debug!(
            "Overlay matched {} building and {} road records against {} contours",
            overlaid.buildings.len(),
            overlaid.roads.len(),
            self.contours.len()
        );
        Ok(overlaid)
    }
}
