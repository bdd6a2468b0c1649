//! # tephra-geometry
//!
//! Building and road geometry for tephra clean-up estimation.
//!
//! This crate provides:
//! - [`LocationDescriptor`] - a place name, a point and radius, or a polygon
//! - [`GeometryProvider`] - the seam to whatever map database supplies buildings and roads
//! - [`fetch_with_retry`] - bounded retries on transient timeouts
//! - [`GeometryCatalog`] - a provider backed by a pre-projected JSON file
//! - [`IsopachLayer`] - thickness contours and the overlay that tags features with thickness
//!
//! Shapes are [`geo`] types; polygons may carry holes.
//!
//! ## Example
//!
//! ```no_run
//! use tephra_geometry::{fetch_with_retry, GeometryCatalog, LocationDescriptor, RetryPolicy};
//!
//! let catalog = GeometryCatalog::from_file("data/napier.json")?;
//! let geometry = fetch_with_retry(
//!     &catalog,
//!     &LocationDescriptor::place("Napier, New Zealand"),
//!     &RetryPolicy::default(),
//! )?;
//! println!("Building area: {:.0} m²", geometry.building_area());
//! # Ok::<(), tephra_geometry::FetchError>(())
//! ```

mod catalog;
mod error;
mod location;
mod overlay;
mod provider;
mod shape;

pub use catalog::{CatalogPlace, GeometryCatalog};
pub use error::FetchError;
pub use location::{GeoOrigin, LocationDescriptor, EARTH_RADIUS_M};
pub use overlay::{IsopachContour, IsopachLayer, OverlaidFeatures};
pub use provider::{
    fetch_with_retry, FetchedGeometry, GeometryProvider, RetryPolicy, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_ROAD_WIDTH_M,
};
pub use shape::{intersects_any, is_valid_polygon, multi_polygon_from_json, square};

pub use geo::{Coord, LineString, MultiPolygon, Polygon, Rect};

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, FetchError>;
