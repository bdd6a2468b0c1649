//! Planar shapes in a projected, metre-based coordinate frame.
//!
//! Geometry uses the `geo` types. On disk shapes follow GeoJSON coordinate
//! nesting: a line string is `[[x, y], ...]`, a polygon is a list of rings
//! with the exterior first and any holes after it, and a multi-polygon is a
//! list of polygons.

use geo::{Coord, Intersects, LineString, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Vertices of one ring or line string as `[x, y]` pairs.
type Coords = Vec<[f64; 2]>;

/// Axis-aligned square centred on `center` with half-side `half_side`.
pub fn square(center: Coord<f64>, half_side: f64) -> Polygon<f64> {
    Rect::new(
        Coord {
            x: center.x - half_side,
            y: center.y - half_side,
        },
        Coord {
            x: center.x + half_side,
            y: center.y + half_side,
        },
    )
    .to_polygon()
}

/// Whether every ring of the polygon encloses at least three vertices.
pub fn is_valid_polygon(polygon: &Polygon<f64>) -> bool {
    // Rings are closed on construction, so three vertices make four coordinates.
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .all(|ring| ring.0.len() >= 4)
}

/// Whether `shape` intersects any polygon of `area`.
pub fn intersects_any<G>(shape: &G, area: &MultiPolygon<f64>) -> bool
where
    G: Intersects<Polygon<f64>>,
{
    area.iter().any(|polygon| shape.intersects(polygon))
}

/// Smallest rectangle covering both rectangles.
pub(crate) fn union_rect(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

fn to_line_string(coords: Coords) -> LineString<f64> {
    coords.into_iter().map(|[x, y]| Coord { x, y }).collect()
}

fn from_line_string(line: &LineString<f64>) -> Coords {
    line.coords().map(|c| [c.x, c.y]).collect()
}

fn to_polygon(rings: Vec<Coords>) -> Polygon<f64> {
    let mut rings = rings.into_iter().map(to_line_string);
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

fn from_polygon(polygon: &Polygon<f64>) -> Vec<Coords> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(from_line_string)
        .collect()
}

/// Serde adapter for a single `Polygon` as a list of rings.
pub(crate) mod polygon_coords {
    use super::*;

    pub fn serialize<S: Serializer>(polygon: &Polygon<f64>, s: S) -> Result<S::Ok, S::Error> {
        from_polygon(polygon).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Polygon<f64>, D::Error> {
        Ok(to_polygon(Vec::<Coords>::deserialize(d)?))
    }
}

/// Serde adapter for `Vec<Polygon>`.
pub(crate) mod polygons_coords {
    use super::*;

    pub fn serialize<S: Serializer>(polygons: &[Polygon<f64>], s: S) -> Result<S::Ok, S::Error> {
        polygons.iter().map(from_polygon).collect::<Vec<_>>().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Polygon<f64>>, D::Error> {
        Ok(Vec::<Vec<Coords>>::deserialize(d)?
            .into_iter()
            .map(to_polygon)
            .collect())
    }
}

/// Serde adapter for a `MultiPolygon` as a list of polygons.
pub(crate) mod multi_polygon_coords {
    use super::*;

    pub fn serialize<S: Serializer>(area: &MultiPolygon<f64>, s: S) -> Result<S::Ok, S::Error> {
        polygons_coords::serialize(&area.0, s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<MultiPolygon<f64>, D::Error> {
        polygons_coords::deserialize(d).map(MultiPolygon::new)
    }
}

/// Serde adapter for `Vec<LineString>`.
pub(crate) mod line_strings_coords {
    use super::*;

    pub fn serialize<S: Serializer>(lines: &[LineString<f64>], s: S) -> Result<S::Ok, S::Error> {
        lines.iter().map(from_line_string).collect::<Vec<_>>().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<LineString<f64>>, D::Error> {
        Ok(Vec::<Coords>::deserialize(d)?
            .into_iter()
            .map(to_line_string)
            .collect())
    }
}

/// Parse a multi-polygon from GeoJSON-style coordinates.
pub fn multi_polygon_from_json(json: &str) -> serde_json::Result<MultiPolygon<f64>> {
    let mut de = serde_json::Deserializer::from_str(json);
    let area = multi_polygon_coords::deserialize(&mut de)?;
    de.end()?;
    Ok(area)
}
