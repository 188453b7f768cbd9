//! GeoJSON reading for region boundaries.

use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

/// Region boundaries, index-aligned: `names[i]` labels `shapes[i]`.
pub struct RegionGeometries {
    pub names: Vec<String>,
    pub shapes: Vec<MultiPolygon<f64>>,
}

impl RegionGeometries {
    pub fn len(&self) -> usize { self.names.len() }

    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

/// Read a GeoJSON FeatureCollection of region boundaries.
///
/// Each feature must carry the region display name in a property literally
/// named "nom". Polygon and MultiPolygon geometries are both accepted;
/// polygons are promoted to single-element multipolygons.
pub fn read_region_geometries(path: &Path) -> Result<RegionGeometries> {
    let bytes = fs::read(path)
        .with_context(|| format!("[io::geojson] failed to read {}", path.display()))?;
    parse_feature_collection(&bytes)
        .with_context(|| format!("[io::geojson] failed to parse {}", path.display()))
}

pub(crate) fn parse_feature_collection(bytes: &[u8]) -> Result<RegionGeometries> {
    let value: Value = serde_json::from_slice(bytes).context("not valid JSON")?;
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("missing \"features\" array"))?;

    let mut names = Vec::with_capacity(features.len());
    let mut shapes = Vec::with_capacity(features.len());

    for (idx, feature) in features.iter().enumerate() {
        let name = feature["properties"]["nom"].as_str()
            .ok_or_else(|| anyhow!("feature {} has no \"nom\" property", idx))?;

        let geometry = &feature["geometry"];
        let coords = geometry["coordinates"].as_array()
            .ok_or_else(|| anyhow!("feature {} has no coordinates", idx))?;
        let shape = match geometry["type"].as_str() {
            Some("Polygon") => MultiPolygon(vec![parse_polygon(coords)?]),
            Some("MultiPolygon") => parse_multipolygon(coords)?,
            other => return Err(anyhow!("feature {} has unsupported geometry type {:?}", idx, other)),
        };

        names.push(name.to_string());
        shapes.push(shape);
    }

    Ok(RegionGeometries { names, shapes })
}

/// MultiPolygon coordinates: [polygon, polygon, ...].
fn parse_multipolygon(polygons: &[Value]) -> Result<MultiPolygon<f64>> {
    polygons.iter()
        .map(|poly| poly.as_array()
            .ok_or_else(|| anyhow!("polygon is not an array"))
            .and_then(|rings| parse_polygon(rings)))
        .collect::<Result<Vec<_>>>()
        .map(MultiPolygon)
}

/// Polygon coordinates: [exterior, hole, hole, ...].
fn parse_polygon(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("ring is not an array"))
            .and_then(|r| parse_ring(r))
    });

    let exterior = rings.next()
        .ok_or_else(|| anyhow!("polygon missing exterior ring"))??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, interiors))
}

/// Ring coordinates: [[x, y], [x, y], ...].
fn parse_ring(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for pair in coords {
        let pair = pair.as_array().ok_or_else(|| anyhow!("coordinate is not an array"))?;
        let x = pair.first().and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("coordinate x is not a number"))?;
        let y = pair.get(1).and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("coordinate y is not a number"))?;
        points.push(Coord { x, y });
    }

    // Close the ring if the source left it open.
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
