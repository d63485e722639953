use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::polygon::{multipolygon_centroid, Point};

/// Properties naming the district number, newest census first
const DISTRICT_PROPERTIES: &[&str] = &["CD119FP", "CD118FP", "CDFP"];

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: HashMap<String, Value>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// A ring as GeoJSON positions; positions may carry a third (altitude) value
type Ring = Vec<Vec<f64>>;

/// Outer rings of one district (or state) shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictShape {
    /// Same key scheme as the aggregated units
    pub key: String,
    pub polygons: Vec<Vec<Point>>,
}

impl DistrictShape {
    pub fn centroid(&self) -> Option<Point> {
        multipolygon_centroid(&self.polygons)
    }
}

fn property(properties: &HashMap<String, Value>, name: &str) -> Option<String> {
    match properties.get(name)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn feature_key(properties: &HashMap<String, Value>) -> Option<String> {
    let state = property(properties, "STATEFP")?;
    let district = DISTRICT_PROPERTIES
        .iter()
        .find_map(|name| property(properties, name));
    match district {
        Some(d) if d.chars().all(|c| c.is_ascii_digit()) && !d.is_empty() => {
            Some(format!("{:0>2}{:0>2}", state, d))
        }
        // "ZZ" marks water-only areas with no district
        Some(_) => None,
        None => Some(format!("{:0>2}", state)),
    }
}

fn outer_ring(rings: Vec<Ring>) -> Option<Vec<Point>> {
    let ring = rings.into_iter().next()?;
    Some(
        ring.into_iter()
            .filter_map(|position| match position.as_slice() {
                [x, y, ..] => Some(Point::new(*x, *y)),
                _ => None,
            })
            .collect(),
    )
}

fn polygons_of(geometry: Geometry) -> Result<Option<Vec<Vec<Point>>>> {
    let polygons = match geometry.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Ring> = serde_json::from_value(geometry.coordinates)
                .context("Invalid Polygon coordinates")?;
            outer_ring(rings).into_iter().collect()
        }
        "MultiPolygon" => {
            let parts: Vec<Vec<Ring>> = serde_json::from_value(geometry.coordinates)
                .context("Invalid MultiPolygon coordinates")?;
            parts.into_iter().filter_map(outer_ring).collect()
        }
        _ => return Ok(None),
    };
    Ok(Some(polygons))
}

/// Parse a GeoJSON FeatureCollection of district or state boundaries.
///
/// Features are keyed by `STATEFP` plus a district property when present.
/// Features without a usable key or polygon geometry are skipped.
pub fn parse_shapes(json: &str) -> Result<Vec<DistrictShape>> {
    let collection: FeatureCollection =
        serde_json::from_str(json).context("Failed to parse GeoJSON feature collection")?;

    let mut shapes = Vec::new();
    for feature in collection.features {
        let Some(key) = feature_key(&feature.properties) else {
            tracing::debug!("skipping feature without a district key");
            continue;
        };
        let polygons = match feature.geometry {
            Some(geometry) => polygons_of(geometry).with_context(|| format!("Feature {}", key))?,
            None => None,
        };
        let Some(polygons) = polygons else {
            tracing::debug!(key = %key, "skipping feature without polygon geometry");
            continue;
        };
        shapes.push(DistrictShape { key, polygons });
    }

    if shapes.is_empty() {
        bail!("GeoJSON contains no usable district or state polygons");
    }
    Ok(shapes)
}

pub fn load_shapes(path: &Path) -> Result<Vec<DistrictShape>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read shapes file at {}", path.display()))?;
    parse_shapes(&content).with_context(|| format!("Invalid shapes file {}", path.display()))
}

/// Label position per shape key
pub fn centroids(shapes: &[DistrictShape]) -> HashMap<String, Point> {
    shapes
        .iter()
        .filter_map(|shape| shape.centroid().map(|c| (shape.key.clone(), c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "STATEFP": "06", "CD118FP": "12" },
          "geometry": {
            "type": "Polygon",
            "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]
          }
        },
        {
          "type": "Feature",
          "properties": { "STATEFP": "15", "CD119FP": "1" },
          "geometry": {
            "type": "MultiPolygon",
            "coordinates": [
              [[[10, 10], [11, 10], [11, 11], [10, 11], [10, 10]]],
              [[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]]
            ]
          }
        },
        {
          "type": "Feature",
          "properties": { "STATEFP": "09", "CD118FP": "ZZ" },
          "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
        },
        {
          "type": "Feature",
          "properties": { "STATEFP": "50" },
          "geometry": { "type": "Point", "coordinates": [1, 1] }
        }
      ]
    }"#;

    #[test]
    fn test_parse_shapes() {
        let shapes = parse_shapes(SAMPLE).unwrap();
        let keys: Vec<&str> = shapes.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["0612", "1501"]);
    }

    #[test]
    fn test_centroids_use_largest_part() {
        let shapes = parse_shapes(SAMPLE).unwrap();
        let centroids = centroids(&shapes);
        assert_eq!(centroids.get("0612"), Some(&Point::new(1.0, 1.0)));
        assert_eq!(centroids.get("1501"), Some(&Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_state_feature_key() {
        let json = r#"{"features": [{"properties": {"STATEFP": "50"},
            "geometry": {"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2]]]}}]}"#;
        let shapes = parse_shapes(json).unwrap();
        assert_eq!(shapes[0].key, "50");
    }

    #[test]
    fn test_no_usable_features() {
        assert!(parse_shapes(r#"{"features": []}"#).is_err());
        assert!(parse_shapes("not json").is_err());
    }
}
