use crate::primitives::{Coordinate2D, MultiPolygon};
use serde::{Deserialize, Serialize};

/// A geometry that raster data can be queried for.
///
/// Serializes as `{"type": "point", "coordinates": [x, y]}` or
/// `{"type": "multi-polygon", "polygonCoordinates": [[[[x, y], ...]]]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Geometry {
    Point {
        coordinates: Coordinate2D,
    },
    #[serde(rename_all = "camelCase")]
    MultiPolygon {
        polygon_coordinates: MultiPolygon,
    },
}

impl Geometry {
    pub fn point(coordinates: Coordinate2D) -> Self {
        Self::Point { coordinates }
    }

    pub fn multi_polygon(polygon_coordinates: MultiPolygon) -> Self {
        Self::MultiPolygon {
            polygon_coordinates,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "point",
            Geometry::MultiPolygon { .. } => "multi-polygon",
        }
    }
}

impl From<&Geometry> for geojson::Geometry {
    fn from(geometry: &Geometry) -> geojson::Geometry {
        let value = match geometry {
            Geometry::Point { coordinates } => geojson::Value::Point(coordinates.into()),
            Geometry::MultiPolygon {
                polygon_coordinates,
            } => polygon_coordinates.into(),
        };

        geojson::Geometry::new(value)
    }
}
