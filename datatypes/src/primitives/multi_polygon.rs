use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::primitives::{Coordinate2D, PrimitivesError, error};

pub type Ring = Vec<Coordinate2D>;
pub type Polygon = Vec<Ring>;

/// A representation of a simple feature multi polygon
///
/// It (de)serializes as the bare nested coordinate array `polygon → ring → point`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Polygon>", into = "Vec<Polygon>")]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a multi polygon, closing rings whose last coordinate differs from the first one.
    ///
    /// # Errors
    ///
    /// Fails if there are no polygons or a polygon or ring has no coordinates.
    ///
    pub fn new(mut polygons: Vec<Polygon>) -> Result<Self, PrimitivesError> {
        ensure!(
            !polygons.is_empty()
                && polygons
                    .iter()
                    .all(|polygon| !polygon.is_empty() && polygon.iter().all(|ring| !ring.is_empty())),
            error::UnallowedEmpty
        );

        for ring in polygons.iter_mut().flatten() {
            Self::close_ring(ring);
        }

        Ok(Self { polygons })
    }

    fn close_ring(ring: &mut Ring) {
        let Some(&first) = ring.first() else {
            return;
        };

        if ring.last() != Some(&first) {
            ring.push(first);
        }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl TryFrom<Vec<Polygon>> for MultiPolygon {
    type Error = PrimitivesError;

    fn try_from(polygons: Vec<Polygon>) -> Result<Self, Self::Error> {
        Self::new(polygons)
    }
}

impl From<MultiPolygon> for Vec<Polygon> {
    fn from(multi_polygon: MultiPolygon) -> Self {
        multi_polygon.polygons
    }
}

impl From<&MultiPolygon> for geojson::Value {
    fn from(multi_polygon: &MultiPolygon) -> geojson::Value {
        geojson::Value::MultiPolygon(
            multi_polygon
                .polygons()
                .iter()
                .map(|polygon| {
                    polygon
                        .iter()
                        .map(|ring| ring.iter().map(Into::into).collect())
                        .collect()
                })
                .collect(),
        )
    }
}
