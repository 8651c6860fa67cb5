//! Organisation units and the geometries raster data is queried for

use crate::dhis2::OrgUnitId;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod geometry;

pub use geometry::{CoordinatesError, ResolvedGeometries, geometry_from_org_unit, resolve_geometries};

/// The legacy DHIS2 feature type that determines the shape of the `coordinates` payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    None,
    Point,
    Polygon,
    MultiPolygon,
    Symbol,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnit {
    pub id: OrgUnitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<FeatureType>,
    /// Raw JSON text, e.g. `[10,20]` for a point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
}

impl OrgUnit {
    /// An org unit that only carries its id, its geometry is fetched on resolution.
    pub fn new(id: impl Into<OrgUnitId>) -> Self {
        Self {
            id: id.into(),
            feature_type: None,
            coordinates: None,
        }
    }

    /// Whether the unit already says what its geometry is, so it need not be fetched.
    ///
    /// This is the case for an explicit `NONE` feature type or a non-blank coordinates payload.
    pub fn has_geometry_info(&self) -> bool {
        self.feature_type == Some(FeatureType::None)
            || self
                .coordinates
                .as_deref()
                .is_some_and(|coordinates| !coordinates.trim().is_empty())
    }
}

/// Looks up organisation units together with their geometry fields.
#[async_trait]
pub trait OrgUnitRepository: Send + Sync {
    /// Returns the units that exist among `ids`, in no particular order.
    async fn get_org_units_with_geometry(&self, ids: &[OrgUnitId]) -> Result<Vec<OrgUnit>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_deserializes_org_units() {
        let org_units: Vec<OrgUnit> = serde_json::from_value(serde_json::json!([
            { "id": "ou1", "featureType": "MULTI_POLYGON", "coordinates": "[[[[0,0],[1,0],[1,1],[0,0]]]]" },
            { "id": "ou2", "featureType": "CIRCLE" },
            { "id": "ou3" }
        ]))
        .unwrap();

        assert_eq!(org_units[0].feature_type, Some(FeatureType::MultiPolygon));
        assert_eq!(org_units[1].feature_type, Some(FeatureType::Unknown));
        assert_eq!(org_units[2], OrgUnit::new("ou3"));
    }

    #[test]
    fn it_detects_geometry_info() {
        assert!(
            OrgUnit {
                feature_type: Some(FeatureType::None),
                ..OrgUnit::new("ou1")
            }
            .has_geometry_info()
        );
        assert!(
            OrgUnit {
                coordinates: Some("[10,20]".to_string()),
                ..OrgUnit::new("ou1")
            }
            .has_geometry_info()
        );
        assert!(
            !OrgUnit {
                feature_type: Some(FeatureType::Point),
                coordinates: Some("  ".to_string()),
                ..OrgUnit::new("ou1")
            }
            .has_geometry_info()
        );
        assert!(!OrgUnit::new("ou1").has_geometry_info());
    }
}
