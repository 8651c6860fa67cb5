use super::{FeatureType, OrgUnit, OrgUnitRepository};
use crate::dhis2::OrgUnitId;
use crate::error::Result;
use crate::import::ImportWarning;
use geedhis2_datatypes::primitives::{
    Coordinate2D, Geometry, MultiPolygon, Polygon, PrimitivesError,
};
use indexmap::IndexMap;
use snafu::{ResultExt, Snafu};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum CoordinatesError {
    #[snafu(display("Unable to parse coordinates: {source}"))]
    InvalidCoordinatesJson { source: serde_json::Error },

    #[snafu(display("{source}"), context(false))]
    InvalidPolygon { source: PrimitivesError },
}

/// The geometry of each distinct org unit, in input order, `None` if there is none.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedGeometries {
    pub geometries: IndexMap<OrgUnitId, Option<Geometry>>,
    pub warnings: Vec<ImportWarning>,
}

/// Derives the geometry of an org unit from its feature type and coordinates payload.
///
/// Feature types without an area or position (`NONE`, `SYMBOL`, unknown ones) and blank payloads
/// yield `Ok(None)`.
pub fn geometry_from_org_unit(
    org_unit: &OrgUnit,
) -> std::result::Result<Option<Geometry>, CoordinatesError> {
    let Some(coordinates) = org_unit
        .coordinates
        .as_deref()
        .map(str::trim)
        .filter(|coordinates| !coordinates.is_empty())
    else {
        return Ok(None);
    };

    match org_unit.feature_type {
        Some(FeatureType::Point) => {
            let coordinate: Coordinate2D =
                serde_json::from_str(coordinates).context(InvalidCoordinatesJson)?;

            Ok(Some(Geometry::point(coordinate)))
        }
        // legacy polygons are stored with multi polygon nesting as well
        Some(FeatureType::Polygon | FeatureType::MultiPolygon) => {
            let polygons: Vec<Polygon> =
                serde_json::from_str(coordinates).context(InvalidCoordinatesJson)?;

            Ok(Some(Geometry::multi_polygon(MultiPolygon::new(polygons)?)))
        }
        Some(FeatureType::None | FeatureType::Symbol | FeatureType::Unknown) | None => Ok(None),
    }
}

/// Resolves the geometries of `org_units`.
///
/// Units that neither carry coordinates nor declare the `NONE` feature type are looked up with a
/// single request to `repository`. Ids the repository does not know map to `None`.
pub async fn resolve_geometries<R>(repository: &R, org_units: &[OrgUnit]) -> Result<ResolvedGeometries>
where
    R: OrgUnitRepository + ?Sized,
{
    let mut distinct: IndexMap<&OrgUnitId, &OrgUnit> = IndexMap::with_capacity(org_units.len());
    for org_unit in org_units {
        distinct.entry(&org_unit.id).or_insert(org_unit);
    }

    let missing: Vec<OrgUnitId> = distinct
        .values()
        .filter(|org_unit| !org_unit.has_geometry_info())
        .map(|org_unit| org_unit.id.clone())
        .collect();

    let fetched: HashMap<OrgUnitId, OrgUnit> = if missing.is_empty() {
        HashMap::new()
    } else {
        debug!("Fetching geometries of {} org units", missing.len());

        repository
            .get_org_units_with_geometry(&missing)
            .await?
            .into_iter()
            .map(|org_unit| (org_unit.id.clone(), org_unit))
            .collect()
    };

    let mut resolved = ResolvedGeometries {
        geometries: IndexMap::with_capacity(distinct.len()),
        warnings: Vec::new(),
    };

    for (id, org_unit) in distinct {
        let source = if org_unit.has_geometry_info() {
            Some(org_unit)
        } else {
            fetched.get(id)
        };

        let geometry = match source {
            Some(source) => geometry_from_org_unit(source).unwrap_or_else(|error| {
                ImportWarning::MalformedCoordinates {
                    org_unit: id.clone(),
                    feature_type: source.feature_type.unwrap_or(FeatureType::Unknown),
                    reason: error.to_string(),
                }
                .record(&mut resolved.warnings);
                None
            }),
            None => None,
        };

        if geometry.is_none() {
            debug!("Org unit `{id}` has no geometry");
        }

        resolved.geometries.insert(id.clone(), geometry);
    }

    Ok(resolved)
}
