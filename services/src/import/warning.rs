use crate::dhis2::OrgUnitId;
use crate::org_units::FeatureType;
use chrono::NaiveDate;
use geedhis2_datatypes::dataset::BandName;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// A problem with a single input item that is skipped instead of aborting the import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportWarning {
    #[serde(rename_all = "camelCase")]
    MalformedCoordinates {
        org_unit: OrgUnitId,
        feature_type: FeatureType,
        reason: String,
    },
    #[serde(rename_all = "camelCase")]
    UnmappedBand { org_unit: OrgUnitId, band: BandName },
    #[serde(rename_all = "camelCase")]
    NonFiniteValue {
        org_unit: OrgUnitId,
        band: BandName,
        date: NaiveDate,
    },
}

impl ImportWarning {
    /// Logs the warning and appends it to `warnings`.
    pub(crate) fn record(self, warnings: &mut Vec<ImportWarning>) {
        warn!("{self}");
        warnings.push(self);
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::MalformedCoordinates {
                org_unit,
                feature_type,
                reason,
            } => write!(
                f,
                "Ignoring malformed {feature_type} coordinates of org unit `{org_unit}`: {reason}"
            ),
            ImportWarning::UnmappedBand { org_unit, band } => write!(
                f,
                "Band `{band}` not found in mapping, dropping its values for org unit `{org_unit}`"
            ),
            ImportWarning::NonFiniteValue {
                org_unit,
                band,
                date,
            } => write!(
                f,
                "Dropping non-finite value of band `{band}` on {date} for org unit `{org_unit}`"
            ),
        }
    }
}
