use super::{CategoryOptionComboId, DataElementId, OrgUnitId};
use serde::{Deserialize, Serialize};

/// A single value of a data element for an organisation unit and period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValue {
    pub data_element: DataElementId,
    /// Decimal text with exactly 18 fractional digits
    pub value: String,
    pub org_unit: OrgUnitId,
    /// Period key, `YYYYMMDD` for daily periods
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_option_combo: Option<CategoryOptionComboId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_option_combo: Option<CategoryOptionComboId>,
}

/// The batch envelope `{ "dataValues": [...] }` of the `dataValueSets` endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValueSet {
    pub data_values: Vec<DataValue>,
}

impl DataValueSet {
    pub fn len(&self) -> usize {
        self.data_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_values.is_empty()
    }
}

impl From<Vec<DataValue>> for DataValueSet {
    fn from(data_values: Vec<DataValue>) -> Self {
        Self { data_values }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCount {
    #[serde(default)]
    pub imported: u32,
    #[serde(default)]
    pub updated: u32,
    #[serde(default)]
    pub ignored: u32,
    #[serde(default)]
    pub deleted: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConflict {
    pub object: String,
    pub value: String,
}

/// The import summary DHIS2 returns for a posted data value set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValueSetsPostResponse {
    pub status: ImportStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub import_count: ImportCount,
    #[serde(default)]
    pub conflicts: Vec<ImportConflict>,
}

/// Newer API versions wrap the import summary into a web message.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum PostResponseBody {
    WebMessage { response: DataValueSetsPostResponse },
    ImportSummary(DataValueSetsPostResponse),
}

impl PostResponseBody {
    pub(super) fn into_import_summary(self) -> DataValueSetsPostResponse {
        match self {
            PostResponseBody::WebMessage { response } | PostResponseBody::ImportSummary(response) => {
                response
            }
        }
    }
}
