use super::{MappingId, PeriodOption};
use crate::dhis2::OrgUnitId;
use chrono::{DateTime, Utc};
use geedhis2_datatypes::string_identifier;
use serde::{Deserialize, Serialize};

string_identifier!(
    /// Identifier of an [`ImportRule`]
    ImportRuleId
);

/// Id of the rule that backs manual imports
pub const DEFAULT_IMPORT_RULE_ID: &str = "default";

/// What to import: the selected mappings for the selected org units over a period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRule {
    pub id: ImportRuleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "selectedOUs")]
    pub selected_org_units: Vec<OrgUnitId>,
    #[serde(rename = "periodInformation")]
    pub period: PeriodOption,
    pub selected_mappings: Vec<MappingId>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_executed: Option<DateTime<Utc>>,
}

impl ImportRule {
    pub fn is_default(&self) -> bool {
        self.id.as_str() == DEFAULT_IMPORT_RULE_ID
    }

    #[must_use]
    pub fn change_mappings(&self, selected_mappings: Vec<MappingId>) -> Self {
        Self {
            selected_mappings,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn change_org_units(&self, selected_org_units: Vec<OrgUnitId>) -> Self {
        Self {
            selected_org_units,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn change_period(&self, period: PeriodOption) -> Self {
        Self {
            period,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn update_last_executed(&self, now: DateTime<Utc>) -> Self {
        Self {
            last_executed: Some(now),
            ..self.clone()
        }
    }
}
