use super::{
    DataValueSetOutcome, GeeDhis2, GetDataValueSetOptions, ImportRule, ImportRuleId,
    ImportWarning, Mapping, MappingId,
};
use crate::datasets::DatasetCatalog;
use crate::dhis2::{DataValueSet, DataValueSetRepository, DataValueSetsPostResponse};
use crate::error::{self, Result};
use crate::gee::GeeDataRepository;
use crate::org_units::{OrgUnit, OrgUnitRepository};
use chrono::{DateTime, Utc};
use geedhis2_datatypes::dataset::DatasetId;
use geedhis2_datatypes::primitives::Interval;
use serde::Serialize;
use snafu::OptionExt;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingImportSummary {
    pub mapping_id: MappingId,
    pub dataset_id: DatasetId,
    pub data_value_count: usize,
    #[serde(skip)]
    pub data_value_set: DataValueSet,
    pub warnings: Vec<ImportWarning>,
    /// Absent for dry runs and empty value sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_response: Option<DataValueSetsPostResponse>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub rule_id: ImportRuleId,
    pub interval: Interval,
    pub dry_run: bool,
    pub mappings: Vec<MappingImportSummary>,
}

impl ImportSummary {
    /// All data values of the import in one set.
    pub fn data_value_set(&self) -> DataValueSet {
        self.mappings
            .iter()
            .flat_map(|mapping| mapping.data_value_set.data_values.iter().cloned())
            .collect::<Vec<_>>()
            .into()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportOutcome {
    pub summary: ImportSummary,
    /// The executed rule with its last execution updated
    pub rule: ImportRule,
}

/// Executes import rules.
#[derive(Debug)]
pub struct ImportRunner<'a, D, G> {
    gee_dhis2: &'a GeeDhis2<D, G>,
    catalog: &'a DatasetCatalog,
}

impl<'a, D, G> ImportRunner<'a, D, G>
where
    D: OrgUnitRepository + DataValueSetRepository,
    G: GeeDataRepository,
{
    pub fn new(gee_dhis2: &'a GeeDhis2<D, G>, catalog: &'a DatasetCatalog) -> Self {
        Self { gee_dhis2, catalog }
    }

    /// Builds and, unless `dry_run` is set, posts one data value set per selected mapping.
    ///
    /// All mappings are checked against the dataset catalog before any data is requested.
    pub async fn run(
        &self,
        rule: &ImportRule,
        mappings: &[Mapping],
        now: DateTime<Utc>,
        dry_run: bool,
    ) -> Result<ImportOutcome> {
        let interval = rule.period.interval(now.date_naive())?;

        let selected = rule
            .selected_mappings
            .iter()
            .map(|id| {
                let mapping = mappings
                    .iter()
                    .find(|mapping| mapping.id == *id)
                    .with_context(|| error::MappingNotFound { id: id.clone() })?;
                let dataset = self.catalog.get(&mapping.dataset_id)?;
                dataset.validate_band_mapping(&mapping.band_mapping)?;

                Ok((mapping, dataset))
            })
            .collect::<Result<Vec<_>>>()?;

        let org_units: Vec<OrgUnit> = rule
            .selected_org_units
            .iter()
            .cloned()
            .map(OrgUnit::new)
            .collect();

        info!(
            "Running import rule `{}` with {} mappings for {} org units from {} to {}",
            rule.id,
            selected.len(),
            org_units.len(),
            interval.start(),
            interval.end()
        );

        let mut summaries = Vec::with_capacity(selected.len());

        for (mapping, dataset) in selected {
            let DataValueSetOutcome {
                data_value_set,
                warnings,
            } = self
                .gee_dhis2
                .get_data_value_set(&GetDataValueSetOptions {
                    dataset_id: &dataset.id,
                    mapping: &mapping.band_mapping,
                    org_units: &org_units,
                    interval,
                    scale: dataset.default_scale,
                })
                .await?;

            let post_response = if dry_run || data_value_set.is_empty() {
                None
            } else {
                let response = self.gee_dhis2.post_data_value_set(&data_value_set).await?;

                info!(
                    "Posted mapping `{}`: {} imported, {} updated, {} ignored",
                    mapping.id,
                    response.import_count.imported,
                    response.import_count.updated,
                    response.import_count.ignored
                );

                Some(response)
            };

            summaries.push(MappingImportSummary {
                mapping_id: mapping.id.clone(),
                dataset_id: dataset.id.clone(),
                data_value_count: data_value_set.len(),
                data_value_set,
                warnings,
                post_response,
            });
        }

        Ok(ImportOutcome {
            summary: ImportSummary {
                rule_id: rule.id.clone(),
                interval,
                dry_run,
                mappings: summaries,
            },
            rule: rule.update_last_executed(now),
        })
    }
}
