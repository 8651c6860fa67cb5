#![allow(clippy::print_stdout)] // okay in CLI

use crate::config::{self, get_config_element};
use crate::datasets::DatasetCatalog;
use crate::dhis2::{DataValueSetRepository, Dhis2Client};
use crate::gee::{GeeDataRepository, GeeHttpRepository};
use crate::import::{GeeDhis2, ImportOutcome, ImportRule, ImportRunner, Mapping};
use crate::org_units::OrgUnitRepository;
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Runs an import rule against the configured DHIS2 instance
#[derive(Debug, Parser)]
pub struct Import {
    /// JSON file with the import rule, its last execution is updated after the import
    #[arg(long)]
    rule: PathBuf,

    /// JSON file with the list of saved mappings
    #[arg(long)]
    mappings: PathBuf,

    /// Builds the data value sets without posting them
    #[arg(long)]
    dry_run: bool,

    /// Writes all built data values as one data value set to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Runs the import and prints its summary as JSON to `STDOUT`
pub async fn run_import(params: Import) -> Result<(), anyhow::Error> {
    let catalog = DatasetCatalog::from_config()?;
    let dhis2 = Dhis2Client::from_config(&get_config_element::<config::Dhis2>()?);
    let gee = GeeHttpRepository::from_config(&get_config_element::<config::Gee>()?);

    let outcome = import(&params, &GeeDhis2::new(dhis2, gee), &catalog, Utc::now()).await?;

    println!("{}", serde_json::to_string_pretty(&outcome.summary)?);

    Ok(())
}

async fn import<D, G>(
    params: &Import,
    gee_dhis2: &GeeDhis2<D, G>,
    catalog: &DatasetCatalog,
    now: DateTime<Utc>,
) -> Result<ImportOutcome, anyhow::Error>
where
    D: OrgUnitRepository + DataValueSetRepository,
    G: GeeDataRepository,
{
    let rule: ImportRule = read_json(&params.rule).await?;
    let mappings: Vec<Mapping> = read_json(&params.mappings).await?;

    let outcome = ImportRunner::new(gee_dhis2, catalog)
        .run(&rule, &mappings, now, params.dry_run)
        .await?;

    if let Some(output) = &params.output {
        write_json(output, &outcome.summary.data_value_set()).await?;
    }

    if !params.dry_run {
        write_json(&params.rule, &outcome.rule).await?;
    }

    Ok(outcome)
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("unable to read `{}`", path.display()))?;

    serde_json::from_slice(&bytes).with_context(|| format!("unable to parse `{}`", path.display()))
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), anyhow::Error> {
    tokio::fs::write(path, serde_json::to_vec_pretty(value)?)
        .await
        .with_context(|| format!("unable to write `{}`", path.display()))
}
