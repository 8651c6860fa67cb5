#![allow(clippy::print_stdout)] // okay in CLI

use crate::datasets::DatasetCatalog;
use clap::Parser;
use std::fmt::Write;

/// Lists the configured datasets and their bands
#[derive(Debug, Parser)]
pub struct Datasets {
    /// Outputs the catalog as JSON
    #[arg(long)]
    json: bool,
}

/// Outputs the dataset catalog to `STDOUT`
pub fn list_datasets(params: &Datasets) -> Result<(), anyhow::Error> {
    let catalog = DatasetCatalog::from_config()?;

    if params.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog.iter().collect::<Vec<_>>())?
        );
    } else {
        print!("{}", format_catalog(&catalog)?);
    }

    Ok(())
}

fn format_catalog(catalog: &DatasetCatalog) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    for dataset in catalog.iter() {
        write!(output, "{}: {}", dataset.id, dataset.name)?;
        if let Some(scale) = dataset.default_scale {
            write!(output, " (scale {scale} m)")?;
        }
        writeln!(output)?;

        for band in &dataset.bands {
            write!(output, "  {}", band.name)?;
            if let Some(units) = &band.units {
                write!(output, " [{units}]")?;
            }
            if let Some(description) = &band.description {
                write!(output, " {description}")?;
            }
            writeln!(output)?;
        }
    }

    Ok(output)
}
