use clap::{Parser, Subcommand};
use geedhis2_services::cli::{Datasets, Import, list_datasets, run_import};
use geedhis2_services::config::{self, get_config_element};
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

/// CLI for importing Google Earth Engine data into DHIS2
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Runs an import rule
    Import(Import),

    /// Lists the configured datasets
    Datasets(Datasets),
}

impl Commands {
    async fn execute(self) -> Result<(), anyhow::Error> {
        match self {
            Commands::Import(params) => run_import(params).await,
            Commands::Datasets(params) => list_datasets(&params),
        }
    }
}

fn init_logging() -> Result<(), anyhow::Error> {
    let logging_config: config::Logging = get_config_element()?;

    let console_filter = EnvFilter::try_new(&logging_config.log_spec)?;

    // logs go to `STDERR` so that `STDOUT` only carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    Ok(())
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    if let Err(err) = cli.command.execute().await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
