use crate::dhis2::Dhis2Error;
use crate::gee::GeeError;
use crate::import::MappingId;
use geedhis2_datatypes::dataset::{BandName, DatasetId};
use snafu::Snafu;
use strum::IntoStaticStr;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu, IntoStaticStr)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("{source}"), context(false))]
    DataType {
        source: geedhis2_datatypes::error::Error,
    },

    #[snafu(display("Earth Engine request failed: {source}"), context(false))]
    Gee { source: GeeError },

    #[snafu(display("DHIS2 request failed: {source}"), context(false))]
    Dhis2 { source: Dhis2Error },

    #[snafu(display("Config error: {source}"))]
    Config { source: config::ConfigError },

    ConfigLockFailed,

    MissingWorkingDirectory {
        source: std::io::Error,
    },

    MissingSettingsDirectory,

    #[snafu(display("Dataset `{id}` is not configured"))]
    DatasetNotFound { id: DatasetId },

    #[snafu(display("Dataset `{id}` is configured more than once"))]
    DuplicateDataset { id: DatasetId },

    #[snafu(display("Dataset `{dataset}` has no band `{band}`"))]
    UnknownBand { dataset: DatasetId, band: BandName },

    #[snafu(display("Mapping `{id}` does not exist"))]
    MappingNotFound { id: MappingId },

    #[snafu(display("Period `{period}` is out of the supported date range"))]
    PeriodOutOfRange { period: String },
}
