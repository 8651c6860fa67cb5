use chrono::NaiveDate;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), context(suffix(false)))]
pub enum GeeError {
    #[snafu(display("Unable to parse URL: {source}"), context(false))]
    InvalidUrl { source: url::ParseError },

    #[snafu(display("Unable to make web request: {source}"), context(false))]
    InvalidRequest { source: reqwest::Error },

    #[snafu(display("Earth Engine responded with status {status}: {body}"))]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[snafu(display("Malformed region table: {reason}"))]
    MalformedRegionTable { reason: String },

    #[snafu(display("Interval end {date} is out of the supported date range"))]
    IntervalEndOutOfRange { date: NaiveDate },
}
