use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), context(suffix(false)))]
pub enum Dhis2Error {
    #[snafu(display("Unable to parse URL: {source}"), context(false))]
    InvalidUrl { source: url::ParseError },

    #[snafu(display("Unable to make web request: {source}"), context(false))]
    InvalidRequest { source: reqwest::Error },

    #[snafu(display("DHIS2 responded with status {status}: {body}"))]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}
