use crate::dataset::BandName;
use crate::primitives::PrimitivesError;
use chrono::NaiveDate;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("Start `{}` must not be after end `{}`", start, end))]
    IntervalEndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[snafu(display("Band `{}` is mapped more than once", band))]
    DuplicateBand { band: BandName },

    #[snafu(display("A band mapping needs at least one band"))]
    EmptyBandMapping,

    #[snafu(display("Invalid primitive: {}", source))]
    Primitives { source: PrimitivesError },
}

impl From<PrimitivesError> for Error {
    fn from(source: PrimitivesError) -> Self {
        Error::Primitives { source }
    }
}
