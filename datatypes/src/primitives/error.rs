use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum PrimitivesError {
    #[snafu(display("Geometry must not be empty"))]
    UnallowedEmpty,
}
