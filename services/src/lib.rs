pub mod cli;
pub mod config;
pub mod datasets;
pub mod dhis2;
pub mod error;
pub mod gee;
pub mod import;
pub mod org_units;
pub mod util;
