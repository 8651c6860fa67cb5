mod datasets;
mod import;

pub use datasets::{Datasets, list_datasets};
pub use import::{Import, run_import};
