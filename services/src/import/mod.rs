//! Building data value sets from Earth Engine data and importing them into DHIS2

mod gee_dhis2;
mod mapper;
mod mapping;
mod period;
mod rule;
mod runner;
mod warning;

pub use gee_dhis2::{DataValueSetOutcome, GeeDhis2, GetDataValueSetOptions};
pub use mapper::{MappedDataValues, to_data_values};
pub use mapping::{Mapping, MappingId};
pub use period::PeriodOption;
pub use rule::{DEFAULT_IMPORT_RULE_ID, ImportRule, ImportRuleId};
pub use runner::{ImportOutcome, ImportRunner, ImportSummary, MappingImportSummary};
pub use warning::ImportWarning;
