//! Access to the DHIS2 Web API
//!
//! Reads organisation unit geometries from the metadata endpoint and writes data value sets.

use crate::error::Result;
use async_trait::async_trait;
use geedhis2_datatypes::string_identifier;

mod client;
mod data_values;
mod error;

pub use client::{Dhis2Client, Dhis2Credentials};
pub use data_values::{
    DataValue, DataValueSet, DataValueSetsPostResponse, ImportConflict, ImportCount, ImportStatus,
};
pub use error::Dhis2Error;

string_identifier!(
    /// Identifier of a DHIS2 organisation unit
    OrgUnitId
);

string_identifier!(
    /// Identifier of a DHIS2 data element
    DataElementId
);

string_identifier!(
    /// Identifier of a DHIS2 category option combination
    CategoryOptionComboId
);

/// Writes data value sets into the warehouse.
#[async_trait]
pub trait DataValueSetRepository: Send + Sync {
    async fn post_data_value_set(
        &self,
        data_value_set: &DataValueSet,
    ) -> Result<DataValueSetsPostResponse>;
}
