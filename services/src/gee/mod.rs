//! Raster data of the Google Earth Engine catalog
//!
//! Raster computation happens in Earth Engine, this module only asks for the values of a region.

use crate::error::Result;
use async_trait::async_trait;
use geedhis2_datatypes::dataset::{BandMapping, BandName, DatasetId, Observation};
use geedhis2_datatypes::primitives::{Geometry, Interval};

mod client;
mod error;
mod region;

pub use client::GeeHttpRepository;
pub use error::GeeError;

/// A request for the band values of a dataset over a geometry and interval.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterQuery {
    pub dataset_id: DatasetId,
    /// Unique and non-empty
    pub bands: Vec<BandName>,
    pub geometry: Geometry,
    pub interval: Interval,
    /// Nominal pixel size in meters, the dataset's native scale if absent
    pub scale: Option<f64>,
}

impl RasterQuery {
    /// Creates a query for exactly the bands of `band_mapping`, in mapping order.
    pub fn for_band_mapping<T>(
        dataset_id: DatasetId,
        band_mapping: &BandMapping<T>,
        geometry: Geometry,
        interval: Interval,
        scale: Option<f64>,
    ) -> Self {
        Self {
            dataset_id,
            bands: band_mapping.bands().cloned().collect(),
            geometry,
            interval,
            scale,
        }
    }
}

/// Delivers dated band values for a [`RasterQuery`].
#[async_trait]
pub trait GeeDataRepository: Send + Sync {
    /// Returns at most one observation per day and band. Days without data are left out.
    async fn get_data(&self, query: &RasterQuery) -> Result<Vec<Observation>>;
}
