//! The raster datasets that can be imported, with their bands
//!
//! The catalog is configured in the `datasets` table of the settings.

use crate::config::get_config;
use crate::error::{self, Result};
use geedhis2_datatypes::dataset::{BandMapping, BandName, DatasetId};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ensure};

const DATASETS_CONFIG_KEY: &str = "datasets";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandDescriptor {
    pub name: BandName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub id: DatasetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub bands: Vec<BandDescriptor>,
    /// Pixel size in meters used for queries of this dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_scale: Option<f64>,
}

impl DatasetDescriptor {
    pub fn band(&self, name: &BandName) -> Option<&BandDescriptor> {
        self.bands.iter().find(|band| band.name == *name)
    }

    /// Checks that the dataset provides every band of `band_mapping`.
    pub fn validate_band_mapping<T>(&self, band_mapping: &BandMapping<T>) -> Result<()> {
        for band in band_mapping.bands() {
            ensure!(
                self.band(band).is_some(),
                error::UnknownBand {
                    dataset: self.id.clone(),
                    band: band.clone(),
                }
            );
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetCatalog {
    datasets: IndexMap<DatasetId, DatasetDescriptor>,
}

impl DatasetCatalog {
    pub fn new(datasets: impl IntoIterator<Item = DatasetDescriptor>) -> Result<Self> {
        let mut catalog = IndexMap::new();

        for dataset in datasets {
            match catalog.entry(dataset.id.clone()) {
                Entry::Occupied(entry) => {
                    return error::DuplicateDataset {
                        id: entry.key().clone(),
                    }
                    .fail();
                }
                Entry::Vacant(entry) => {
                    entry.insert(dataset);
                }
            }
        }

        Ok(Self { datasets: catalog })
    }

    pub fn from_config() -> Result<Self> {
        Self::new(get_config::<Vec<DatasetDescriptor>>(DATASETS_CONFIG_KEY)?)
    }

    pub fn get(&self, id: &DatasetId) -> Result<&DatasetDescriptor> {
        self.datasets
            .get(id)
            .with_context(|| error::DatasetNotFound { id: id.clone() })
    }

    /// Iterates the datasets in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &DatasetDescriptor> {
        self.datasets.values()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn chirps() -> DatasetDescriptor {
        DatasetDescriptor {
            id: "UCSB-CHG/CHIRPS/DAILY".into(),
            name: "CHIRPS Daily".to_string(),
            description: None,
            bands: vec![BandDescriptor {
                name: "precipitation".into(),
                description: None,
                units: Some("mm/d".to_string()),
            }],
            default_scale: Some(5566.0),
        }
    }

    #[test]
    fn it_loads_the_configured_catalog() {
        let catalog = DatasetCatalog::from_config().unwrap();

        let era5 = catalog.get(&"ECMWF/ERA5/DAILY".into()).unwrap();

        assert!(era5.band(&"total_precipitation".into()).is_some());
        assert!(era5.default_scale.is_some());
    }

    #[test]
    fn it_fails_for_unknown_datasets() {
        let catalog = DatasetCatalog::new([chirps()]).unwrap();

        assert!(matches!(
            catalog.get(&"COPERNICUS/S2".into()),
            Err(Error::DatasetNotFound { id }) if id == DatasetId::from("COPERNICUS/S2")
        ));
    }

    #[test]
    fn it_rejects_duplicate_datasets() {
        assert!(matches!(
            DatasetCatalog::new([chirps(), chirps()]),
            Err(Error::DuplicateDataset { .. })
        ));
    }

    #[test]
    fn it_validates_band_mappings() {
        let dataset = chirps();

        dataset
            .validate_band_mapping(&BandMapping::new([("precipitation", "de1")]).unwrap())
            .unwrap();

        let error = dataset
            .validate_band_mapping(
                &BandMapping::new([("precipitation", "de1"), ("temperature", "de2")]).unwrap(),
            )
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Dataset `UCSB-CHG/CHIRPS/DAILY` has no band `temperature`"
        );
    }
}
