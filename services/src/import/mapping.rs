use crate::dhis2::DataElementId;
use geedhis2_datatypes::dataset::{BandMapping, DatasetId};
use geedhis2_datatypes::string_identifier;
use serde::{Deserialize, Serialize};

string_identifier!(
    /// Identifier of a saved [`Mapping`]
    MappingId
);

/// A saved association of a dataset's bands with DHIS2 data elements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub id: MappingId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dataset_id: DatasetId,
    pub band_mapping: BandMapping<DataElementId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_deserializes_mappings() {
        let mapping: Mapping = serde_json::from_value(serde_json::json!({
            "id": "era5-temperature",
            "name": "ERA5 temperature",
            "datasetId": "ECMWF/ERA5/DAILY",
            "bandMapping": {
                "maximum_2m_air_temperature": "de_max",
                "minimum_2m_air_temperature": "de_min"
            }
        }))
        .unwrap();

        assert_eq!(mapping.description, None);
        assert_eq!(
            mapping
                .band_mapping
                .bands()
                .map(|band| band.as_str())
                .collect::<Vec<_>>(),
            vec!["maximum_2m_air_temperature", "minimum_2m_air_temperature"]
        );
    }

    #[test]
    fn it_rejects_empty_band_mappings() {
        assert!(
            serde_json::from_value::<Mapping>(serde_json::json!({
                "id": "empty",
                "name": "Empty",
                "datasetId": "ECMWF/ERA5/DAILY",
                "bandMapping": {}
            }))
            .is_err()
        );
    }
}
