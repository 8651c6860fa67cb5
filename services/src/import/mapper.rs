use super::ImportWarning;
use crate::dhis2::{DataElementId, DataValue, OrgUnitId};
use geedhis2_datatypes::dataset::{BandMapping, Observation};
use geedhis2_datatypes::primitives::TimeGranularity;

/// Number of fractional digits of a data value
const VALUE_PRECISION: usize = 18;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedDataValues {
    pub data_values: Vec<DataValue>,
    pub warnings: Vec<ImportWarning>,
}

/// Converts the observations of one org unit into daily data values, in observation order.
///
/// Observations of bands missing from `band_mapping` and non-finite values are dropped with a
/// warning. There is neither deduplication nor aggregation.
pub fn to_data_values(
    org_unit_id: &OrgUnitId,
    observations: &[Observation],
    band_mapping: &BandMapping<DataElementId>,
) -> MappedDataValues {
    let mut mapped = MappedDataValues {
        data_values: Vec::with_capacity(observations.len()),
        warnings: Vec::new(),
    };

    for observation in observations {
        let Some(data_element) = band_mapping.get(&observation.band) else {
            ImportWarning::UnmappedBand {
                org_unit: org_unit_id.clone(),
                band: observation.band.clone(),
            }
            .record(&mut mapped.warnings);
            continue;
        };

        if !observation.value.is_finite() {
            ImportWarning::NonFiniteValue {
                org_unit: org_unit_id.clone(),
                band: observation.band.clone(),
                date: observation.date,
            }
            .record(&mut mapped.warnings);
            continue;
        }

        mapped.data_values.push(DataValue {
            data_element: data_element.clone(),
            value: format_value(observation.value),
            org_unit: org_unit_id.clone(),
            period: TimeGranularity::Daily.period_key(observation.date),
            attribute_option_combo: None,
            category_option_combo: None,
        });
    }

    mapped
}

/// Formats `value` with a fixed number of fractional digits, writing negative zero as `0`
fn format_value(value: f64) -> String {
    // `-0.0 + 0.0` is `+0.0`
    format!("{:.*}", VALUE_PRECISION, value + 0.0)
}
