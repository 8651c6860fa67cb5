use super::error::{self, GeeError};
use chrono::{DateTime, NaiveDate};
use geedhis2_datatypes::dataset::{BandName, Observation};
use indexmap::IndexMap;
use serde_json::Value;
use snafu::OptionExt;

const TIME_COLUMN: &str = "time";
const NON_BAND_COLUMNS: [&str; 4] = ["id", "longitude", "latitude", TIME_COLUMN];

/// Reshapes an Earth Engine `getRegion` table into observations.
///
/// The first row is the header `["id", "longitude", "latitude", "time", <band>...]`, every other
/// row holds one pixel of one image, with `time` in epoch milliseconds. `null` cells are gaps.
/// Pixels of the same day are averaged, so there is at most one observation per day and band.
/// Observations are ordered by first appearance of their day, then by header order of their band.
pub(super) fn observations_from_region_table(
    table: Vec<Vec<Value>>,
) -> Result<Vec<Observation>, GeeError> {
    let mut rows = table.into_iter();

    let header = rows.next().context(error::MalformedRegionTable {
        reason: "missing header row",
    })?;
    let header = parse_header(&header)?;

    let mut sums: IndexMap<NaiveDate, Vec<Mean>> = IndexMap::new();

    for (row_index, row) in rows.enumerate() {
        if row.len() != header.width {
            return error::MalformedRegionTable {
                reason: format!(
                    "row {} has {} cells instead of {}",
                    row_index + 1,
                    row.len(),
                    header.width
                ),
            }
            .fail();
        }

        let date = parse_date(&row[header.time_column])?;
        let means = sums
            .entry(date)
            .or_insert_with(|| vec![Mean::default(); header.bands.len()]);

        for (mean, (_, column)) in means.iter_mut().zip(&header.bands) {
            match &row[*column] {
                Value::Null => {}
                cell => mean.add(cell.as_f64().with_context(|| error::MalformedRegionTable {
                    reason: format!("non-numeric value `{cell}`"),
                })?),
            }
        }
    }

    Ok(sums
        .into_iter()
        .flat_map(|(date, means)| {
            header
                .bands
                .iter()
                .zip(means)
                .filter_map(move |((band, _), mean)| {
                    mean.value()
                        .map(|value| Observation::new(date, band.clone(), value))
                })
        })
        .collect())
}

struct Header {
    width: usize,
    time_column: usize,
    bands: Vec<(BandName, usize)>,
}

fn parse_header(header: &[Value]) -> Result<Header, GeeError> {
    let names = header
        .iter()
        .map(|cell| {
            cell.as_str().with_context(|| error::MalformedRegionTable {
                reason: format!("header cell `{cell}` is not a string"),
            })
        })
        .collect::<Result<Vec<&str>, GeeError>>()?;

    let time_column = names
        .iter()
        .position(|name| *name == TIME_COLUMN)
        .context(error::MalformedRegionTable {
            reason: "header lacks a `time` column",
        })?;

    let bands = names
        .iter()
        .enumerate()
        .filter(|(_, name)| !NON_BAND_COLUMNS.contains(*name))
        .map(|(column, name)| (BandName::from(*name), column))
        .collect();

    Ok(Header {
        width: names.len(),
        time_column,
        bands,
    })
}

fn parse_date(cell: &Value) -> Result<NaiveDate, GeeError> {
    cell.as_i64()
        .or_else(|| cell.as_f64().map(|millis| millis as i64))
        .and_then(DateTime::from_timestamp_millis)
        .map(|time| time.date_naive())
        .with_context(|| error::MalformedRegionTable {
            reason: format!("invalid time `{cell}`"),
        })
}

#[derive(Clone, Copy, Debug, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}
