use crate::error::{self, Error};
use crate::string_identifier;
use crate::util::Result;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use snafu::ensure;
use std::fmt;
use std::marker::PhantomData;

string_identifier!(
    /// Identifier of a raster dataset (an image collection) of the Earth observation service
    DatasetId
);

string_identifier!(
    /// Name of a band of a raster dataset, e.g. `temperature_2m`
    BandName
);

/// A single dated value of one band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub band: BandName,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, band: impl Into<BandName>, value: f64) -> Self {
        Self {
            date,
            band: band.into(),
            value,
        }
    }
}

/// An ordered mapping from bands to target fields.
///
/// Bands are unique and there is at least one band. Iteration follows insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BandMapping<T> {
    fields: IndexMap<BandName, T>,
}

impl<T> BandMapping<T> {
    pub fn new<I, B>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (B, T)>,
        B: Into<BandName>,
    {
        let mut fields = IndexMap::new();

        for (band, field) in pairs {
            let band = band.into();
            ensure!(
                !fields.contains_key(&band),
                error::DuplicateBand { band }
            );
            fields.insert(band, field);
        }

        ensure!(!fields.is_empty(), error::EmptyBandMapping);

        Ok(Self { fields })
    }

    pub fn get(&self, band: &BandName) -> Option<&T> {
        self.fields.get(band)
    }

    /// The mapped bands in insertion order
    pub fn bands(&self) -> impl Iterator<Item = &BandName> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BandName, &T)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de, T> Deserialize<'de> for BandMapping<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BandMappingVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for BandMappingVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = BandMapping<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-empty map from band names to fields")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((band, field)) = access.next_entry::<BandName, T>()? {
                    pairs.push((band, field));
                }

                BandMapping::new(pairs).map_err(|error: Error| serde::de::Error::custom(error))
            }
        }

        deserializer.deserialize_map(BandMappingVisitor(PhantomData))
    }
}
