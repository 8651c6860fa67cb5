use super::mapper::{MappedDataValues, to_data_values};
use super::ImportWarning;
use crate::dhis2::{
    DataElementId, DataValueSet, DataValueSetRepository, DataValueSetsPostResponse,
};
use crate::error::Result;
use crate::gee::{GeeDataRepository, RasterQuery};
use crate::org_units::{OrgUnit, OrgUnitRepository, ResolvedGeometries, resolve_geometries};
use geedhis2_datatypes::dataset::{BandMapping, DatasetId};
use geedhis2_datatypes::primitives::Interval;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug)]
pub struct GetDataValueSetOptions<'a> {
    pub dataset_id: &'a DatasetId,
    pub mapping: &'a BandMapping<DataElementId>,
    pub org_units: &'a [OrgUnit],
    pub interval: Interval,
    pub scale: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataValueSetOutcome {
    pub data_value_set: DataValueSet,
    pub warnings: Vec<ImportWarning>,
}

/// Builds data value sets from Earth Engine data and writes them to DHIS2.
///
/// `D` is the DHIS2 side, `G` the Earth Engine side.
#[derive(Debug)]
pub struct GeeDhis2<D, G> {
    dhis2: D,
    gee: G,
}

impl<D, G> GeeDhis2<D, G>
where
    D: OrgUnitRepository + DataValueSetRepository,
    G: GeeDataRepository,
{
    pub fn new(dhis2: D, gee: G) -> Self {
        Self { dhis2, gee }
    }

    /// Queries the dataset for every org unit with a geometry and maps the values.
    ///
    /// Org units are queried one after another in input order. The first failing query aborts
    /// the whole set.
    pub async fn get_data_value_set(
        &self,
        options: &GetDataValueSetOptions<'_>,
    ) -> Result<DataValueSetOutcome> {
        let ResolvedGeometries {
            geometries,
            mut warnings,
        } = resolve_geometries(&self.dhis2, options.org_units).await?;

        let mut data_values = Vec::new();

        for (org_unit_id, geometry) in geometries {
            let Some(geometry) = geometry else {
                continue;
            };

            let query = RasterQuery::for_band_mapping(
                options.dataset_id.clone(),
                options.mapping,
                geometry,
                options.interval,
                options.scale,
            );

            let observations = self.gee.get_data(&query).await?;

            debug!(
                "Received {} observations of {} for org unit `{org_unit_id}`",
                observations.len(),
                options.dataset_id
            );

            let MappedDataValues {
                data_values: org_unit_data_values,
                warnings: org_unit_warnings,
            } = to_data_values(&org_unit_id, &observations, options.mapping);

            data_values.extend(org_unit_data_values);
            warnings.extend(org_unit_warnings);
        }

        info!(
            "Built {} data values of {} for {} org units",
            data_values.len(),
            options.dataset_id,
            options.org_units.len()
        );

        Ok(DataValueSetOutcome {
            data_value_set: DataValueSet::from(data_values),
            warnings,
        })
    }

    pub async fn post_data_value_set(
        &self,
        data_value_set: &DataValueSet,
    ) -> Result<DataValueSetsPostResponse> {
        self.dhis2.post_data_value_set(data_value_set).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dhis2::{DataValue, ImportCount, ImportStatus, OrgUnitId};
    use crate::error::Error;
    use crate::gee::GeeError;
    use crate::org_units::FeatureType;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use geedhis2_datatypes::dataset::{BandName, Observation};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MockDhis2 {
        pub org_units: Vec<OrgUnit>,
        pub posted: Mutex<Vec<DataValueSet>>,
    }

    #[async_trait]
    impl OrgUnitRepository for MockDhis2 {
        async fn get_org_units_with_geometry(&self, ids: &[OrgUnitId]) -> Result<Vec<OrgUnit>> {
            Ok(self
                .org_units
                .iter()
                .filter(|org_unit| ids.contains(&org_unit.id))
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl DataValueSetRepository for MockDhis2 {
        async fn post_data_value_set(
            &self,
            data_value_set: &DataValueSet,
        ) -> Result<DataValueSetsPostResponse> {
            self.posted.lock().unwrap().push(data_value_set.clone());

            Ok(DataValueSetsPostResponse {
                status: ImportStatus::Success,
                description: None,
                import_count: ImportCount {
                    imported: data_value_set.len() as u32,
                    ..Default::default()
                },
                conflicts: vec![],
            })
        }
    }

    /// Answers every query with one `temp` and one `humidity` value per day, fails on the
    /// `fail_on`th call.
    #[derive(Default)]
    pub(crate) struct MockGee {
        pub queries: Mutex<Vec<RasterQuery>>,
        pub fail_on: Option<usize>,
    }

    impl MockGee {
        pub fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GeeDataRepository for MockGee {
        async fn get_data(&self, query: &RasterQuery) -> Result<Vec<Observation>> {
            let call = {
                let mut queries = self.queries.lock().unwrap();
                queries.push(query.clone());
                queries.len()
            };

            if self.fail_on == Some(call) {
                return Err(Error::Gee {
                    source: GeeError::MalformedRegionTable {
                        reason: "broken".to_string(),
                    },
                });
            }

            Ok(query
                .interval
                .start()
                .iter_days()
                .take_while(|date| query.interval.contains(*date))
                .flat_map(|date| {
                    [
                        Observation::new(date, "temp", 3.5),
                        Observation::new(date, "humidity", 9.0),
                    ]
                })
                .collect())
        }
    }

    impl GeeDhis2<MockDhis2, MockGee> {
        pub(crate) fn gee_calls(&self) -> usize {
            self.gee.calls()
        }

        pub(crate) fn gee_scales(&self) -> Vec<Option<f64>> {
            self.gee
                .queries
                .lock()
                .unwrap()
                .iter()
                .map(|query| query.scale)
                .collect()
        }

        pub(crate) fn posted(&self) -> Vec<DataValueSet> {
            self.dhis2.posted.lock().unwrap().clone()
        }
    }

    pub(crate) fn point(id: &str) -> OrgUnit {
        OrgUnit {
            id: id.into(),
            feature_type: Some(FeatureType::Point),
            coordinates: Some("[10,20]".to_string()),
        }
    }

    fn interval() -> Interval {
        Interval::daily(
            NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
        )
        .unwrap()
    }

    fn band_mapping() -> BandMapping<DataElementId> {
        BandMapping::new([("temp", DataElementId::from("de1"))]).unwrap()
    }

    #[tokio::test]
    async fn it_queries_every_org_unit_with_geometry() {
        let gee_dhis2 = GeeDhis2::new(MockDhis2::default(), MockGee::default());
        let org_units = ["ou1", "ou2", "ou3"].map(point);

        let outcome = gee_dhis2
            .get_data_value_set(&GetDataValueSetOptions {
                dataset_id: &"ECMWF/ERA5/DAILY".into(),
                mapping: &band_mapping(),
                org_units: &org_units,
                interval: interval(),
                scale: Some(1000.0),
            })
            .await
            .unwrap();

        assert_eq!(gee_dhis2.gee.calls(), 3);
        // 2 days of `temp` per org unit, `humidity` is unmapped
        assert_eq!(outcome.data_value_set.len(), 6);
        assert_eq!(outcome.warnings.len(), 6);
        assert_eq!(
            outcome.data_value_set.data_values[0],
            DataValue {
                data_element: "de1".into(),
                value: "3.500000000000000000".to_string(),
                org_unit: "ou1".into(),
                period: "20200105".to_string(),
                attribute_option_combo: None,
                category_option_combo: None,
            }
        );
        assert_eq!(
            outcome
                .data_value_set
                .data_values
                .iter()
                .map(|data_value| data_value.org_unit.as_str())
                .collect::<Vec<_>>(),
            vec!["ou1", "ou1", "ou2", "ou2", "ou3", "ou3"]
        );

        let queries = gee_dhis2.gee.queries.lock().unwrap();
        assert_eq!(queries[0].bands, vec![BandName::from("temp")]);
        assert_eq!(queries[0].scale, Some(1000.0));
    }

    #[tokio::test]
    async fn it_skips_org_units_without_geometry() {
        let dhis2 = MockDhis2 {
            org_units: vec![OrgUnit {
                id: "ou2".into(),
                feature_type: Some(FeatureType::Symbol),
                coordinates: Some("[1,2]".to_string()),
            }],
            ..Default::default()
        };
        let gee_dhis2 = GeeDhis2::new(dhis2, MockGee::default());
        let org_units = [
            point("ou1"),
            OrgUnit::new("ou2"),
            OrgUnit::new("unknown"),
            OrgUnit {
                feature_type: Some(FeatureType::None),
                ..OrgUnit::new("ou3")
            },
        ];

        let outcome = gee_dhis2
            .get_data_value_set(&GetDataValueSetOptions {
                dataset_id: &"ECMWF/ERA5/DAILY".into(),
                mapping: &band_mapping(),
                org_units: &org_units,
                interval: interval(),
                scale: None,
            })
            .await
            .unwrap();

        assert_eq!(gee_dhis2.gee.calls(), 1);
        assert_eq!(outcome.data_value_set.len(), 2);
    }

    #[tokio::test]
    async fn it_aborts_on_the_first_failing_query() {
        let gee = MockGee {
            fail_on: Some(3),
            ..Default::default()
        };
        let gee_dhis2 = GeeDhis2::new(MockDhis2::default(), gee);
        let org_units = ["ou1", "ou2", "ou3", "ou4", "ou5"].map(point);

        let result = gee_dhis2
            .get_data_value_set(&GetDataValueSetOptions {
                dataset_id: &"ECMWF/ERA5/DAILY".into(),
                mapping: &band_mapping(),
                org_units: &org_units,
                interval: interval(),
                scale: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(Error::Gee {
                source: GeeError::MalformedRegionTable { .. }
            })
        ));
        assert_eq!(gee_dhis2.gee.calls(), 3);
    }

    #[tokio::test]
    async fn it_posts_data_value_sets() {
        let gee_dhis2 = GeeDhis2::new(MockDhis2::default(), MockGee::default());
        let data_value_set = DataValueSet::from(vec![DataValue {
            data_element: "de1".into(),
            value: "1.000000000000000000".to_string(),
            org_unit: "ou1".into(),
            period: "20200105".to_string(),
            attribute_option_combo: None,
            category_option_combo: None,
        }]);

        let response = gee_dhis2
            .post_data_value_set(&data_value_set)
            .await
            .unwrap();

        assert_eq!(response.import_count.imported, 1);
        assert_eq!(
            *gee_dhis2.dhis2.posted.lock().unwrap(),
            vec![data_value_set]
        );
    }
}
