use super::error::{self, GeeError};
use super::region::observations_from_region_table;
use super::{GeeDataRepository, RasterQuery};
use crate::config;
use crate::util::http::error_for_status;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use geedhis2_datatypes::dataset::{BandName, DatasetId, Observation};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use snafu::OptionExt;
use tracing::debug;
use url::Url;

type Result<T, E = GeeError> = std::result::Result<T, E>;

const GET_REGION_ENDPOINT: &str = "getRegion";

/// Body of a `getRegion` request.
///
/// `end` is exclusive, as for Earth Engine's `filterDate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionRequest<'a> {
    dataset_id: &'a DatasetId,
    bands: &'a [BandName],
    geometry: geojson::Geometry,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<f64>,
}

impl<'a> RegionRequest<'a> {
    fn try_from_query(query: &'a RasterQuery) -> Result<Self> {
        let end = query.interval.end();

        Ok(Self {
            dataset_id: &query.dataset_id,
            bands: &query.bands,
            geometry: geojson::Geometry::from(&query.geometry),
            start: query.interval.start(),
            end: end
                .checked_add_days(Days::new(1))
                .context(error::IntervalEndOutOfRange { date: end })?,
            scale: query.scale,
        })
    }
}

/// Fetches raster values from a service that evaluates `getRegion` requests against Earth Engine.
#[derive(Clone, Debug)]
pub struct GeeHttpRepository {
    api_endpoint: Url,
    access_token: Option<String>,
    client: Client,
}

impl GeeHttpRepository {
    pub fn new(api_endpoint: Url, access_token: Option<String>) -> Self {
        Self {
            api_endpoint,
            access_token,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &config::Gee) -> Self {
        Self::new(config.api_endpoint.clone(), config.access_token.clone())
    }

    pub async fn get_region(&self, query: &RasterQuery) -> Result<Vec<Observation>> {
        let url = self.api_endpoint.join(GET_REGION_ENDPOINT)?;

        debug!(
            "Calling {url} for {} at a {}",
            query.dataset_id,
            query.geometry.type_name()
        );

        let mut request = self
            .client
            .post(url)
            .json(&RegionRequest::try_from_query(query)?);

        if let Some(access_token) = &self.access_token {
            request = request.bearer_auth(access_token);
        }

        let response = error_for_status(request.send().await?, |status, body| {
            error::UnexpectedStatus { status, body }.build()
        })
        .await?;
        let table: Vec<Vec<Value>> = response.json().await?;

        observations_from_region_table(table)
    }
}

#[async_trait]
impl GeeDataRepository for GeeHttpRepository {
    async fn get_data(&self, query: &RasterQuery) -> crate::error::Result<Vec<Observation>> {
        Ok(self.get_region(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geedhis2_datatypes::primitives::{Coordinate2D, Geometry, Interval};
    use httptest::{Expectation, all_of, matchers, matchers::request, responders};
    use pretty_assertions::assert_eq;

    fn query() -> RasterQuery {
        RasterQuery {
            dataset_id: "ECMWF/ERA5/DAILY".into(),
            bands: vec!["mean_2m_air_temperature".into()],
            geometry: Geometry::point(Coordinate2D::new(10.0, 20.0)),
            interval: Interval::daily(
                NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
            )
            .unwrap(),
            scale: Some(1000.0),
        }
    }

    #[tokio::test]
    async fn it_requests_regions() {
        let mock_server = httptest::Server::run();

        mock_server.expect(
            Expectation::matching(all_of![
                request::method("POST"),
                request::path("/api/getRegion"),
                request::headers(matchers::contains(("authorization", "Bearer secret"))),
                request::body(matchers::json_decoded(matchers::eq(serde_json::json!({
                    "datasetId": "ECMWF/ERA5/DAILY",
                    "bands": ["mean_2m_air_temperature"],
                    "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
                    "start": "2020-01-05",
                    "end": "2020-01-07",
                    "scale": 1000.0
                })))),
            ])
            .respond_with(responders::json_encoded(serde_json::json!([
                ["id", "longitude", "latitude", "time", "mean_2m_air_temperature"],
                ["20200105", 10.0, 20.0, 1_578_182_400_000_i64, 276.5],
                ["20200106", 10.0, 20.0, 1_578_268_800_000_i64, 277.25]
            ]))),
        );

        let repository = GeeHttpRepository::new(
            Url::parse(&mock_server.url_str("/api/")).unwrap(),
            Some("secret".to_string()),
        );

        let observations = repository.get_data(&query()).await.unwrap();

        assert_eq!(
            observations,
            vec![
                Observation::new(
                    NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
                    "mean_2m_air_temperature",
                    276.5
                ),
                Observation::new(
                    NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
                    "mean_2m_air_temperature",
                    277.25
                ),
            ]
        );
    }

    #[tokio::test]
    async fn it_fails_on_error_status() {
        let mock_server = httptest::Server::run();

        mock_server.expect(
            Expectation::matching(request::path("/api/getRegion"))
                .respond_with(responders::status_code(400).body("Image.load: unknown asset")),
        );

        let repository =
            GeeHttpRepository::new(Url::parse(&mock_server.url_str("/api/")).unwrap(), None);

        let error = repository.get_region(&query()).await.unwrap_err();

        assert!(matches!(
            error,
            GeeError::UnexpectedStatus { status, .. } if status == reqwest::StatusCode::BAD_REQUEST
        ));
    }

    #[tokio::test]
    async fn it_fails_on_malformed_tables() {
        let mock_server = httptest::Server::run();

        mock_server.expect(
            Expectation::matching(request::path("/api/getRegion"))
                .respond_with(responders::json_encoded(serde_json::json!([["id", "value"]]))),
        );

        let repository =
            GeeHttpRepository::new(Url::parse(&mock_server.url_str("/api/")).unwrap(), None);

        let error = repository.get_data(&query()).await.unwrap_err();

        assert!(matches!(
            error,
            crate::error::Error::Gee {
                source: GeeError::MalformedRegionTable { .. }
            }
        ));
    }
}
