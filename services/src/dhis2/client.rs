use super::data_values::PostResponseBody;
use super::error::{self, Dhis2Error};
use super::{DataValueSet, DataValueSetRepository, DataValueSetsPostResponse, OrgUnitId};
use crate::config;
use crate::util::http::error_for_status;
use crate::org_units::{OrgUnit, OrgUnitRepository};
use async_trait::async_trait;
use itertools::Itertools;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

type Result<T, E = Dhis2Error> = std::result::Result<T, E>;

const METADATA_ENDPOINT: &str = "api/metadata";
const DATA_VALUE_SETS_ENDPOINT: &str = "api/dataValueSets";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dhis2Credentials {
    pub username: String,
    pub password: String,
}

/// A client for the parts of the DHIS2 Web API the import needs.
#[derive(Clone, Debug)]
pub struct Dhis2Client {
    base_url: Url,
    credentials: Option<Dhis2Credentials>,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataResponse {
    #[serde(default)]
    organisation_units: Vec<OrgUnit>,
}

impl Dhis2Client {
    /// `base_url` is the instance root, the API paths are joined onto it.
    pub fn new(base_url: Url, credentials: Option<Dhis2Credentials>) -> Self {
        Self {
            base_url,
            credentials,
            client: Client::new(),
        }
    }

    pub fn from_config(config: &config::Dhis2) -> Self {
        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some(Dhis2Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Self::new(config.base_url.clone(), credentials)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);

        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    /// Fetches `id`, `featureType` and `coordinates` of the given organisation units in one request.
    ///
    /// Unknown ids are not part of the result.
    pub async fn get_org_units_geometry(&self, ids: &[OrgUnitId]) -> Result<Vec<OrgUnit>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // the legacy `featureType` and `coordinates` fields are not part of the typed `geometry` API
        let mut url = self.base_url.join(METADATA_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("organisationUnits:fields", "id,featureType,coordinates")
            .append_pair(
                "organisationUnits:filter",
                &format!("id:in:[{}]", ids.iter().join(",")),
            );

        debug!("Calling {url}");

        let response = error_for_status(
            self.request(Method::GET, url).send().await?,
            unexpected_status,
        )
        .await?;
        let metadata: MetadataResponse = response.json().await?;

        Ok(metadata.organisation_units)
    }

    pub async fn post_data_value_set(
        &self,
        data_value_set: &DataValueSet,
    ) -> Result<DataValueSetsPostResponse> {
        let url = self.base_url.join(DATA_VALUE_SETS_ENDPOINT)?;

        debug!(
            "Posting {} data values to {url}",
            data_value_set.data_values.len()
        );

        let response = error_for_status(
            self.request(Method::POST, url)
                .json(data_value_set)
                .send()
                .await?,
            unexpected_status,
        )
        .await?;
        let body: PostResponseBody = response.json().await?;

        Ok(body.into_import_summary())
    }
}

fn unexpected_status(status: StatusCode, body: String) -> Dhis2Error {
    error::UnexpectedStatus { status, body }.build()
}

#[async_trait]
impl OrgUnitRepository for Dhis2Client {
    async fn get_org_units_with_geometry(
        &self,
        ids: &[OrgUnitId],
    ) -> crate::error::Result<Vec<OrgUnit>> {
        Ok(self.get_org_units_geometry(ids).await?)
    }
}

#[async_trait]
impl DataValueSetRepository for Dhis2Client {
    async fn post_data_value_set(
        &self,
        data_value_set: &DataValueSet,
    ) -> crate::error::Result<DataValueSetsPostResponse> {
        Ok(Dhis2Client::post_data_value_set(self, data_value_set).await?)
    }
}
