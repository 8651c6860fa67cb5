use serde::Deserialize;
use serde::de::Error;
use url::Url;

/// Parse a base url and make sure it ends with a slash, so that relative paths can be joined.
pub fn deserialize_base_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let url = Url::deserialize(deserializer)?;

    if url.cannot_be_a_base() {
        return Err(D::Error::custom(format!("`{url}` cannot be a base url")));
    }

    Ok(canonicalize_base_url(url))
}

/// Canonicalizes a URL by ensuring it ends with a slash
pub fn canonicalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Endpoint {
        #[serde(deserialize_with = "deserialize_base_url")]
        url: Url,
    }

    #[test]
    fn it_appends_a_trailing_slash() {
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"url": "https://play.dhis2.org/2.30"}"#).unwrap();

        assert_eq!(endpoint.url.as_str(), "https://play.dhis2.org/2.30/");
        assert_eq!(
            endpoint.url.join("api/metadata").unwrap().as_str(),
            "https://play.dhis2.org/2.30/api/metadata"
        );
    }

    #[test]
    fn it_keeps_a_trailing_slash() {
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"url": "http://localhost:8080/"}"#).unwrap();

        assert_eq!(endpoint.url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn it_rejects_non_base_urls() {
        assert!(serde_json::from_str::<Endpoint>(r#"{"url": "mailto:admin@localhost"}"#).is_err());
        assert!(serde_json::from_str::<Endpoint>(r#"{"url": "not a url"}"#).is_err());
    }
}
