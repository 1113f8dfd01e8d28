//! Amazon Location Service place index backend
//!
//! Calls the Places v0 REST API authenticated with an API key:
//! - `POST /places/v0/indexes/{index}/search/text`
//! - `POST /places/v0/indexes/{index}/search/suggestions`
//! - `GET /places/v0/indexes/{index}/places/{place_id}`
//!
//! Responses are validated here; a record without a label, a point or a
//! place id fails the whole call rather than reaching the adapter half-built.

use crate::config::ProviderConfig;
use crate::constants::api::{MAX_SUGGESTION_RESULTS, MAX_TEXT_RESULTS, PLACES_PATH_PREFIX};
use crate::error::{Error, Result};
use crate::geocode::{GeoPoint, GeocodingProvider, ProviderResult, ProviderSuggestion};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("geocoder-bridge/", env!("CARGO_PKG_VERSION"));

/// Amazon Location place index backend
#[derive(Debug, Clone)]
pub struct AmazonLocationProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: Option<String>,
    max_results: u32,
}

/// Body of both search calls
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SearchRequest<'a> {
    text: &'a str,
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchTextResponse {
    #[serde(default)]
    results: Vec<SearchTextResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchTextResult {
    place: Place,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SuggestionsResponse {
    #[serde(default)]
    results: Vec<SuggestionResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SuggestionResult {
    text: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetPlaceResponse {
    place: Place,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Place {
    label: Option<String>,
    geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PlaceGeometry {
    point: Option<Vec<f64>>,
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl Place {
    fn into_result(self, provider_id: Option<String>) -> Result<ProviderResult> {
        let label = self
            .label
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::InvalidRecord("Place has no label".to_string()))?;
        let point = self
            .geometry
            .and_then(|g| g.point)
            .ok_or_else(|| Error::InvalidRecord(format!("Place '{}' has no point", label)))?;

        Ok(ProviderResult {
            label,
            point: GeoPoint::try_from(point)?,
            provider_id,
        })
    }
}

impl SuggestionResult {
    fn into_suggestion(self) -> Result<ProviderSuggestion> {
        let text = self
            .text
            .ok_or_else(|| Error::InvalidRecord("Suggestion has no text".to_string()))?;
        let place_id = self.place_id.ok_or_else(|| {
            Error::InvalidRecord(format!("Suggestion '{}' has no place id", text))
        })?;

        Ok(ProviderSuggestion { text, place_id })
    }
}

impl AmazonLocationProvider {
    /// Create a backend from provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
            language: config.language().map(str::to_string),
            max_results: config.max_results,
        })
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn index_url(&self, index: &str, rest: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.endpoint,
            PLACES_PATH_PREFIX,
            urlencoding::encode(index),
            rest
        )
    }

    async fn search<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        text: &str,
        max_results: u32,
    ) -> Result<T> {
        let body = SearchRequest {
            text,
            max_results,
            language: self.language.as_deref(),
        };

        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Amazon Location request failed: {}", e)))?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            return Err(Error::Provider(format!(
                "Amazon Location returned status {}: {}",
                status, message
            )));
        }

        response.json().await.map_err(|e| {
            Error::Provider(format!("Failed to parse Amazon Location response: {}", e))
        })
    }
}

impl GeocodingProvider for AmazonLocationProvider {
    async fn search_by_text(&self, text: &str, index: &str) -> Result<Vec<ProviderResult>> {
        let url = self.index_url(index, "search/text");
        let response: SearchTextResponse = self
            .search(&url, text, self.max_results.min(MAX_TEXT_RESULTS))
            .await?;

        response
            .results
            .into_iter()
            .map(|r| r.place.into_result(r.place_id))
            .collect()
    }

    async fn search_for_suggestions(
        &self,
        text: &str,
        index: &str,
    ) -> Result<Vec<ProviderSuggestion>> {
        let url = self.index_url(index, "search/suggestions");
        let response: SuggestionsResponse = self
            .search(&url, text, self.max_results.min(MAX_SUGGESTION_RESULTS))
            .await?;

        response
            .results
            .into_iter()
            .map(SuggestionResult::into_suggestion)
            .collect()
    }

    async fn get_place_by_id(&self, place_id: &str, index: &str) -> Result<ProviderResult> {
        let url = self.index_url(index, &format!("places/{}", urlencoding::encode(place_id)));

        debug!("GET {}", url);
        let mut request = self.client.get(&url).query(&[("key", self.api_key.as_str())]);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Amazon Location request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::PlaceNotFound(place_id.to_string()));
        }

        let response: GetPlaceResponse = Self::parse(response).await?;
        response.place.into_result(Some(place_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_config() -> ProviderConfig {
        ProviderConfig {
            api_key: "v1.public.key".to_string(),
            index_name: "explore.place".to_string(),
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_backend_creation() {
        let backend = AmazonLocationProvider::new(&provider_config()).unwrap();
        assert_eq!(backend.endpoint(), "https://places.geo.eu-central-1.amazonaws.com");
        assert!(format!("{:?}", backend).contains("AmazonLocationProvider"));
    }

    #[test]
    fn test_backend_requires_key() {
        let config = ProviderConfig {
            api_key: String::new(),
            ..provider_config()
        };
        assert!(AmazonLocationProvider::new(&config).is_err());
    }

    #[test]
    fn test_index_url_encodes_segments() {
        let backend = AmazonLocationProvider::new(&provider_config()).unwrap();
        assert_eq!(
            backend.index_url("my index", "search/text"),
            "https://places.geo.eu-central-1.amazonaws.com/places/v0/indexes/my%20index/search/text"
        );
    }

    #[test]
    fn test_search_request_body() {
        let body = SearchRequest {
            text: "Vancouver",
            max_results: 5,
            language: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"Text": "Vancouver", "MaxResults": 5})
        );
    }

    #[test]
    fn test_parse_search_text_result() {
        let raw = r#"{
            "Summary": {"Text": "Vancouver"},
            "Results": [{
                "Place": {
                    "Label": "Vancouver, BC, Canada",
                    "Geometry": {"Point": [-123.12, 49.28]},
                    "Country": "CAN"
                },
                "PlaceId": "abc123",
                "Relevance": 1.0
            }]
        }"#;

        let response: SearchTextResponse = serde_json::from_str(raw).unwrap();
        let result = response
            .results
            .into_iter()
            .next()
            .map(|r| r.place.into_result(r.place_id))
            .unwrap()
            .unwrap();

        assert_eq!(result.label, "Vancouver, BC, Canada");
        assert_eq!(result.point, GeoPoint::new(-123.12, 49.28).unwrap());
        assert_eq!(result.provider_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_place_without_point_is_invalid() {
        let place: Place = serde_json::from_str(r#"{"Label": "Somewhere"}"#).unwrap();
        assert!(matches!(place.into_result(None), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_place_with_swapped_range_is_invalid() {
        let place: Place =
            serde_json::from_str(r#"{"Label": "X", "Geometry": {"Point": [49.28, -123.12]}}"#)
                .unwrap();
        assert!(place.into_result(None).is_err());
    }

    #[test]
    fn test_suggestion_without_place_id_is_invalid() {
        let suggestion: SuggestionResult =
            serde_json::from_str(r#"{"Text": "Vancouver"}"#).unwrap();
        assert!(suggestion.into_suggestion().is_err());
    }
}
