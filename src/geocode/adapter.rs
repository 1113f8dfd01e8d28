//! Result adapter between the geocoding provider and the map search widget
//!
//! Every operation is fail-soft: a provider failure is logged and answered
//! with the empty envelope, so the widget always receives a well-formed
//! payload. A failed search looks the same as a search with no hits.

use crate::error::Result;
use crate::geocode::{
    ForwardGeocodeResponse, GenericFeature, GenericSuggestion, GeocodeRequest,
    GeocodingProvider, PlaceResponse, SuggestionsResponse,
};
use tracing::{debug, warn};

/// Adapter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Place index used when a request names none
    pub default_index: String,
}

impl AdapterConfig {
    pub fn new(default_index: impl Into<String>) -> Self {
        Self {
            default_index: default_index.into(),
        }
    }
}

/// Translates provider records into widget-facing features and suggestions
#[derive(Debug)]
pub struct GeocodeResultAdapter<P> {
    provider: P,
    config: AdapterConfig,
}

impl<P: GeocodingProvider> GeocodeResultAdapter<P> {
    pub fn new(provider: P, config: AdapterConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn default_index(&self) -> &str {
        &self.config.default_index
    }

    /// Search by free text; one feature per provider result, same order
    pub async fn forward_geocode(&self, request: &GeocodeRequest) -> ForwardGeocodeResponse {
        let Some(query) = non_blank(&request.query) else {
            debug!("Skipping forward geocode for blank query");
            return ForwardGeocodeResponse::default();
        };
        let index = self.index_for(request);

        let result = self
            .provider
            .search_by_text(query, index)
            .await
            .map(|results| ForwardGeocodeResponse {
                features: results.iter().map(GenericFeature::from_search_result).collect(),
            });

        fail_soft("forwardGeocode", result)
    }

    /// Autosuggest; one suggestion per provider candidate, same order
    pub async fn get_suggestions(&self, request: &GeocodeRequest) -> SuggestionsResponse {
        let Some(query) = non_blank(&request.query) else {
            debug!("Skipping suggestions for blank query");
            return SuggestionsResponse::default();
        };
        let index = self.index_for(request);

        let result = self
            .provider
            .search_for_suggestions(query, index)
            .await
            .map(|suggestions| SuggestionsResponse {
                suggestions: suggestions.into_iter().map(GenericSuggestion::from).collect(),
            });

        fail_soft("getSuggestions", result)
    }

    /// Resolve a suggestion's place id (carried in `request.query`)
    pub async fn resolve_suggestion(&self, request: &GeocodeRequest) -> PlaceResponse {
        let Some(place_id) = non_blank(&request.query) else {
            debug!("Skipping place lookup for blank place id");
            return PlaceResponse::default();
        };
        let index = self.index_for(request);

        let result = self
            .provider
            .get_place_by_id(place_id, index)
            .await
            .map(|place| PlaceResponse {
                place: Some(GenericFeature::from_place(&place)),
            });

        fail_soft("searchByPlaceId", result)
    }

    fn index_for<'a>(&'a self, request: &'a GeocodeRequest) -> &'a str {
        request
            .index
            .as_deref()
            .and_then(non_blank)
            .unwrap_or(&self.config.default_index)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Unwrap a provider outcome, logging and substituting the empty value on error
fn fail_soft<T: Default>(operation: &'static str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(operation, "Failed to {} with error: {}", operation, e);
        T::default()
    })
}
