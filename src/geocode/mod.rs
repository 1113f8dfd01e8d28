//! Geocoding module
//!
//! Provider-native records, the widget-facing feature shapes, and the
//! `GeocodingProvider` trait the adapter talks to.

pub mod adapter;
pub mod amazon;

use crate::constants::widget::PLACE_TYPE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair
///
/// Serialized as `[lng, lat]`, the order both the provider and the widget use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range or non-finite values
    pub fn new(lng: f64, lat: f64) -> Result<Self> {
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(Error::InvalidRecord(format!("Invalid longitude: {}", lng)));
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidRecord(format!("Invalid latitude: {}", lat)));
        }
        Ok(Self { lng, lat })
    }
}

impl TryFrom<Vec<f64>> for GeoPoint {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        match values.as_slice() {
            [lng, lat] => Self::new(*lng, *lat),
            other => Err(Error::InvalidRecord(format!(
                "Point must have 2 coordinates, got {}",
                other.len()
            ))),
        }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lng, point.lat]
    }
}

/// A widget request: free text (or a place id) plus an optional index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    /// Search text, or the place id when resolving a suggestion
    #[serde(default)]
    pub query: String,

    /// Place index to search; the adapter default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl GeocodeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }
}

/// A resolved place as returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub label: String,
    pub point: GeoPoint,
    pub provider_id: Option<String>,
}

/// An autosuggest candidate as returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSuggestion {
    pub text: String,
    pub place_id: String,
}

/// GeoJSON `type` tag of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureKind {
    #[default]
    Feature,
}

/// GeoJSON `type` tag of a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeometryKind {
    #[default]
    Point,
}

/// Point geometry of a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    pub coordinates: GeoPoint,
}

/// Feature properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Carmen GeoJSON feature consumed by the map search widget
///
/// `place_name` and `text` carry the same label, and `center` repeats
/// `geometry.coordinates`; the widget reads either depending on code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericFeature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub geometry: Geometry,
    pub place_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FeatureProperties>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<Vec<String>>,
    pub center: GeoPoint,
}

impl GenericFeature {
    /// Feature for a resolved place, without search-only fields
    pub fn from_place(result: &ProviderResult) -> Self {
        Self {
            kind: FeatureKind::Feature,
            geometry: Geometry {
                kind: GeometryKind::Point,
                coordinates: result.point,
            },
            place_name: result.label.clone(),
            properties: None,
            text: result.label.clone(),
            place_type: None,
            center: result.point,
        }
    }

    /// Feature for a forward geocode hit
    pub fn from_search_result(result: &ProviderResult) -> Self {
        Self {
            properties: Some(FeatureProperties {
                id: result.provider_id.clone(),
            }),
            place_type: Some(vec![PLACE_TYPE.to_string()]),
            ..Self::from_place(result)
        }
    }
}

/// Unresolved suggestion consumed by the map search widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericSuggestion {
    pub text: String,
    pub place_id: String,
}

impl From<ProviderSuggestion> for GenericSuggestion {
    fn from(suggestion: ProviderSuggestion) -> Self {
        Self {
            text: suggestion.text,
            place_id: suggestion.place_id,
        }
    }
}

/// Response to a forward geocode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardGeocodeResponse {
    pub features: Vec<GenericFeature>,
}

/// Response to a suggestion lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<GenericSuggestion>,
}

/// Response to a place lookup; `place` serializes as `null` when unresolved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub place: Option<GenericFeature>,
}

/// Trait for geocoding providers
///
/// Implementations own transport and authentication.
pub trait GeocodingProvider: Send + Sync {
    /// Search the index for places matching free text
    fn search_by_text(
        &self,
        text: &str,
        index: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ProviderResult>>> + Send;

    /// Search the index for autosuggest candidates
    fn search_for_suggestions(
        &self,
        text: &str,
        index: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ProviderSuggestion>>> + Send;

    /// Fetch a single place by its provider id
    ///
    /// Returns `Error::PlaceNotFound` when the id does not resolve.
    fn get_place_by_id(
        &self,
        place_id: &str,
        index: &str,
    ) -> impl std::future::Future<Output = Result<ProviderResult>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vancouver() -> ProviderResult {
        ProviderResult {
            label: "Vancouver, BC, Canada".to_string(),
            point: GeoPoint::new(-123.12, 49.28).unwrap(),
            provider_id: Some("abc123".to_string()),
        }
    }

    #[test]
    fn test_point_serializes_lng_first() {
        let point = GeoPoint::new(-123.12, 49.28).unwrap();
        assert_eq!(serde_json::to_value(point).unwrap(), json!([-123.12, 49.28]));
    }

    #[test]
    fn test_point_rejects_bad_input() {
        assert!(serde_json::from_value::<GeoPoint>(json!([1.0])).is_err());
        assert!(serde_json::from_value::<GeoPoint>(json!([1.0, 2.0, 3.0])).is_err());
        assert!(serde_json::from_value::<GeoPoint>(json!([181.0, 0.0])).is_err());
        assert!(serde_json::from_value::<GeoPoint>(json!([0.0, -90.5])).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_point_accepts_bounds() {
        let point: GeoPoint = serde_json::from_value(json!([180.0, -90.0])).unwrap();
        assert_eq!(point.lng, 180.0);
        assert_eq!(point.lat, -90.0);
    }

    #[test]
    fn test_search_feature_shape() {
        let feature = GenericFeature::from_search_result(&vancouver());

        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [-123.12, 49.28]},
                "place_name": "Vancouver, BC, Canada",
                "properties": {"id": "abc123"},
                "text": "Vancouver, BC, Canada",
                "place_type": ["place"],
                "center": [-123.12, 49.28]
            })
        );
    }

    #[test]
    fn test_place_feature_omits_search_fields() {
        let value = serde_json::to_value(GenericFeature::from_place(&vancouver())).unwrap();

        assert!(value.get("properties").is_none());
        assert!(value.get("place_type").is_none());
        assert_eq!(value["center"], value["geometry"]["coordinates"]);
    }

    #[test]
    fn test_suggestion_uses_camel_case() {
        let suggestion = GenericSuggestion::from(ProviderSuggestion {
            text: "Vancouver".to_string(),
            place_id: "s1".to_string(),
        });

        assert_eq!(
            serde_json::to_value(suggestion).unwrap(),
            json!({"text": "Vancouver", "placeId": "s1"})
        );
    }

    #[test]
    fn test_empty_envelopes() {
        assert_eq!(
            serde_json::to_value(ForwardGeocodeResponse::default()).unwrap(),
            json!({"features": []})
        );
        assert_eq!(
            serde_json::to_value(SuggestionsResponse::default()).unwrap(),
            json!({"suggestions": []})
        );
        assert_eq!(
            serde_json::to_value(PlaceResponse::default()).unwrap(),
            json!({"place": null})
        );
    }

    #[test]
    fn test_request_defaults() {
        let request: GeocodeRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, GeocodeRequest::default());

        let request = GeocodeRequest::new("van").with_index("demo");
        assert_eq!(request.index.as_deref(), Some("demo"));
    }
}
