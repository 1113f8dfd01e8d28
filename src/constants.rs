//! Centralized constants for the geocoder-bridge crate

/// Amazon Location Service endpoints
pub mod api {
    /// Places API host template, `{region}` is substituted
    pub const PLACES_ENDPOINT_TEMPLATE: &str = "https://places.geo.{region}.amazonaws.com";

    /// Maps API host template, `{region}` is substituted
    pub const MAPS_ENDPOINT_TEMPLATE: &str = "https://maps.geo.{region}.amazonaws.com";

    /// Places API version prefix
    pub const PLACES_PATH_PREFIX: &str = "/places/v0/indexes";

    /// Maps API version prefix
    pub const MAPS_PATH_PREFIX: &str = "/maps/v0/maps";

    /// Upper bound the suggestions endpoint accepts for MaxResults
    pub const MAX_SUGGESTION_RESULTS: u32 = 15;

    /// Upper bound the text search endpoint accepts for MaxResults
    pub const MAX_TEXT_RESULTS: u32 = 50;
}

/// Widget-facing constants
pub mod widget {
    /// Place type tag attached to forward geocode features
    pub const PLACE_TYPE: &str = "place";
}

/// Environment variables
pub mod env {
    /// Overrides `provider.api_key` from the config file
    pub const API_KEY_VAR: &str = "GEOCODER_API_KEY";
}
