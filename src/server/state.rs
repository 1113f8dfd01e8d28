//! Server shared state
//!
//! Holds configuration and the geocode adapter. Both are read-only once the
//! server starts, so concurrent requests share them without locking.

use crate::config::Config;
use crate::error::Result;
use crate::geocode::adapter::{AdapterConfig, GeocodeResultAdapter};
use crate::geocode::amazon::AmazonLocationProvider;
use crate::geocode::GeocodingProvider;

/// Shared state for the HTTP server
pub struct AppState<P = AmazonLocationProvider> {
    /// Configuration
    pub config: Config,

    /// Adapter answering the widget's geocoder callbacks
    pub adapter: GeocodeResultAdapter<P>,
}

impl AppState<AmazonLocationProvider> {
    /// Create application state backed by Amazon Location
    pub fn new(config: Config) -> Result<Self> {
        let provider = AmazonLocationProvider::new(&config.provider)?;
        Ok(Self::with_provider(config, provider))
    }
}

impl<P: GeocodingProvider> AppState<P> {
    /// Create application state around any provider
    pub fn with_provider(config: Config, provider: P) -> Self {
        let adapter_config = AdapterConfig::new(config.provider.index_name.clone());
        Self {
            config,
            adapter: GeocodeResultAdapter::new(provider, adapter_config),
        }
    }
}
