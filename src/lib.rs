//! geocoder-bridge: map search widget <-> Amazon Location geocoding
//!
//! A library and CLI tool that answers a map search widget's three geocoder
//! callbacks (forward geocode, suggestions, resolve suggestion) by querying
//! an Amazon Location place index and translating its records into Carmen
//! GeoJSON features.
//!
//! ## Features
//!
//! - Typed provider records validated at the boundary
//! - Fail-soft adapter: provider failures become empty results, never errors
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geocoder_bridge::config::ProviderConfig;
//! use geocoder_bridge::geocode::adapter::{AdapterConfig, GeocodeResultAdapter};
//! use geocoder_bridge::geocode::amazon::AmazonLocationProvider;
//! use geocoder_bridge::geocode::GeocodeRequest;
//!
//! # async fn demo() -> geocoder_bridge::Result<()> {
//! let config = ProviderConfig {
//!     api_key: "v1.public.example".to_string(),
//!     index_name: "explore.place".to_string(),
//!     ..ProviderConfig::default()
//! };
//! let provider = AmazonLocationProvider::new(&config)?;
//! let adapter = GeocodeResultAdapter::new(provider, AdapterConfig::new("explore.place"));
//!
//! let response = adapter.forward_geocode(&GeocodeRequest::new("Vancouver")).await;
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod geocode;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geocode::adapter::{AdapterConfig, GeocodeResultAdapter};
pub use geocode::{GenericFeature, GenericSuggestion, GeocodeRequest, GeocodingProvider};
