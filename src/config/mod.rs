//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geocoder-bridge/config.toml

pub mod defaults;

use crate::constants::api::{MAPS_ENDPOINT_TEMPLATE, MAPS_PATH_PREFIX, PLACES_ENDPOINT_TEMPLATE};
use crate::constants::env::API_KEY_VAR;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Map initialisation settings
    #[serde(default)]
    pub map: MapConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Amazon Location place index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// AWS region hosting the place index
    #[serde(default = "default_region")]
    pub region: String,

    /// Amazon Location API key
    #[serde(default)]
    pub api_key: String,

    /// Place index used when a request names none
    #[serde(default)]
    pub index_name: String,

    /// Endpoint override; empty means derived from the region
    #[serde(default)]
    pub endpoint: String,

    /// Preferred result language (BCP 47); empty means provider default
    #[serde(default)]
    pub language: String,

    /// Maximum results per search
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Map initialisation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Amazon Location map resource name
    #[serde(default)]
    pub name: String,

    /// Initial center as [longitude, latitude]
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial zoom
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions for serde
fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_center() -> [f64; 2] {
    DEFAULT_MAP_CENTER
}
fn default_zoom() -> f64 {
    DEFAULT_MAP_ZOOM
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            api_key: String::new(),
            index_name: String::new(),
            endpoint: String::new(),
            language: String::new(),
            max_results: default_max_results(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

impl ProviderConfig {
    /// Base URL of the Places API
    pub fn endpoint(&self) -> String {
        if self.endpoint.is_empty() {
            PLACES_ENDPOINT_TEMPLATE.replace("{region}", &self.region)
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Language to request, if one is configured
    pub fn language(&self) -> Option<&str> {
        if self.language.is_empty() {
            None
        } else {
            Some(&self.language)
        }
    }

    /// Check that everything needed to call the provider is present
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::Config("provider.region is not set".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "provider.api_key is not set (or export {})",
                API_KEY_VAR
            )));
        }
        if self.index_name.trim().is_empty() {
            return Err(Error::Config("provider.index_name is not set".to_string()));
        }
        if self.max_results == 0 {
            return Err(Error::Config("provider.max_results must be positive".to_string()));
        }
        Ok(())
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist. The API key
    /// environment variable takes precedence over the file.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        if let Ok(key) = std::env::var(API_KEY_VAR) {
            if !key.is_empty() {
                config.provider.api_key = key;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific path, writing defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "region"] => Some(self.provider.region.clone()),
            ["provider", "api_key"] => Some(self.provider.api_key.clone()),
            ["provider", "index_name"] => Some(self.provider.index_name.clone()),
            ["provider", "endpoint"] => Some(self.provider.endpoint.clone()),
            ["provider", "language"] => Some(self.provider.language.clone()),
            ["provider", "max_results"] => Some(self.provider.max_results.to_string()),
            ["provider", "timeout_secs"] => Some(self.provider.timeout_secs.to_string()),

            ["map", "name"] => Some(self.map.name.clone()),
            ["map", "center"] => Some(format!("{},{}", self.map.center[0], self.map.center[1])),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "allowed_origins"] => Some(self.server.allowed_origins.join(",")),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "region"] => {
                self.provider.region = value.to_string();
            }
            ["provider", "api_key"] => {
                self.provider.api_key = value.to_string();
            }
            ["provider", "index_name"] => {
                self.provider.index_name = value.to_string();
            }
            ["provider", "endpoint"] => {
                self.provider.endpoint = value.to_string();
            }
            ["provider", "language"] => {
                self.provider.language = value.to_string();
            }
            ["provider", "max_results"] => {
                self.provider.max_results = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid max_results value: {}", value))
                })?;
            }
            ["provider", "timeout_secs"] => {
                self.provider.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["map", "name"] => {
                self.map.name = value.to_string();
            }
            ["map", "center"] => {
                self.map.center = parse_center(value)?;
            }
            ["map", "zoom"] => {
                self.map.zoom = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid zoom value: {}", value))
                })?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }
            ["server", "allowed_origins"] => {
                self.server.allowed_origins = value
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "provider.region",
            "provider.api_key",
            "provider.index_name",
            "provider.endpoint",
            "provider.language",
            "provider.max_results",
            "provider.timeout_secs",
            "map.name",
            "map.center",
            "map.zoom",
            "server.host",
            "server.port",
            "server.allowed_origins",
        ]
    }

    /// Style descriptor URL for the configured map resource
    ///
    /// Authenticates with the same API key as the place index.
    pub fn map_style_url(&self) -> Result<String> {
        if self.map.name.is_empty() {
            return Err(Error::Config("map.name is not set".to_string()));
        }

        Ok(format!(
            "{}{}/{}/style-descriptor?key={}",
            MAPS_ENDPOINT_TEMPLATE.replace("{region}", &self.provider.region),
            MAPS_PATH_PREFIX,
            urlencoding::encode(&self.map.name),
            urlencoding::encode(&self.provider.api_key)
        ))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse a "lng,lat" pair, rejecting out-of-range values
fn parse_center(value: &str) -> Result<[f64; 2]> {
    let invalid = || Error::Config(format!("Invalid center value (expected lng,lat): {}", value));

    let (lng, lat) = value.split_once(',').ok_or_else(invalid)?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;

    if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
        return Err(invalid());
    }
    Ok([lng, lat])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn configured() -> Config {
        let mut config = Config::default();
        config.provider.api_key = "v1.public.key".to_string();
        config.provider.index_name = "explore.place".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.provider.region, "eu-central-1");
        assert_eq!(config.provider.max_results, 10);
        assert!(config.provider.api_key.is_empty());
        assert_eq!(config.map.center, [-123.1187, 49.2819]);
        assert_eq!(config.server.port, 8787);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("provider.region"), Some("eu-central-1".to_string()));

        config.set("provider.region", "us-west-2").unwrap();
        assert_eq!(config.get("provider.region"), Some("us-west-2".to_string()));

        config.set("provider.max_results", "25").unwrap();
        assert_eq!(config.provider.max_results, 25);

        config.set("server.allowed_origins", "http://a.test, http://b.test").unwrap();
        assert_eq!(config.server.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_get_set_map_center() {
        let mut config = Config::default();
        assert_eq!(config.get("map.center"), Some("-123.1187,49.2819".to_string()));

        config.set("map.center", "2.3522, 48.8566").unwrap();
        assert_eq!(config.map.center, [2.3522, 48.8566]);
        assert_eq!(config.get("map.center"), Some("2.3522,48.8566".to_string()));
    }

    #[test]
    fn test_set_invalid_map_center() {
        let mut config = Config::default();
        assert!(config.set("map.center", "2.35").is_err());
        assert!(config.set("map.center", "east,north").is_err());
        assert!(config.set("map.center", "48.8566,200").is_err());
        assert_eq!(config.map.center, [-123.1187, 49.2819]);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("provider.max_results", "lots").is_err());
        assert!(config.set("server.port", "99999").is_err());
    }

    #[test]
    fn test_endpoint_from_region() {
        let mut config = Config::default();
        config.provider.region = "ca-central-1".to_string();
        assert_eq!(
            config.provider.endpoint(),
            "https://places.geo.ca-central-1.amazonaws.com"
        );
    }

    #[test]
    fn test_endpoint_override() {
        let mut config = Config::default();
        config.provider.endpoint = "http://127.0.0.1:9000/".to_string();
        assert_eq!(config.provider.endpoint(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_language() {
        let mut config = Config::default();
        assert_eq!(config.provider.language(), None);
        config.provider.language = "fr".to_string();
        assert_eq!(config.provider.language(), Some("fr"));
    }

    #[test]
    fn test_validate_provider() {
        assert!(Config::default().provider.validate().is_err());
        assert!(configured().provider.validate().is_ok());

        let mut config = configured();
        config.provider.index_name.clear();
        assert!(config.provider.validate().is_err());
    }

    #[test]
    fn test_map_style_url() {
        let mut config = configured();
        assert!(config.map_style_url().is_err());

        config.map.name = "explore.map".to_string();
        assert_eq!(
            config.map_style_url().unwrap(),
            "https://maps.geo.eu-central-1.amazonaws.com/maps/v0/maps/explore.map/style-descriptor?key=v1.public.key"
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = configured();
        config.server.port = 9000;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider.index_name, "explore.place");
        assert_eq!(loaded.server.port, 9000);
    }

    #[test]
    fn test_load_creates_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let loaded = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(loaded.provider.region, "eu-central-1");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[provider]\nindex_name = \"demo\"\n").unwrap();
        assert_eq!(config.provider.index_name, "demo");
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_serialization_format() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml.contains("[provider]"));
        assert!(toml.contains("[map]"));
        assert!(toml.contains("[server]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:8787");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        for key in &keys {
            assert!(Config::default().get(key).is_some(), "{} not readable", key);
        }
    }
}
