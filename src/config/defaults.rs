//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default AWS region
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Default maximum number of results requested from the provider
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Default provider request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default initial map center as (longitude, latitude)
pub const DEFAULT_MAP_CENTER: [f64; 2] = [-123.1187, 49.2819];

/// Default initial map zoom
pub const DEFAULT_MAP_ZOOM: f64 = 16.0;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8787;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geocoder-bridge";
