//! Error types for geocoder-bridge

use thiserror::Error;

/// Main error type for geocoder-bridge operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    #[error("Invalid provider record: {0}")]
    InvalidRecord(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for geocoder-bridge operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::PlaceNotFound("s1".to_string()).to_string(),
            "Place not found: s1"
        );
        assert_eq!(
            Error::Config("map.name is not set".to_string()).to_string(),
            "Configuration error: map.name is not set"
        );
    }
}
