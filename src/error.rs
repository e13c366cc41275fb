//! Error types for the sentinelop CLI

use thiserror::Error;

/// Result type alias for sentinelop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check your Sentinel API key.")]
    Unauthorized,

    #[error("Operation not permitted: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Unexpected status code {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Pagination stalled at offset {offset}; aborting")]
    PaginationStalled { offset: u64 },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            // reqwest includes the URL in its message, which carries the key
            ApiError::Network(err.without_url().to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `sentinelop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Sentinel API key must be defined. Run `sentinelop init` or set SENTINELOP_API_KEY.")]
    MissingApiKey,

    #[error("Source control credentials not configured. Run `sentinelop init` to set them.")]
    MissingScmCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_conflict() {
        let err = ApiError::Conflict("application exists".to_string());
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_api_error_forbidden() {
        let err = ApiError::Forbidden("scan already running".to_string());
        assert!(err.to_string().contains("scan already running"));
    }

    #[test]
    fn test_api_error_unexpected_status() {
        let err = ApiError::UnexpectedStatus {
            status: 418,
            message: "teapot".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("418"));
        assert!(msg.contains("teapot"));
    }

    #[test]
    fn test_api_error_pagination_stalled() {
        let err = ApiError::PaginationStalled { offset: 40 };
        assert!(err.to_string().contains("offset 40"));
    }

    #[test]
    fn test_config_error_missing_api_key() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains("API key must be defined"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Unauthorized.into();

        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::MissingApiKey.into();

        match err {
            Error::Config(ConfigError::MissingApiKey) => (),
            _ => panic!("Expected Error::Config(ConfigError::MissingApiKey)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
