//! Error types and handling for the forecast application

use thiserror::Error;

/// Message shown for any non-success HTTP status
pub const HTTP_STATUS_MESSAGE: &str = "Network response was not ok";

/// Message shown when the forecast payload cannot be used
pub const MALFORMED_MESSAGE: &str = "Received malformed forecast data";

/// Main error type for the forecast application
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Request could not complete (connectivity, DNS, transport timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Response received but the status indicates failure
    #[error("HTTP error: status {status}")]
    HttpStatus { status: u16 },

    /// A forecast entry whose timestamp has no date prefix
    #[error("Malformed forecast entry: timestamp '{timestamp}' has no date prefix")]
    MalformedEntry { timestamp: String },

    /// Response body does not match the expected forecast schema
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ForecastError {
    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new schema error
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Reduce the error to the single line shown to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Network { message } => message.clone(),
            ForecastError::HttpStatus { .. } => HTTP_STATUS_MESSAGE.to_string(),
            ForecastError::MalformedEntry { .. } | ForecastError::Schema { .. } => {
                MALFORMED_MESSAGE.to_string()
            }
            ForecastError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            ForecastError::Validation { message } => format!("Invalid input: {message}"),
            ForecastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
