//! Error types and handling for the weather aggregator

use thiserror::Error;

/// Main error type for the weather aggregator
///
/// A city that geocodes to nothing is not an error; see
/// [`crate::models::CityWeather::NotFound`].
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// Input validation errors (caller fault)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Any failure contacting or parsing the weather provider
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AggregatorError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the caller caused this error
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, AggregatorError::Validation { .. })
    }

    /// Get a user-friendly error message
    ///
    /// Only validation messages are passed through; everything else collapses
    /// to a generic message so upstream details never reach the caller.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AggregatorError::Validation { message } => message.clone(),
            AggregatorError::Upstream { .. } | AggregatorError::Config { .. } => {
                "Internal Server Error".to_string()
            }
        }
    }
}
