//! Error handling for the graphql module

use crate::logging::LogLevel;
use crate::model::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not JSON.
    #[error("Decoding error: {0}")]
    Decode(serde_json::Error),

    /// `data` was present but did not match the expected result sets.
    #[error("Unexpected response shape: {0}")]
    Schema(serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SchemaError),
}

impl FetchError {
    pub async fn from_response(response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        FetchError::Http { status, message }
    }

    /// Classify the error to pick a log level for the activity log.
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Authentication errors - the configured key is wrong
            FetchError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }

            // Server errors - temporary issues
            FetchError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Network issues - usually temporary
            FetchError::Reqwest(_) => LogLevel::Warn,

            // Payload problems will not fix themselves
            FetchError::Decode(_) | FetchError::Schema(_) | FetchError::Invalid(_) => {
                LogLevel::Error
            }

            _ => LogLevel::Warn,
        }
    }

    /// Short message for the error screen.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Reqwest(e) if e.is_timeout() => "Request timed out".to_string(),
            FetchError::Reqwest(e) if e.is_connect() => {
                "Could not connect to the stats endpoint".to_string()
            }
            FetchError::Reqwest(_) => "Network error".to_string(),
            FetchError::Http { status, .. } => format!("Stats endpoint returned HTTP {}", status),
            other => other.to_string(),
        }
    }
}
