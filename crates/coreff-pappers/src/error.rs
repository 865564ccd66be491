//! Error types for the registry client.

use coreff_core::CoreffError;
use serde_json::Value;
use thiserror::Error;

use crate::tree::scalar_text;

/// Errors that can occur during registry lookups.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Caller input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The provider answered with an error object.
    ///
    /// The display text is shown to end users and must stay
    /// `Erreur {statusCode} :\n{error}`.
    #[error("Erreur {status_code} :\n{message}")]
    Provider {
        /// `statusCode` field of the response body
        status_code: String,
        /// `error` field of the response body
        message: String,
    },

    /// An expected key was missing and the body carried no error fields either
    #[error("unexpected response from {endpoint}: {reason}")]
    UnexpectedResponse {
        /// Endpoint path that was called
        endpoint: String,
        /// What was wrong with the body
        reason: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not JSON where JSON was required
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP client could not be built
    #[error("internal error: {0}")]
    Client(String),
}

impl RegistryError {
    /// Build the error for a body that did not have the expected shape.
    ///
    /// Bodies carrying both `statusCode` and `error` become
    /// [`RegistryError::Provider`]; anything else is
    /// [`RegistryError::UnexpectedResponse`] with `reason`.
    pub fn from_error_body(endpoint: &str, body: &Value, reason: impl std::fmt::Display) -> Self {
        match (body.get("statusCode"), body.get("error")) {
            (Some(status_code), Some(message)) => Self::Provider {
                status_code: scalar_text(status_code),
                message: scalar_text(message),
            },
            _ => Self::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                reason: reason.to_string(),
            },
        }
    }
}

impl From<CoreffError> for RegistryError {
    fn from(err: CoreffError) -> Self {
        match err {
            CoreffError::Validation(message) => Self::Validation(message),
            other => Self::Client(other.to_string()),
        }
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
