//! HTTP client construction.

use crate::error::{RegistryError, Result};
use reqwest::Client;
use std::time::Duration;

/// Timeout applied when the caller does not configure one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build the HTTP client used for registry requests.
///
/// # Arguments
/// * `timeout_secs` - Timeout in seconds (defaults to 30 if not specified)
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: Option<u64>) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(
            timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ))
        .user_agent(concat!("coreff/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RegistryError::Client(format!("failed to create HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Some(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_default() {
        let client = build_http_client(None);
        assert!(client.is_ok());
    }
}
