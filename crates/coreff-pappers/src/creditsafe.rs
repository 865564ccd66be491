//! Creditsafe search links.
//!
//! Creditsafe lookups open the provider's own search page in a browser, so
//! the only thing to build here is the URL.

use crate::error::{RegistryError, Result};

/// Creditsafe web search page.
pub const CREDITSAFE_SEARCH_URL: &str = "https://app.creditsafe.com/search";

/// Maximum number of hits requested from the search page.
const SEARCH_LIMIT: u32 = 15;

/// Build the Creditsafe search URL for a company name.
///
/// # Errors
/// Returns [`RegistryError::Validation`] if no name is given.
pub fn search_url(company_name: Option<&str>) -> Result<String> {
    let name = company_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            RegistryError::Validation(
                "Missing [Company Name] to perform Creditsafe lookup.".to_string(),
            )
        })?;

    Ok(format!(
        "{CREDITSAFE_SEARCH_URL}?limit={SEARCH_LIMIT}&name={}&page=1",
        urlencoding::encode(name)
    ))
}
