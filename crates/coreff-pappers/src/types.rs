//! Records handed back to the host.

use serde::{Deserialize, Serialize};

/// One company or establishment suggestion.
///
/// Every field the provider may leave out is optional. `registry_data`
/// holds the text rendering of the complete provider response the record
/// was taken from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// SIREN (name search) or SIRET (code search)
    pub company_code: Option<String>,
    /// Company name
    pub name: Option<String>,
    /// First address line
    pub street: Option<String>,
    /// Second address line
    pub street2: Option<String>,
    /// City
    pub city: Option<String>,
    /// Postal code
    pub zip: Option<String>,
    /// Country code of the establishment
    pub country_code: Option<String>,
    /// Intra-community VAT number
    pub vat: Option<String>,
    /// Indented text rendering of the whole provider response
    pub registry_data: String,
}

/// One company officer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorInfo {
    /// Full name
    pub name: Option<String>,
    /// Role within the company
    pub job: Option<String>,
    /// First address line
    pub street: Option<String>,
    /// Postal code
    pub zip: Option<String>,
    /// City
    pub city: Option<String>,
}
