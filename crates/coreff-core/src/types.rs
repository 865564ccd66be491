//! Company identifiers shared by the registry connectors.
//!
//! French registries identify a company by its SIREN (9 digits) and each of
//! its establishments by a SIRET (the SIREN plus a 5-digit suffix).

use crate::error::CoreffError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned when a company code contains something other than digits.
pub const NON_NUMERIC_CODE: &str = "Non-numerical character(s) in provided code";

/// Which registry number a request is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    /// 9-digit company identifier
    Siren,
    /// 14-digit establishment identifier
    Siret,
}

impl CodeType {
    /// Name of the query parameter carrying a code of this type.
    #[must_use]
    pub fn query_param(self) -> &'static str {
        match self {
            Self::Siren => "siren",
            Self::Siret => "siret",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_param())
    }
}

/// Newtype for a registry number that has passed [`check_code`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Create a new `CompanyCode` from a string.
    ///
    /// # Errors
    /// Returns [`CoreffError::Validation`] if any character is not a digit.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreffError> {
        let code = code.into();
        check_code(&code)?;
        Ok(Self(code))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits in the code.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the code is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Registry the code should be looked up in, judged by its length.
    ///
    /// 9 to 13 digits are searched as a SIREN, exactly 14 as a SIRET. Any
    /// other length has no lookup.
    #[must_use]
    pub fn code_type(&self) -> Option<CodeType> {
        match self.0.len() {
            9..=13 => Some(CodeType::Siren),
            14 => Some(CodeType::Siret),
            _ => None,
        }
    }
}

impl TryFrom<String> for CompanyCode {
    type Error = CoreffError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanyCode> for String {
    fn from(code: CompanyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CompanyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reject a code containing any non-digit character.
///
/// Scans the whole string and stops at the first offending character. An
/// empty code passes.
///
/// # Errors
/// Returns [`CoreffError::Validation`] with [`NON_NUMERIC_CODE`].
pub fn check_code(code: &str) -> Result<(), CoreffError> {
    if let Some(position) = code.chars().position(|c| !c.is_ascii_digit()) {
        tracing::debug!("rejected company code: non-digit at position {}", position);
        return Err(CoreffError::Validation(NON_NUMERIC_CODE.to_string()));
    }
    Ok(())
}

/// Whether a typed search value is long enough to send to a provider.
///
/// Company-code searches need more than 8 characters, name searches more
/// than 3. The raw value is measured, whitespace included.
#[must_use]
pub fn validate_search_term(value: &str, only_company_code: bool) -> bool {
    let length = value.chars().count();
    if only_company_code {
        length > 8
    } else {
        length > 3
    }
}
