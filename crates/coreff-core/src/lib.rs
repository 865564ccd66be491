//! CoreFF Core - Foundation crate for the CoreFF registry connectors.
//!
//! This crate provides the shared types, error handling and configuration
//! management that the provider clients and the host harness depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with platform paths and env overrides
//! - [`types`] - Company identifiers (`CompanyCode`, `CodeType`) and input checks
//!
//! # Example
//!
//! ```rust
//! use coreff_core::{check_code, AppConfig, CodeType, CompanyCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.pappers.base_url, "https://api.pappers.fr");
//!
//! check_code("552100554")?;
//! let code = CompanyCode::new("55210055400013")?;
//! assert_eq!(code.code_type(), Some(CodeType::Siret));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, ElliproConfig, LoggingConfig, PappersConfig};
pub use error::{ConfigError, ConfigResult, CoreffError, Result};
pub use types::{check_code, validate_search_term, CodeType, CompanyCode};
