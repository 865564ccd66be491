//! CoreFF Pappers - company-registry lookups against the Pappers API.
//!
//! This crate fetches company data from the French Pappers registry API and
//! reshapes it into flat records the host application can store directly.
//!
//! # Features
//!
//! - **Code search**: SIREN lists open establishments, SIRET returns one
//! - **Name search**: free-text company search with head-office addresses
//! - **Directors**: company officers in provider order
//! - **Reports**: the PDF company extract, base64-encoded
//! - **Tree rendering**: any JSON payload as indented `key = value` text
//!
//! # Example
//!
//! ```rust,no_run
//! use coreff_pappers::PappersClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PappersClient::new()?;
//! let suggestions = client.search_by_code("my-token", "552100554", true).await?;
//!
//! for suggestion in suggestions {
//!     println!("{:?} {:?}", suggestion.company_code, suggestion.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Codes containing anything but digits are rejected before a request is
//! sent. Provider error bodies surface as `Erreur {statusCode} :\n{error}`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod creditsafe;
pub mod error;
pub mod http;
pub mod tree;
pub mod types;
mod wire;

// Re-export commonly used types
pub use client::PappersClient;
pub use coreff_core::CodeType;
pub use error::{RegistryError, Result};
pub use types::{DirectorInfo, LookupResult};
