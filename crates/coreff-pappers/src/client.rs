//! Pappers registry client.
//!
//! Each operation sends exactly one `GET` to the Pappers v2 API and reshapes
//! the answer into [`LookupResult`]s, [`DirectorInfo`]s or a text tree. The
//! API token is passed on every call; the client itself holds no secrets.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use coreff_core::{check_code, CodeType, CompanyCode, PappersConfig};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RegistryError, Result};
use crate::http::build_http_client;
use crate::tree::render;
use crate::types::{DirectorInfo, LookupResult};
use crate::wire::{CompanyResponse, DirectorsResponse, EstablishmentResponse, SearchResponse};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.pappers.fr";

/// PDF company extract.
pub const REPORT_PATH: &str = "/v2/document/extrait_pappers";
/// Company or establishment record.
pub const COMPANY_PATH: &str = "/v2/entreprise";
/// Free-text company search.
pub const SEARCH_PATH: &str = "/v2/recherche";

/// Client for the Pappers company registry.
#[derive(Debug, Clone)]
pub struct PappersClient {
    client: Client,
    base_url: String,
}

impl PappersClient {
    /// Create a client against the production API with the default timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_BASE_URL, None)
    }

    /// Create a client with a custom base URL and timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_url(base_url: impl Into<String>, timeout_secs: Option<u64>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url,
        })
    }

    /// Create a client from the `[pappers]` configuration section.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &PappersConfig) -> Result<Self> {
        Self::with_url(config.base_url.clone(), Some(config.timeout_secs))
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the PDF company extract, base64-encoded.
    ///
    /// The endpoint answers with raw PDF bytes on success and with a JSON
    /// error object otherwise, so a body that parses as JSON is the failure
    /// case.
    pub async fn fetch_report(
        &self,
        api_token: &str,
        code: &str,
        code_type: CodeType,
    ) -> Result<String> {
        check_code(code)?;
        let response = self
            .get(
                REPORT_PATH,
                &[("api_token", api_token), (code_type.query_param(), code)],
            )
            .await?;
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => Err(provider_failure(
                REPORT_PATH,
                &body,
                "report endpoint returned JSON without error fields",
            )),
            Err(_) => {
                debug!(
                    endpoint = REPORT_PATH,
                    size = bytes.len(),
                    "received report document"
                );
                Ok(STANDARD.encode(&bytes))
            }
        }
    }

    /// Fetch the officers of the company owning `siret`, in provider order.
    pub async fn fetch_directors(
        &self,
        api_token: &str,
        siret: &str,
    ) -> Result<Vec<DirectorInfo>> {
        check_code(siret)?;
        let (status, body) = self
            .get_json(COMPANY_PATH, &[("api_token", api_token), ("siret", siret)])
            .await?;

        if status != StatusCode::OK {
            return Err(provider_failure(
                COMPANY_PATH,
                &body,
                format!("HTTP {status} without error fields"),
            ));
        }

        let parsed: DirectorsResponse = decode(COMPANY_PATH, &body)?;
        Ok(parsed.representants.into_iter().map(DirectorInfo::from).collect())
    }

    /// Search companies by name.
    ///
    /// Address fields come from each result's head office. Every result
    /// carries the rendering of the whole response.
    pub async fn search_by_name(
        &self,
        api_token: &str,
        query: &str,
        head_office_only: bool,
    ) -> Result<Vec<LookupResult>> {
        let (_, body) = self
            .get_json(
                SEARCH_PATH,
                &[
                    ("api_token", api_token),
                    ("q", query),
                    ("siege", if head_office_only { "true" } else { "false" }),
                ],
            )
            .await?;

        let parsed: SearchResponse = decode(SEARCH_PATH, &body)?;
        let registry_data = render(&body);
        Ok(parsed
            .resultats
            .into_iter()
            .map(|hit| hit.into_lookup(registry_data.clone()))
            .collect())
    }

    /// Search by SIREN or SIRET.
    ///
    /// 9 to 13 digits list the open establishments of the company (only the
    /// head office with `head_office_only`). 14 digits return the single
    /// establishment. Any other length returns no results without a request.
    pub async fn search_by_code(
        &self,
        api_token: &str,
        code: &str,
        head_office_only: bool,
    ) -> Result<Vec<LookupResult>> {
        let code = CompanyCode::new(code)?;
        match code.code_type() {
            Some(CodeType::Siren) => self.search_siren(api_token, &code, head_office_only).await,
            Some(CodeType::Siret) => self.search_siret(api_token, &code).await,
            None => {
                debug!(length = code.len(), "code length has no registry lookup");
                Ok(Vec::new())
            }
        }
    }

    /// Fetch the full record for `siret` rendered as a text tree.
    pub async fn fetch_company_details(&self, api_token: &str, siret: &str) -> Result<String> {
        check_code(siret)?;
        let (_, body) = self
            .get_json(COMPANY_PATH, &[("api_token", api_token), ("siret", siret)])
            .await?;
        Ok(render(&body))
    }

    async fn search_siren(
        &self,
        api_token: &str,
        siren: &CompanyCode,
        head_office_only: bool,
    ) -> Result<Vec<LookupResult>> {
        let (_, body) = self
            .get_json(
                COMPANY_PATH,
                &[("api_token", api_token), ("siren", siren.as_str())],
            )
            .await?;

        let parsed: CompanyResponse = decode(COMPANY_PATH, &body)?;
        let registry_data = render(&body);
        let CompanyResponse {
            nom_entreprise,
            numero_tva_intracommunautaire,
            etablissements,
        } = parsed;

        Ok(etablissements
            .into_iter()
            .filter(|establishment| establishment.is_selected(head_office_only))
            .map(|establishment| {
                establishment.address.into_lookup(
                    nom_entreprise.clone(),
                    numero_tva_intracommunautaire.clone(),
                    registry_data.clone(),
                )
            })
            .collect())
    }

    async fn search_siret(
        &self,
        api_token: &str,
        siret: &CompanyCode,
    ) -> Result<Vec<LookupResult>> {
        let (_, body) = self
            .get_json(
                COMPANY_PATH,
                &[("api_token", api_token), ("siret", siret.as_str())],
            )
            .await?;

        let parsed: EstablishmentResponse = decode(COMPANY_PATH, &body)?;
        let registry_data = render(&body);
        Ok(vec![parsed.etablissement.into_lookup(
            parsed.nom_entreprise,
            parsed.numero_tva_intracommunautaire,
            registry_data,
        )])
    }

    /// Send a GET with the provider's `Content` header. Parameters are logged
    /// without the token.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        debug!(
            endpoint = path,
            params = ?params.iter().filter(|(key, _)| *key != "api_token").collect::<Vec<_>>(),
            "sending registry request"
        );

        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .header("Content", "application/json")
            .query(params)
            .send()
            .await?;

        debug!(endpoint = path, status = %response.status(), "registry response");
        Ok(response)
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<(StatusCode, Value)> {
        let response = self.get(path, params).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok((status, body))
    }
}

/// Deserialize an expected response shape, falling back to the body's error
/// fields when the shape does not match.
fn decode<T: DeserializeOwned>(endpoint: &str, body: &Value) -> Result<T> {
    <T as Deserialize>::deserialize(body).map_err(|e| provider_failure(endpoint, body, e))
}

fn provider_failure(endpoint: &str, body: &Value, reason: impl std::fmt::Display) -> RegistryError {
    let err = RegistryError::from_error_body(endpoint, body, reason);
    warn!(endpoint, error = %err, "registry lookup failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PappersClient::new().expect("create client");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client =
            PappersClient::with_url("http://localhost:8080/", Some(5)).expect("create client");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_from_config() {
        let config = PappersConfig {
            api_token: "token".to_string(),
            base_url: "http://registry.test".to_string(),
            timeout_secs: 3,
        };
        let client = PappersClient::from_config(&config).expect("create client");
        assert_eq!(client.base_url(), "http://registry.test");
    }

    #[test]
    fn test_decode_missing_key_with_error_body() {
        let body = serde_json::json!({"statusCode": 404, "error": "Entreprise introuvable"});
        let err = decode::<SearchResponse>(SEARCH_PATH, &body).expect_err("missing resultats");
        assert_eq!(err.to_string(), "Erreur 404 :\nEntreprise introuvable");
    }

    #[test]
    fn test_decode_missing_key_without_error_body() {
        let body = serde_json::json!({"total": 0});
        let err = decode::<SearchResponse>(SEARCH_PATH, &body).expect_err("missing resultats");
        assert!(matches!(err, RegistryError::UnexpectedResponse { .. }));
    }
}
