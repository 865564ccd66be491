//! CoreFF command-line host.
//!
//! Loads the configuration, runs a single registry lookup and prints the
//! result. Records are printed as JSON, text trees and URLs as-is.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand, ValueEnum};
use coreff_core::{AppConfig, CodeType};
use coreff_pappers::{creditsafe, PappersClient};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "coreff")]
#[command(about = "Company lookups against French business registries", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pappers API token (overrides the configuration)
    #[arg(long, global = true, env = "COREFF_PAPPERS_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the PDF company extract
    Report {
        /// SIREN or SIRET
        code: String,
        /// Registry number type
        #[arg(long, value_enum, default_value_t = CodeKind::Siren)]
        code_type: CodeKind,
        /// Write the decoded PDF here instead of printing base64
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List company officers
    Directors {
        /// SIRET of any establishment of the company
        siret: String,
    },
    /// Search companies by name
    SearchName {
        /// Free-text company name
        query: String,
        /// Only return head offices
        #[arg(long)]
        head_office_only: bool,
    },
    /// Search by SIREN or SIRET
    SearchCode {
        /// 9 to 14 digit registry number
        code: String,
        /// Only return the head office
        #[arg(long)]
        head_office_only: bool,
    },
    /// Print the full registry record as a text tree
    Details {
        /// SIRET
        siret: String,
    },
    /// Print the Creditsafe search link for a company name
    CreditsafeUrl {
        /// Company name
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CodeKind {
    Siren,
    Siret,
}

impl From<CodeKind> for CodeType {
    fn from(kind: CodeKind) -> Self {
        match kind {
            CodeKind::Siren => Self::Siren,
            CodeKind::Siret => Self::Siret,
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load config")?,
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands, client: &PappersClient, token: &str) -> Result<()> {
    if token.is_empty() && !matches!(command, Commands::CreditsafeUrl { .. }) {
        bail!("No Pappers API token: set pappers.api_token or COREFF_PAPPERS_API_TOKEN");
    }

    match command {
        Commands::Report {
            code,
            code_type,
            output,
        } => {
            let encoded = client.fetch_report(token, &code, code_type.into()).await?;
            match output {
                Some(path) => {
                    let bytes = STANDARD.decode(&encoded)?;
                    std::fs::write(&path, bytes)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Report written to {}", path.display());
                }
                None => println!("{encoded}"),
            }
        }
        Commands::Directors { siret } => {
            print_json(&client.fetch_directors(token, &siret).await?)?;
        }
        Commands::SearchName {
            query,
            head_office_only,
        } => {
            print_json(&client.search_by_name(token, &query, head_office_only).await?)?;
        }
        Commands::SearchCode {
            code,
            head_office_only,
        } => {
            print_json(&client.search_by_code(token, &code, head_office_only).await?)?;
        }
        Commands::Details { siret } => {
            print!("{}", client.fetch_company_details(token, &siret).await?);
        }
        Commands::CreditsafeUrl { name } => {
            println!("{}", creditsafe::search_url(Some(&name))?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    init_tracing(&config.logging.filter);
    info!("Starting coreff v{}", env!("CARGO_PKG_VERSION"));

    let token = cli
        .token
        .unwrap_or_else(|| config.pappers.api_token.clone());
    let client = PappersClient::from_config(&config.pappers)?;
    run(cli.command, &client, &token).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_code() {
        let cli = Cli::try_parse_from(["coreff", "search-code", "552100554", "--head-office-only"])
            .expect("parse args");
        match cli.command {
            Commands::SearchCode {
                code,
                head_office_only,
            } => {
                assert_eq!(code, "552100554");
                assert!(head_office_only);
            }
            _ => panic!("expected search-code"),
        }
    }

    #[test]
    fn test_parse_report_code_type() {
        let cli = Cli::try_parse_from([
            "coreff",
            "report",
            "55210055400013",
            "--code-type",
            "siret",
        ])
        .expect("parse args");
        match cli.command {
            Commands::Report { code_type, .. } => {
                assert_eq!(CodeType::from(code_type), CodeType::Siret);
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[pappers]\napi_token = \"file-token\"\nbase_url = \"http://registry.test\"\n",
        )
        .expect("write config");

        let config = load_config(Some(&path)).expect("load config");
        assert_eq!(config.pappers.base_url, "http://registry.test");
    }

    #[tokio::test]
    async fn test_run_requires_token() {
        let client =
            PappersClient::with_url("http://127.0.0.1:9", Some(1)).expect("create client");
        let command = Commands::Directors {
            siret: "55210055400013".to_string(),
        };

        let err = run(command, &client, "").await.expect_err("missing token");
        assert!(err.to_string().contains("No Pappers API token"));
    }
}
