//! `loan-scout`: run a single scoring-gateway call from the command line.
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use loan_scout_gateway::{
    AssetRecommendationRequest, Config, GatewayError, ScoringGateway, ScoringRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "loan-scout", version, about = "Query the loan scout scoring backend")]
struct Cli {
    /// Overrides SCORING_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score an applicant (POST /api/credit/score).
    CreditScore {
        /// JSON request body, or `-` for stdin.
        file: PathBuf,
    },
    /// Financial-health score (POST /api/financial-health/score).
    FinancialHealth { file: PathBuf },
    /// Portfolio recommendation (POST /api/asset-management/recommendation).
    AssetRecommendation { file: PathBuf },
    /// Probe GET /health.
    Health,
    /// Backend library versions (GET /api/system-info).
    SystemInfo,
}

/// Failure classes mapped to the process exit code.
enum Failure {
    Gateway(GatewayError),
    Setup(anyhow::Error),
}

impl From<GatewayError> for Failure {
    fn from(err: GatewayError) -> Self {
        Failure::Gateway(err)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Failure::Setup(err)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_scout_gateway=info,loan_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Gateway(err)) => {
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
        Err(Failure::Setup(err)) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    let config = load_config(cli.api_url)?;
    let gateway = ScoringGateway::new(&config)?;

    match cli.command {
        Command::CreditScore { file } => {
            let request: ScoringRequest = read_request(&file)?;
            print_json(&gateway.get_credit_score(&request).await?)?;
        }
        Command::FinancialHealth { file } => {
            let request: ScoringRequest = read_request(&file)?;
            print_json(&gateway.get_financial_health(&request).await?)?;
        }
        Command::AssetRecommendation { file } => {
            let request: AssetRecommendationRequest = read_request(&file)?;
            print_json(&gateway.get_asset_recommendation(&request).await?)?;
        }
        Command::Health => {
            let status = gateway.health_check().await?;
            if !status.is_healthy() {
                tracing::warn!("Backend reported status '{}'", status.status);
            }
            print_json(&status)?;
        }
        Command::SystemInfo => {
            print_json(&gateway.system_info().await?)?;
        }
    }

    Ok(())
}

fn load_config(api_url: Option<String>) -> anyhow::Result<Config> {
    match api_url {
        Some(url) => {
            dotenvy::dotenv().ok();
            Config::from_lookup(|key| match key {
                "SCORING_API_URL" => Some(url.clone()),
                other => std::env::var(other).ok(),
            })
        }
        None => Config::from_env(),
    }
}

fn read_request<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?
    };

    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid request body in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render result")?;
    println!("{}", rendered);
    Ok(())
}
