//! msl-authcheck — issue and verify user authentication data.
//!
//! * `issue` signs a master token and a bound user ID token and prints the
//!   resulting `USER_ID_TOKEN` user authentication data.
//! * `verify` runs a user authentication data document through the parse
//!   pipeline and reports the outcome together with the response code a
//!   server would send back.

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use msl_tokens::{JsonObject, SignedTokenFactory, TokenIssuer};
use msl_userauth::{
    AuthenticationData, TokenContext, UserAuthenticationData, UserIdTokenAuthenticationData,
};
use tracing::{error, info, warn};

use crate::config::AppConfig;

/// Issue and verify MSL user authentication data.
#[derive(Parser, Debug)]
#[command(name = "msl-authcheck", about = "Issue and verify MSL user authentication data")]
struct Args {
    /// nkeys account seed of the token issuer (overrides `MSL_ISSUER_SEED`).
    #[arg(long, global = true)]
    seed: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a bound master token / user ID token pair.
    Issue {
        /// Entity the master token is issued to.
        #[arg(long)]
        identity: String,
        /// User the user ID token is issued to.
        #[arg(long)]
        user: String,
    },
    /// Parse and verify user authentication data.
    Verify {
        /// JSON file holding `{"scheme": ..., "authdata": ...}`.
        #[arg(long)]
        file: PathBuf,
        /// Issuer public key; derived from the seed when omitted.
        #[arg(long)]
        public_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if args.seed.is_some() {
        config.issuer_seed = args.seed;
    }

    let result = match args.command {
        Command::Issue { identity, user } => issue(&config, &identity, &user),
        Command::Verify { file, public_key } => verify(&config, &file, public_key).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "command failed");
            ExitCode::FAILURE
        }
    }
}

fn issuer(config: &AppConfig) -> Result<TokenIssuer> {
    let issuer = match &config.issuer_seed {
        Some(seed) => TokenIssuer::from_seed(seed)?,
        None => {
            warn!("no issuer seed configured, using an ephemeral key");
            TokenIssuer::generate()
        }
    };
    Ok(issuer.with_ttls(config.master_token_ttl, config.user_id_token_ttl))
}

fn issue(config: &AppConfig, identity: &str, user: &str) -> Result<ExitCode> {
    let issuer = issuer(config)?;
    info!(public_key = %issuer.public_key(), "issuer ready");

    let master_token = issuer.issue_master_token(identity)?;
    let user_id_token = issuer.issue_user_id_token(&master_token, user)?;
    let data: UserAuthenticationData =
        UserIdTokenAuthenticationData::new(master_token, user_id_token)?.into();

    println!("{}", serde_json::to_string_pretty(&data.to_json())?);
    Ok(ExitCode::SUCCESS)
}

async fn verify(config: &AppConfig, file: &Path, public_key: Option<String>) -> Result<ExitCode> {
    let public_key = match public_key {
        Some(key) => key,
        None => {
            let seed = config
                .issuer_seed
                .as_deref()
                .context("either --public-key or an issuer seed is required")?;
            TokenIssuer::from_seed(seed)?.public_key()
        }
    };

    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let jo: JsonObject = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON object", file.display()))?;

    let ctx = TokenContext::new(SignedTokenFactory::new(&public_key)?);
    match UserAuthenticationData::parse(&ctx, &jo).await {
        Ok(data) => {
            info!(scheme = %data.scheme(), "user authentication data accepted");
            println!("accepted: {}", data.scheme());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let code = e.error_code();
            warn!(
                error = %e,
                internal_code = code.internal_code(),
                response_code = %e.response_code(),
                "user authentication data rejected"
            );
            println!("rejected: {e} (response code {})", e.response_code().as_u8());
            Ok(ExitCode::FAILURE)
        }
    }
}
