//! CLI tool to generate an HS256 JWT for local API access.

use anyhow::Context;
use chrono::Duration;
use clap::Parser;
use devutil_cli::config::{non_blank, JWT_SECRET_VAR};
use devutil_cli::{logging, Config};
use devutil_core::token::{TokenSigner, DEFAULT_SUBJECT};

/// Generate a signed JWT with sub, iat and exp claims
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Token subject
    #[arg(long, default_value = DEFAULT_SUBJECT)]
    subject: String,

    /// Signing secret (falls back to JWT_SECRET when absent or blank)
    #[arg(long)]
    secret: Option<String>,

    /// Token expiry in hours
    #[arg(long, default_value_t = 24)]
    expiry: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let secret = non_blank(args.secret)
        .or(config.jwt_secret)
        .with_context(|| format!("no signing secret: pass --secret or set {}", JWT_SECRET_VAR))?;

    let signer = TokenSigner::new(&secret)?.with_ttl(Duration::hours(i64::from(args.expiry)))?;
    let token = signer.sign(&args.subject)?;

    println!("{}", token);
    Ok(())
}
