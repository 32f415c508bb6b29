//! MSK IAM auth token generator CLI.
//!
//! Generates a single SASL auth token for an MSK cluster and prints it to
//! stdout, which is handy for smoke-testing broker IAM setups and for shell
//! pipelines that feed tokens to other tools.
//!
//! # Usage
//!
//! ```text
//! AWS_REGION=us-west-2 msk-iam-auth-cli
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_REGION` | *(required)* | Region of the MSK cluster |
//! | `AWS_PROFILE_NAME` | *(unset)* | Named profile to load credentials from |
//! | `ROLE_ARN` | *(unset)* | Role to assume for temporary credentials |
//! | `SESSION_NAME` | *(unset)* | Session name for the assumed role |
//! | `STS_REGION` | *(unset)* | Region for the STS client, if different |
//! | `DEBUG_CREDS` | `false` | Log the resolved identity at debug level |
//! | `LOG_LEVEL` | `warn` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use msk_iam_auth::SignerOptions;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Read an optional environment variable, treating empty values as unset.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Build [`SignerOptions`] from the process environment.
fn options_from_env() -> Result<SignerOptions> {
    let region = env_opt("AWS_REGION")
        .or_else(|| env_opt("AWS_DEFAULT_REGION"))
        .context("AWS_REGION must be set")?;

    let options = SignerOptions {
        aws_profile: env_opt("AWS_PROFILE_NAME"),
        role_arn: env_opt("ROLE_ARN"),
        sts_session_name: env_opt("SESSION_NAME"),
        sts_region: env_opt("STS_REGION"),
        aws_debug_creds: env_opt("DEBUG_CREDS")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
        ..SignerOptions::new(region)
    };

    options.validate()?;
    Ok(options)
}

/// Read the log level from the environment.
fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&log_level())?;

    let options = options_from_env()?;
    debug!(?options, "generating auth token");

    let (token, expiration) = msk_iam_auth::generate_auth_token_with_options(&options)
        .await
        .context("failed to generate auth token")?;

    debug!(%expiration, "token generated");
    println!("{token}");

    Ok(())
}
