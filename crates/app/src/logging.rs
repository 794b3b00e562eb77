//! Logging setup
//!
//! Diagnostics go to stderr so stdout carries only the cafeteria's
//! observation lines.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `cafeteria=info`)
//! - `CAFE_LOG_FORMAT`: `pretty` (default) or `json`

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "cafeteria=info";

pub fn init_logging() -> Result<()> {
    let log_format = std::env::var("CAFE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install JSON subscriber")?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install subscriber")?;
        }
    }
    Ok(())
}
