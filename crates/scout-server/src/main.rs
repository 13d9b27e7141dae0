//! `scoutd` – the rig's command server.
//!
//! Loads `scout.toml` (path overridable via `SCOUT_CONFIG`), takes an
//! immutable snapshot of the credential file, hands the shield driver to
//! the execution engine, and serves the authenticated HTTP API until the
//! process exits.

use std::path::PathBuf;

use scout_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing-subscriber using RUST_LOG (defaults to "info").
    // Set SCOUT_LOG_FORMAT=json to emit newline-delimited JSON logs
    // suitable for log aggregators.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("SCOUT_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    let config_path = std::env::var("SCOUT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("scout.toml"));
    let config = Config::load(&config_path)?;
    tracing::debug!(?config, "configuration loaded");

    scout_server::serve(config).await
}
