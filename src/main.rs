//! Net pay engine HTTP server.
//!
//! Environment:
//! - `NET_PAY_CONFIG_DIR`: rule table directory (default `./config/rulesets`)
//! - `NET_PAY_BIND`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use net_pay_engine::api::{AppState, create_router};
use net_pay_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/rulesets";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        env::var("NET_PAY_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("NET_PAY_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("failed to load rule tables from {}", config_dir))?;
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!(address = %bind_addr, "Net pay engine listening");

    axum::serve(listener, router)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
