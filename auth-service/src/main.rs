// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use foodshare_auth::{start_server, AppState, AuthConfig, InMemoryUserStore, TokenService};
use std::{env, sync::Arc};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = AuthConfig::parse();
    let secret = config.resolve_secret()?;
    let addr = config.bind_addr()?;

    let tokens = TokenService::new(secret.as_bytes(), config.access_ttl()?, config.refresh_ttl()?);
    info!(
        "Token lifetimes: access {}s, refresh {}s",
        config.access_ttl_secs, config.refresh_ttl_secs
    );
    warn!("Users are kept in memory and are lost on restart");

    let state = AppState::new(Arc::new(InMemoryUserStore::new()), tokens);
    start_server(addr, state).await
}
