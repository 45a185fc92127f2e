// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use foodshare_analysis::{
    select_model, start_server, AnalysisConfig, AppState, GeminiClient, VisionApi,
};
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

    let config = AnalysisConfig::parse();
    let api_key = config.resolve_api_key()?;
    let addr = config.bind_addr()?;

    let client = GeminiClient::new(&config.api_base, &api_key, config.timeout())?;
    let vision_api: Arc<dyn VisionApi> = Arc::new(client);

    // Model selection happens exactly once per process
    let selected_model = select_model(vision_api.as_ref()).await;
    match &selected_model {
        Some(model) => info!("Analysis requests will use {}", model.name()),
        None => warn!("Starting server without a valid model. /analyze will fail."),
    }

    let state = AppState::new(vision_api, selected_model);
    start_server(addr, state, config.max_upload_bytes).await
}
