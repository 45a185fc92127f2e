// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::analyze::analyze_handler;
use super::handlers::{models_handler, ping_handler};
use crate::vision::{SelectedModel, VisionApi};

/// Default cap on request bodies (10MB)
pub const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Shared handler state
///
/// `selected_model` is fixed before the router is built and never replaced.
#[derive(Clone)]
pub struct AppState {
    pub vision_api: Arc<dyn VisionApi>,
    pub selected_model: Option<Arc<SelectedModel>>,
}

impl AppState {
    pub fn new(vision_api: Arc<dyn VisionApi>, selected_model: Option<SelectedModel>) -> Self {
        Self {
            vision_api,
            selected_model: selected_model.map(Arc::new),
        }
    }
}

pub fn create_app(state: AppState, upload_limit: usize) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/models", get(models_handler))
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, state: AppState, upload_limit: usize) -> Result<()> {
    let app = create_app(state, upload_limit);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Analysis server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Analysis server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
