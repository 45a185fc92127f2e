// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::ApiError;
use super::http_server::AppState;
use crate::vision::RemoteModel;

pub const PING_MESSAGE: &str = "Backend is working!";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelsResponse {
    pub models: Vec<RemoteModel>,
}

/// GET /ping - Liveness check
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: PING_MESSAGE.to_string(),
    })
}

/// GET /models - Models visible to the configured credential
///
/// Always re-queries the provider; the startup selection is not consulted.
pub async fn models_handler(
    State(state): State<AppState>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state.vision_api.list_models().await.map_err(|e| {
        warn!("Model listing failed: {}", e);
        ApiError::Upstream(e.to_string())
    })?;

    Ok(Json(ModelsResponse { models }))
}
