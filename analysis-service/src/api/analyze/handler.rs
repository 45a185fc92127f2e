// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use tracing::{debug, error, info, warn};

use super::response::AnalyzeResponse;
use super::upload::read_image_field;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::{parse_reply, prepare_inline_image, AnalysisError, FOOD_ANALYSIS_PROMPT};

/// POST /analyze - Judge an uploaded food photo
///
/// # Request
/// - multipart field `image`: the photo, with a non-empty filename
///
/// # Response
/// - `food_type`, `freshness`, `advice` (each "Unknown" when the model omits it)
///
/// # Errors
/// - 400: no `image` file part, or its filename is empty
/// - 500: no model selected at startup, model reply not JSON, or any other
///   decode/provider failure (details are logged, never returned)
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // 1. Validate upload
    let upload = match multipart {
        Ok(multipart) => read_image_field(multipart).await?,
        Err(rejection) => {
            debug!("Analyze request without multipart body: {}", rejection);
            return Err(ApiError::NoImageUploaded);
        }
    };

    // 2. Require the startup model
    let model = state.selected_model.as_ref().ok_or_else(|| {
        warn!("Analyze request rejected: no model selected at startup");
        ApiError::ModelNotInitialized
    })?;

    debug!(
        "Analyzing '{}' ({} bytes, content type {:?}) with {}",
        upload.file_name,
        upload.bytes.len(),
        upload.content_type,
        model.name()
    );

    // 3. Decode image
    let image = prepare_inline_image(&upload.bytes).map_err(|e| {
        error!("Error in /analyze: {}", e);
        ApiError::AnalysisFailed
    })?;

    // 4. Ask the model
    let reply = state
        .vision_api
        .generate_content(model.name(), FOOD_ANALYSIS_PROMPT, &image)
        .await
        .map_err(|e| {
            error!("Error in /analyze: {}", e);
            ApiError::AnalysisFailed
        })?;

    // 5. Normalise reply
    let result = parse_reply(&reply).map_err(|e| match e {
        AnalysisError::InvalidJson(_) => {
            warn!("Invalid JSON from model: {}", reply);
            ApiError::InvalidModelReply
        }
        other => {
            error!("Error in /analyze: {} (reply: {})", other, reply);
            ApiError::AnalysisFailed
        }
    })?;

    info!(
        "Analysis complete: food_type={}, freshness={}",
        result.food_type, result.freshness
    );

    Ok(Json(result.into()))
}
