// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wire body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("No image file uploaded.")]
    NoImageUploaded,

    #[error("No file selected.")]
    NoFileSelected,

    #[error("Malformed upload.")]
    MalformedUpload,

    #[error("Uploaded file is too large.")]
    UploadTooLarge,

    #[error("No valid Gemini vision model is initialized. Please check /models and update the model name in the code.")]
    ModelNotInitialized,

    #[error("AI response was not valid JSON.")]
    InvalidModelReply,

    #[error("Unexpected error during analysis.")]
    AnalysisFailed,

    /// Provider failure surfaced verbatim by the introspection endpoint
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoImageUploaded | ApiError::NoFileSelected | ApiError::MalformedUpload => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ModelNotInitialized
            | ApiError::InvalidModelReply
            | ApiError::AnalysisFailed
            | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
