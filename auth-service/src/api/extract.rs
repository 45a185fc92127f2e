// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::rejection::JsonRejection, Json};
use tracing::debug;

use super::errors::ApiError;

/// Unwrap a JSON body, mapping axum's rejection onto the service's error bodies
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(ApiError::UnsupportedMediaType),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::MalformedJson(rejection.body_text()))
        }
    }
}
