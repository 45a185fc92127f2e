// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart extraction of the uploaded image

use axum::{body::Bytes, http::StatusCode};
use axum_extra::extract::{multipart::MultipartError, Multipart};
use tracing::debug;

use crate::api::errors::ApiError;

/// Form field carrying the photo
pub const IMAGE_FIELD: &str = "image";

/// The file part of an analyze request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

fn upload_error(err: MultipartError) -> ApiError {
    debug!("Multipart read failed: {}", err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::UploadTooLarge
    } else {
        ApiError::MalformedUpload
    }
}

/// Pull the first `image` file part out of the form
///
/// Parts without a filename are form values, not files, and are skipped.
pub async fn read_image_field(mut multipart: Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::NoFileSelected);
        }

        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await.map_err(upload_error)?;

        return Ok(ImageUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(ApiError::NoImageUploaded)
}
