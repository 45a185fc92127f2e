// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Food image analysis endpoint module
//!
//! Provides POST /analyze for judging an uploaded food photo.

pub mod handler;
pub mod response;
pub mod upload;

pub use handler::analyze_handler;
pub use response::AnalyzeResponse;
pub use upload::{read_image_field, ImageUpload, IMAGE_FIELD};
