// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for food image analysis
//!
//! This module provides:
//! - The `VisionApi` seam and its Gemini REST implementation
//! - Startup model selection
//! - Upload decoding into inline image payloads
//! - The food analysis prompt and reply normalisation

pub mod backend;
pub mod food_analysis;
pub mod gemini_client;
pub mod image_utils;
pub mod model_selector;

pub use backend::{InlineImage, RemoteModel, VisionApi};
pub use food_analysis::{parse_reply, AnalysisError, AnalysisResult, FOOD_ANALYSIS_PROMPT};
pub use gemini_client::{GeminiClient, GeminiError};
pub use image_utils::{decode_image_bytes, detect_format, prepare_inline_image, ImageError, ImageInfo};
pub use model_selector::{choose_model, select_model, ModelChoice, SelectedModel};
