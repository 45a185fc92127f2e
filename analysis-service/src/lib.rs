// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Food image analysis service
//!
//! Forwards uploaded food photos to a hosted Gemini vision model and returns
//! a normalised `{food_type, freshness, advice}` verdict.

pub mod api;
pub mod config;
pub mod vision;

pub use api::http_server::{create_app, start_server, AppState};
pub use config::AnalysisConfig;
pub use vision::{select_model, GeminiClient, SelectedModel, VisionApi};
