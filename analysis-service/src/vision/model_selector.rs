// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Startup selection of the model used for every analysis request
//!
//! The choice is made once, before the server binds, and is never revisited.
//! Enumeration failures leave the service running without a model so that
//! `/analyze` can report the problem instead of the process refusing to start.

use tracing::{error, info, warn};

use super::backend::{RemoteModel, VisionApi};

/// Generation method a model must advertise to accept prompt + image input
pub const GENERATE_CONTENT: &str = "generateContent";

/// Substrings that mark a model as image-oriented
const VISION_MARKERS: &[&str] = &["vision", "image"];

/// The model identifier fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedModel {
    name: String,
}

impl SelectedModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of filtering a model listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    /// A capable model whose name carries a vision marker
    Preferred(String),
    /// First capable model; it may not accept images
    Fallback(String),
}

impl ModelChoice {
    pub fn name(&self) -> &str {
        match self {
            ModelChoice::Preferred(name) | ModelChoice::Fallback(name) => name,
        }
    }
}

/// Pick a model from `models`, preferring vision-marked ones
pub fn choose_model(models: &[RemoteModel]) -> Option<ModelChoice> {
    let capable: Vec<&RemoteModel> = models
        .iter()
        .filter(|m| m.supports(GENERATE_CONTENT))
        .collect();

    if let Some(model) = capable
        .iter()
        .find(|m| VISION_MARKERS.iter().any(|marker| m.name.contains(marker)))
    {
        return Some(ModelChoice::Preferred(model.name.clone()));
    }

    capable
        .first()
        .map(|m| ModelChoice::Fallback(m.name.clone()))
}

/// Query the provider and fix the model for this process
pub async fn select_model(api: &dyn VisionApi) -> Option<SelectedModel> {
    let models = match api.list_models().await {
        Ok(models) => models,
        Err(e) => {
            error!("Error creating model: {}", e);
            return None;
        }
    };

    match choose_model(&models) {
        Some(ModelChoice::Preferred(name)) => {
            info!("Using model: {}", name);
            Some(SelectedModel::new(name))
        }
        Some(ModelChoice::Fallback(name)) => {
            warn!("Using fallback model: {}", name);
            Some(SelectedModel::new(name))
        }
        None => {
            error!(
                "No valid Gemini model found for this API key ({} models listed)",
                models.len()
            );
            None
        }
    }
}
