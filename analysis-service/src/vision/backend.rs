// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Seam between the HTTP layer and the hosted vision model

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::gemini_client::GeminiError;

/// One entry of the provider's model listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteModel {
    /// Fully qualified model identifier, e.g. `models/gemini-pro-vision`
    pub name: String,
    /// Supported generation methods, e.g. `generateContent`
    pub methods: Vec<String>,
}

impl RemoteModel {
    pub fn new(name: impl Into<String>, methods: &[&str]) -> Self {
        Self {
            name: name.into(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn supports(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m == method)
    }
}

/// Image bytes ready to be sent inline alongside a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

/// Operations the service needs from the hosted model provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionApi: Send + Sync {
    /// Enumerate every model visible to the configured credential
    async fn list_models(&self) -> Result<Vec<RemoteModel>, GeminiError>;

    /// Send a prompt plus one image to `model` and return the reply text
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String, GeminiError>;
}
