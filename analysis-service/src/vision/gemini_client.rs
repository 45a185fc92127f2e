// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini REST client for model listing and image-grounded generation

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use super::backend::{InlineImage, RemoteModel, VisionApi};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Largest page the listing endpoint accepts
const LIST_PAGE_SIZE: u32 = 1000;

/// Errors raised while talking to the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request to Gemini API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini reply contained no text ({0})")]
    EmptyReply(String),
}

// --- Gemini REST serde structs ---

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelEntry {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(serde::Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(serde::Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Result<String, GeminiError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(GeminiError::EmptyReply(
                block_reason.unwrap_or_else(|| "no candidates".to_string()),
            ));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "empty content".to_string());
            return Err(GeminiError::EmptyReply(reason));
        }
        Ok(text)
    }
}

/// Client for the Gemini generative language REST API
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let api_base = api_base.trim().trim_end_matches('/').to_string();
        info!("Gemini client configured: api_base={}", api_base);

        Ok(Self {
            client,
            api_base,
            api_key: api_key.to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn generate_url(&self, model: &str) -> String {
        let model = model.trim();
        if model.starts_with("models/") {
            format!("{}/{}:generateContent", self.api_base, model)
        } else {
            format!("{}/models/{}:generateContent", self.api_base, model)
        }
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, GeminiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GeminiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl VisionApi for GeminiClient {
    async fn list_models(&self) -> Result<Vec<RemoteModel>, GeminiError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(format!("{}/models", self.api_base))
                .header("x-goog-api-key", &self.api_key)
                .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = Self::checked(request.send().await?).await?;
            let page: ListModelsResponse = response.json().await?;
            debug!("Gemini model page: {} entries", page.models.len());

            models.extend(page.models.into_iter().map(|m| RemoteModel {
                name: m.name,
                methods: m.supported_generation_methods,
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(models)
    }

    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        image: &InlineImage,
    ) -> Result<String, GeminiError> {
        let start = std::time::Instant::now();

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: STANDARD.encode(&image.data),
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let response = Self::checked(response).await?;
        let reply: GenerateContentResponse = response.json().await?;
        let text = reply.into_text()?;

        debug!(
            "Gemini generateContent complete: model={}, {} chars, {}ms",
            model,
            text.len(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}
