// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Food analysis prompt and reply normalisation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder for any field the model leaves out
pub const UNKNOWN: &str = "Unknown";

pub const FOOD_ANALYSIS_PROMPT: &str = concat!(
    "Analyze this food image. Respond ONLY with a single JSON object, no extra text. ",
    "The JSON should contain: ",
    "'food_type' (string), ",
    "'freshness' (e.g., 'Fresh', 'Stale', 'Expired'), ",
    "and 'deliverability' ('Deliverable' or 'Non-deliverable' with a reason). ",
    "Example: {\"food_type\":\"Apple\",\"freshness\":\"Fresh\",\"deliverability\":\"Deliverable - Looks clean and ripe.\"}"
);

const FENCE_MARKERS: &[&str] = &["```json", "```"];

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply is JSON but not an object")]
    NotAnObject,
}

/// Verdict for one uploaded photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub food_type: String,
    pub freshness: String,
    pub deliverability: String,
}

/// Trim the reply and drop every code-fence marker
pub fn clean_reply(reply: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(reply.trim().to_string(), |text, marker| text.replace(marker, ""))
}

/// Missing or null becomes "Unknown"; other non-strings are stringified so every field stays a string
fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Parse a model reply into an `AnalysisResult`
pub fn parse_reply(reply: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(&clean_reply(reply))?;
    let Value::Object(object) = value else {
        return Err(AnalysisError::NotAnObject);
    };

    Ok(AnalysisResult {
        food_type: text_field(&object, "food_type"),
        freshness: text_field(&object, "freshness"),
        deliverability: text_field(&object, "deliverability"),
    })
}
