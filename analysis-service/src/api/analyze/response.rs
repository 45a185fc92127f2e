// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze response types

use serde::{Deserialize, Serialize};

use crate::vision::AnalysisResult;

/// Response body for a successful analysis
///
/// `advice` carries the model's `deliverability` judgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub food_type: String,
    pub freshness: String,
    pub advice: String,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            food_type: result.food_type,
            freshness: result.freshness,
            advice: result.deliverability,
        }
    }
}
