// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration for the analysis service
//!
//! Every flag falls back to an environment variable. The Gemini key is never
//! compiled in: it comes from `GEMINI_API_KEY` or from a mounted secret file
//! named by `GEMINI_API_KEY_FILE`.

use clap::Parser;
use std::{fs, net::SocketAddr, path::PathBuf, time::Duration};
use thiserror::Error;

use crate::api::http_server::DEFAULT_UPLOAD_LIMIT;
use crate::vision::gemini_client::DEFAULT_API_BASE;

/// Value shipped in sample configs; treated as "not set"
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not set. Provide it via GEMINI_API_KEY or GEMINI_API_KEY_FILE")]
    MissingApiKey,

    #[error("GEMINI_API_KEY still holds the placeholder value")]
    PlaceholderApiKey,

    #[error("failed to read API key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bind address {0}")]
    InvalidBindAddress(String),
}

/// Food image analysis service
#[derive(Parser, Debug, Clone)]
#[command(name = "foodshare-analysis")]
#[command(about = "Food image analysis service backed by a Gemini vision model", long_about = None)]
pub struct AnalysisConfig {
    /// Interface to bind
    #[arg(long, env = "ANALYSIS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "ANALYSIS_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File holding the Gemini API key (secret store mount)
    #[arg(long, env = "GEMINI_API_KEY_FILE")]
    pub api_key_file: Option<PathBuf>,

    /// Gemini REST base URL
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Timeout for each Gemini call, in seconds
    #[arg(long, env = "GEMINI_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_UPLOAD_LIMIT)]
    pub max_upload_bytes: usize,
}

impl AnalysisConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(addr))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key, preferring the inline value over the key file
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        let key = match (&self.api_key, &self.api_key_file) {
            (Some(key), _) if !key.trim().is_empty() => key.trim().to_string(),
            (_, Some(path)) => fs::read_to_string(path)
                .map_err(|source| ConfigError::KeyFile {
                    path: path.clone(),
                    source,
                })?
                .trim()
                .to_string(),
            _ => return Err(ConfigError::MissingApiKey),
        };

        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }
        Ok(key)
    }
}
