// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration for the auth service
//!
//! The signing secret comes from `JWT_SECRET` or from a mounted secret file
//! named by `JWT_SECRET_FILE`.

use clap::Parser;
use std::{fs, net::SocketAddr, path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET not set. Provide it via JWT_SECRET or JWT_SECRET_FILE")]
    MissingSecret,

    #[error("failed to read secret file {path}: {source}")]
    SecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bind address {0}")]
    InvalidBindAddress(String),

    #[error("token lifetime must be positive: {0}")]
    InvalidLifetime(&'static str),
}

/// Registration and token service
#[derive(Parser, Debug, Clone)]
#[command(name = "foodshare-auth")]
#[command(about = "User registration and JWT issuing service", long_about = None)]
pub struct AuthConfig {
    /// Interface to bind
    #[arg(long, env = "AUTH_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "AUTH_PORT", default_value_t = 8000)]
    pub port: u16,

    /// HMAC secret used to sign tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// File holding the signing secret
    #[arg(long, env = "JWT_SECRET_FILE")]
    pub jwt_secret_file: Option<PathBuf>,

    /// Access token lifetime in seconds
    #[arg(long, env = "ACCESS_TOKEN_TTL_SECS", default_value_t = 300)]
    pub access_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[arg(long, env = "REFRESH_TOKEN_TTL_SECS", default_value_t = 86_400)]
    pub refresh_ttl_secs: u64,
}

impl AuthConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(addr))
    }

    pub fn access_ttl(&self) -> Result<Duration, ConfigError> {
        positive(self.access_ttl_secs, "access")
    }

    pub fn refresh_ttl(&self) -> Result<Duration, ConfigError> {
        positive(self.refresh_ttl_secs, "refresh")
    }

    /// Resolve the signing secret, preferring the inline value over the file
    pub fn resolve_secret(&self) -> Result<String, ConfigError> {
        let secret = match (&self.jwt_secret, &self.jwt_secret_file) {
            (Some(secret), _) if !secret.trim().is_empty() => secret.trim().to_string(),
            (_, Some(path)) => fs::read_to_string(path)
                .map_err(|source| ConfigError::SecretFile {
                    path: path.clone(),
                    source,
                })?
                .trim()
                .to_string(),
            _ => return Err(ConfigError::MissingSecret),
        };

        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(secret)
    }
}

fn positive(secs: u64, which: &'static str) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidLifetime(which));
    }
    Ok(Duration::from_secs(secs))
}
