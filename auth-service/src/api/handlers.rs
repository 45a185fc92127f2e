// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::errors::{ApiError, FieldErrors};
use super::extract::json_body;
use super::http_server::AppState;
use super::register::request::{required_text, BLANK, REQUIRED};
use crate::auth::{verify_password, AuthenticatedUser, TokenPair};
use crate::models::UserProfile;

pub const PING_MESSAGE: &str = "Auth service is working!";

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessResponse {
    pub access: String,
}

pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: PING_MESSAGE.to_string(),
    })
}

pub async fn me_handler(AuthenticatedUser(user): AuthenticatedUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

/// Exchange username and password for a token pair
pub async fn token_handler(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, ApiError> {
    let request = json_body(payload)?;

    let mut errors = FieldErrors::new();
    let username = required_text(&mut errors, "username", request.username.as_deref());
    let password = match request.password {
        Some(p) if !p.is_empty() => Some(p),
        Some(_) => {
            errors.add("password", BLANK);
            None
        }
        None => {
            errors.add("password", REQUIRED);
            None
        }
    };
    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::Validation(errors));
    };

    let user = state
        .store
        .find_by_username(&username)
        .await
        .map_err(|e| {
            error!("User lookup failed: {}", e);
            ApiError::Internal
        })?
        .filter(|user| user.is_active)
        .ok_or(ApiError::InvalidCredentials)?;

    let hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            error!("Password check task failed: {}", e);
            ApiError::Internal
        })?;
    if !matches {
        return Err(ApiError::InvalidCredentials);
    }

    let pair = state.tokens.issue_pair(user.id).map_err(|e| {
        error!("Token signing failed: {}", e);
        ApiError::Internal
    })?;
    info!("Issued tokens for {}", user);
    Ok(Json(pair))
}

/// Mint a fresh access token; the refresh token itself is not rotated
pub async fn refresh_handler(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<AccessResponse>, ApiError> {
    let request = json_body(payload)?;

    let mut errors = FieldErrors::new();
    let Some(refresh) = required_text(&mut errors, "refresh", request.refresh.as_deref()) else {
        return Err(ApiError::Validation(errors));
    };

    let access = state.tokens.refresh_access(&refresh).map_err(|e| {
        debug!("Refresh token rejected: {}", e);
        ApiError::RefreshNotValid
    })?;
    Ok(Json(AccessResponse { access }))
}
