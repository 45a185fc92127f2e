// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bearer access-token authentication for handlers

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{debug, error};

use super::tokens::TokenType;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::models::User;

/// The caller resolved from a valid access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// `Ok(None)` when no bearer credentials were sent at all
fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| ApiError::TokenNotValid)?;

    let mut pieces = value.split_whitespace();
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(scheme), Some(token), None) if scheme == "Bearer" => Ok(Some(token)),
        (Some(scheme), _, _) if scheme == "Bearer" => Err(ApiError::TokenNotValid),
        _ => Ok(None),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts)?.ok_or(ApiError::NotAuthenticated)?;

        let claims = state.tokens.verify(token, TokenType::Access).map_err(|e| {
            debug!("Access token rejected: {}", e);
            ApiError::TokenNotValid
        })?;

        let user = state
            .store
            .find_by_id(claims.user_id)
            .await
            .map_err(|e| {
                error!("User lookup failed: {}", e);
                ApiError::Internal
            })?
            .ok_or(ApiError::UserNotFound)?;

        if !user.is_active {
            return Err(ApiError::UserInactive);
        }
        Ok(Self(user))
    }
}
