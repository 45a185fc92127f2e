// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use super::request::{RegisterRequest, USERNAME_TAKEN};
use crate::api::errors::{ApiError, FieldErrors};
use crate::api::extract::json_body;
use crate::api::http_server::AppState;
use crate::auth::{hash_password, PasswordError, TokenError};
use crate::models::{NewUser, UserProfile};
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("registration rejected")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(_) => {
                RegistrationError::Invalid(FieldErrors::single("username", USERNAME_TAKEN))
            }
            other => RegistrationError::Store(other),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Invalid(errors) => ApiError::Validation(errors),
            other => {
                error!("Registration failed: {}", other);
                ApiError::Internal
            }
        }
    }
}

/// Validate, hash, persist and issue the first token pair
pub async fn register_user(
    state: &AppState,
    request: RegisterRequest,
) -> Result<RegisterResponse, RegistrationError> {
    let taken = match request.username.as_deref().map(str::trim) {
        Some(username) if !username.is_empty() => {
            state.store.find_by_username(username).await?.is_some()
        }
        _ => false,
    };

    let valid = match request.validate() {
        Ok(valid) if !taken => valid,
        Ok(_) => {
            return Err(RegistrationError::Invalid(FieldErrors::single(
                "username",
                USERNAME_TAKEN,
            )))
        }
        Err(mut errors) => {
            if taken {
                errors.add("username", USERNAME_TAKEN);
            }
            return Err(RegistrationError::Invalid(errors));
        }
    };

    let password = valid.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    // Insert re-checks uniqueness under the write lock
    let user = state
        .store
        .create_user(NewUser {
            username: valid.username,
            email: valid.email,
            password_hash,
            role: valid.role,
            phone: valid.phone,
            organization_name: valid.organization_name,
        })
        .await?;

    let tokens = state.tokens.issue_pair(user.id)?;
    info!("Registered user {}", user);

    Ok(RegisterResponse {
        user: UserProfile::from(&user),
        access: tokens.access,
        refresh: tokens.refresh,
    })
}

pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let request = json_body(payload)?;
    let response = register_user(&state, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
