// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared helpers for auth service integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use foodshare_auth::{create_app, AppState, InMemoryUserStore, TokenService};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tower::util::ServiceExt;

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const TEST_PASSWORD: &str = "plenty-of-bread";

pub fn token_service() -> TokenService {
    TokenService::new(
        TEST_SECRET,
        Duration::from_secs(300),
        Duration::from_secs(86_400),
    )
}

/// App plus a handle on its store
pub fn test_app() -> (Router, InMemoryUserStore) {
    let store = InMemoryUserStore::new();
    let state = AppState::new(Arc::new(store.clone()), token_service());
    (create_app(state), store)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register `username` with the shared test password and return the 201 body
pub async fn register(app: &Router, username: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/register",
            &json!({"username": username, "password": TEST_PASSWORD}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
