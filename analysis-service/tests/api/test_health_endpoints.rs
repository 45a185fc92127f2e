// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /ping and GET /models

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::support::{app_with, body_json, StubVisionApi, TEST_MODEL};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_ping() {
    let app = app_with(Arc::new(StubVisionApi::replying("{}")), None);

    let response = app.oneshot(get("/ping")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Backend is working!"}));
}

#[tokio::test]
async fn test_models_lists_every_model() {
    let stub = Arc::new(StubVisionApi::replying("{}"));
    let app = app_with(stub.clone(), Some(TEST_MODEL));

    let response = app.oneshot(get("/models")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 3, "incapable models are listed too");
    assert_eq!(models[0], json!({"name": "models/embedding-001", "methods": ["embedContent"]}));
    assert_eq!(models[2]["name"], TEST_MODEL);
    assert_eq!(stub.list_calls(), 1);
}

#[tokio::test]
async fn test_models_requeries_without_startup_model() {
    let stub = Arc::new(StubVisionApi::replying("{}"));
    let app = app_with(stub.clone(), None);

    let response = app.oneshot(get("/models")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stub.list_calls(), 1);
}

#[tokio::test]
async fn test_models_error_message() {
    let stub = Arc::new(StubVisionApi::replying("{}").with_listing_error("API key not valid"));
    let app = app_with(stub, None);

    let response = app.oneshot(get("/models")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Gemini API returned HTTP 403: API key not valid"})
    );
}
