// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Gemini client against a local stand-in for the REST API

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use foodshare_analysis::vision::{GeminiClient, InlineImage, RemoteModel, VisionApi};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const API_KEY: &str = "gemini-test-key";

#[derive(Clone, Default)]
struct Recorded {
    list_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    generate_paths: Arc<Mutex<Vec<String>>>,
    generate_bodies: Arc<Mutex<Vec<Value>>>,
}

fn key_ok(headers: &HeaderMap) -> bool {
    headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

async fn list_models(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !key_ok(&headers) {
        return Err((StatusCode::FORBIDDEN, "API key not valid".to_string()));
    }
    let page_token = query.get("pageToken").cloned();
    recorded.list_queries.lock().unwrap().push(query);

    match page_token.as_deref() {
        None => Ok(Json(json!({
            "models": [
                {
                    "name": "models/gemini-1.0-pro",
                    "supportedGenerationMethods": ["generateContent"]
                },
                { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] }
            ],
            "nextPageToken": "page-2"
        }))),
        Some("page-2") => Ok(Json(json!({
            "models": [
                {
                    "name": "models/gemini-pro-vision",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                }
            ]
        }))),
        Some(other) => Err((StatusCode::BAD_REQUEST, format!("unknown page {}", other))),
    }
}

async fn generate(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(action): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !key_ok(&headers) {
        return Err((StatusCode::FORBIDDEN, "API key not valid".to_string()));
    }
    recorded.generate_paths.lock().unwrap().push(action);
    recorded.generate_bodies.lock().unwrap().push(body);

    Ok(Json(json!({
        "candidates": [{
            "content": { "parts": [{"text": "{\"food_type\": "}, {"text": "\"Rice\"}"}] },
            "finishReason": "STOP"
        }]
    })))
}

async fn spawn_stub() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/v1beta/models", get(list_models))
        // The whole `<model>:generateContent` segment lands in one capture
        .route("/v1beta/models/:action", post(generate))
        .with_state(recorded.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, recorded)
}

fn client_for(addr: SocketAddr, key: &str) -> GeminiClient {
    GeminiClient::new(
        &format!("http://{}/v1beta/", addr),
        key,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_list_models_follows_page_token() {
    let (addr, recorded) = spawn_stub().await;
    let client = client_for(addr, API_KEY);

    let models = client.list_models().await.unwrap();

    assert_eq!(
        models,
        vec![
            RemoteModel::new("models/gemini-1.0-pro", &["generateContent"]),
            RemoteModel::new("models/embedding-001", &["embedContent"]),
            RemoteModel::new("models/gemini-pro-vision", &["generateContent", "countTokens"]),
        ]
    );

    let queries = recorded.list_queries.lock().unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].get("pageToken"), None);
    assert_eq!(queries[0].get("pageSize").map(String::as_str), Some("1000"));
    assert_eq!(queries[1].get("pageToken").map(String::as_str), Some("page-2"));
}

#[tokio::test]
async fn test_list_models_rejected_key() {
    let (addr, recorded) = spawn_stub().await;
    let client = client_for(addr, "wrong-key");

    let err = client.list_models().await.unwrap_err();
    assert_eq!(err.to_string(), "Gemini API returned HTTP 403: API key not valid");
    assert!(recorded.list_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_content_posts_to_model_url() {
    let (addr, recorded) = spawn_stub().await;
    let client = client_for(addr, API_KEY);
    let image = InlineImage {
        mime_type: "image/png",
        data: vec![1, 2, 3],
    };

    let text = client
        .generate_content("models/gemini-pro-vision", "describe", &image)
        .await
        .unwrap();
    assert_eq!(text, "{\"food_type\": \"Rice\"}");

    assert_eq!(
        *recorded.generate_paths.lock().unwrap(),
        vec!["gemini-pro-vision:generateContent".to_string()]
    );
    let bodies = recorded.generate_bodies.lock().unwrap();
    let parts = &bodies[0]["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], "describe");
    assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
    assert_eq!(parts[1]["inline_data"]["data"], "AQID");
}

#[tokio::test]
async fn test_generate_content_rejected_key() {
    let (addr, recorded) = spawn_stub().await;
    let client = client_for(addr, "wrong-key");
    let image = InlineImage {
        mime_type: "image/jpeg",
        data: vec![0xFF, 0xD8],
    };

    let err = client
        .generate_content("gemini-pro-vision", "describe", &image)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("HTTP 403"));
    assert!(recorded.generate_paths.lock().unwrap().is_empty());
}
