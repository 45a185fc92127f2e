// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Analyze endpoint tests for POST /analyze
//!
//! These tests verify that the analyze handler:
//! - Rejects missing or unnamed uploads before touching the provider
//! - Refuses to run without a startup model
//! - Renames `deliverability` to `advice` and defaults missing fields
//! - Separates non-JSON replies from other provider failures

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use foodshare_analysis::{
    create_app,
    vision::{SelectedModel, FOOD_ANALYSIS_PROMPT},
    AppState,
};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

use crate::support::{
    analyze_request, app_with, body_json, png_bytes, FormPart, StubVisionApi, BOUNDARY,
    TEST_MODEL,
};

const FULL_REPLY: &str =
    r#"{"food_type":"Apple","freshness":"Fresh","deliverability":"Deliverable - Looks clean and ripe."}"#;

#[cfg(test)]
mod analyze_endpoint_tests {
    use super::*;

    // =========================================================================
    // Successful analysis
    // =========================================================================

    #[tokio::test]
    async fn test_analyze_returns_renamed_fields() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "apple.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({
                "food_type": "Apple",
                "freshness": "Fresh",
                "advice": "Deliverable - Looks clean and ripe."
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_sends_prompt_and_image_to_selected_model() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[
                FormPart::text("note", "from the pantry"),
                FormPart::file("image", "apple.png", &png),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(stub.generate_calls(), 1);
        let call = stub.last_call().expect("provider should be called");
        assert_eq!(call.model, TEST_MODEL);
        assert_eq!(call.prompt, FOOD_ANALYSIS_PROMPT);
        assert_eq!(call.image.mime_type, "image/png");
        assert_eq!(call.image.data, png);
    }

    #[tokio::test]
    async fn test_missing_field_defaults_to_unknown() {
        let stub = Arc::new(StubVisionApi::replying(
            r#"{"food_type":"Rice","deliverability":"Deliverable"}"#,
        ));
        let app = app_with(stub, Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "rice.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({"food_type": "Rice", "freshness": "Unknown", "advice": "Deliverable"})
        );
    }

    #[tokio::test]
    async fn test_fenced_reply_is_unwrapped() {
        let fenced = format!("```json\n{}\n```", FULL_REPLY);
        let stub = Arc::new(StubVisionApi::replying(&fenced));
        let app = app_with(stub, Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "apple.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["food_type"], "Apple");
        assert_eq!(body["advice"], "Deliverable - Looks clean and ripe.");
    }

    // =========================================================================
    // Client errors
    // =========================================================================

    #[tokio::test]
    async fn test_no_image_field() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));

        let response = app
            .oneshot(analyze_request(&[FormPart::text("note", "hello")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "No image file uploaded."}));
        assert_eq!(stub.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_image_field_without_filename_is_not_a_file() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));

        let response = app
            .oneshot(analyze_request(&[FormPart::text("image", "not a file")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "No image file uploaded."}));
    }

    #[tokio::test]
    async fn test_non_multipart_request() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"image": "apple.png"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "No image file uploaded."}));
        assert_eq!(stub.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_filename() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "", b"")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "No file selected."}));
        assert_eq!(stub.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_checks_precede_model_check() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub, None);

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "", b"")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Service errors
    // =========================================================================

    #[tokio::test]
    async fn test_no_model_selected() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), None);
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "apple.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "No valid Gemini vision model is initialized. Please check /models and update the model name in the code."})
        );
        assert_eq!(stub.generate_calls(), 0, "provider must not be contacted");
    }

    #[tokio::test]
    async fn test_reply_not_json() {
        let stub = Arc::new(StubVisionApi::replying("This looks like a fresh apple!"));
        let app = app_with(stub, Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "apple.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "AI response was not valid JSON."})
        );
    }

    #[tokio::test]
    async fn test_reply_json_array_is_generic_failure() {
        let stub = Arc::new(StubVisionApi::replying(r#"["Apple", "Fresh"]"#));
        let app = app_with(stub, Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "apple.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Unexpected error during analysis."})
        );
    }

    #[tokio::test]
    async fn test_provider_failure_not_leaked() {
        let stub = Arc::new(StubVisionApi::failing("quota exhausted for project 1234"));
        let app = app_with(stub.clone(), Some(TEST_MODEL));
        let png = png_bytes();

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "apple.png", &png)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({"error": "Unexpected error during analysis."}));
        assert!(!body.to_string().contains("quota"));
        assert_eq!(stub.generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_upload() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));

        let response = app
            .oneshot(analyze_request(&[FormPart::file(
                "image",
                "notes.png",
                b"definitely not image bytes",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Unexpected error during analysis."})
        );
        assert_eq!(stub.generate_calls(), 0);
    }

    // =========================================================================
    // Transport-level upload failures
    // =========================================================================

    #[tokio::test]
    async fn test_oversize_upload_rejected() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let state = AppState::new(stub.clone(), Some(SelectedModel::new(TEST_MODEL)));
        let app = create_app(state, 1024);
        let big = vec![0u8; 4 * 1024];

        let response = app
            .oneshot(analyze_request(&[FormPart::file("image", "huge.png", &big)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Uploaded file is too large."})
        );
        assert_eq!(stub.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_truncated_multipart_rejected() {
        let stub = Arc::new(StubVisionApi::replying(FULL_REPLY));
        let app = app_with(stub.clone(), Some(TEST_MODEL));

        // Part header and data but no closing boundary
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\n\
             Content-Type: image/png\r\n\r\nabc",
            b = BOUNDARY
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Malformed upload."}));
        assert_eq!(stub.generate_calls(), 0);
    }
}
