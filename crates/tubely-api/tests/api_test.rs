//! Authentication, identifier, and service route tests.
//!
//! Run with: `cargo test -p tubely-api --test api_test`

mod helpers;

use helpers::auth::{bearer, expired_token_for, token_for, token_signed_with};
use helpers::fixtures::{jpeg_bytes, mp4_bytes, thumbnail_form, video_form};
use helpers::setup_test_app;
use uuid::Uuid;

#[tokio::test]
async fn test_non_owner_is_rejected_on_both_endpoints() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let video = app.seed_video(owner).await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", bearer(&token_for(stranger)))
        .multipart(thumbnail_form(jpeg_bytes(256), "image/jpeg"))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_AUTHORIZED");

    let response = app
        .server
        .post(&format!("/videos/{}/video", video.id))
        .add_header("Authorization", bearer(&token_for(stranger)))
        .multipart(video_form(mp4_bytes(256), "video/mp4"))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_AUTHORIZED");

    assert!(app.thumbnails.is_empty().await);
    assert_eq!(app.toolkit.calls(), 0);
    assert_eq!(app.stored_video(video.id).await, video);
}

#[tokio::test]
async fn test_missing_and_invalid_credentials() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner).await;
    let path = format!("/videos/{}/thumbnail", video.id);

    let response = app
        .server
        .post(&path)
        .multipart(thumbnail_form(jpeg_bytes(64), "image/jpeg"))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MISSING_CREDENTIAL");

    let response = app
        .server
        .post(&path)
        .add_header("Authorization", "Token abc")
        .multipart(thumbnail_form(jpeg_bytes(64), "image/jpeg"))
        .await;
    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MISSING_CREDENTIAL");

    for token in [
        expired_token_for(owner),
        token_signed_with(owner, "some-other-secret"),
        "garbage".to_string(),
    ] {
        let response = app
            .server
            .post(&path)
            .add_header("Authorization", bearer(&token))
            .multipart(thumbnail_form(jpeg_bytes(64), "image/jpeg"))
            .await;
        assert_eq!(response.status_code(), 401);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_CREDENTIAL");
    }
}

#[tokio::test]
async fn test_identifier_errors() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();

    let response = app
        .server
        .post("/videos/not-a-uuid/video")
        .add_header("Authorization", bearer(&token_for(user)))
        .multipart(video_form(mp4_bytes(64), "video/mp4"))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_IDENTIFIER");

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", Uuid::new_v4()))
        .add_header("Authorization", bearer(&token_for(user)))
        .multipart(thumbnail_form(jpeg_bytes(64), "image/jpeg"))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RECORD_NOT_FOUND");

    let response = app.server.get("/thumbnails/not-a-uuid").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_credentials_checked_before_identifier() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/videos/not-a-uuid/thumbnail")
        .multipart(thumbnail_form(jpeg_bytes(64), "image/jpeg"))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = setup_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");

    let response = app.server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);
    let doc: serde_json::Value = response.json();
    assert!(doc["paths"]["/videos/{video_id}/thumbnail"]["post"].is_object());
    assert!(doc["paths"]["/videos/{video_id}/video"]["post"].is_object());
    assert!(doc["components"]["schemas"]["Video"].is_object());
}
