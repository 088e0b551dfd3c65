//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnail_upload_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use chrono::Duration;
use helpers::fixtures::{create_minimal_gif, create_minimal_jpeg, create_minimal_png};
use helpers::{
    bearer_for, setup_test_app, setup_test_app_with, thumbnail_form, upload_path,
    TEST_JWT_SECRET, TEST_PUBLIC_BASE_URL,
};
use tubely_api::auth::make_jwt;
use uuid::Uuid;

#[tokio::test]
async fn test_owner_uploads_png_end_to_end() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);
    let png = create_minimal_png();

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(png.clone(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], video.id.to_string());
    assert_eq!(body["user_id"], owner.to_string());

    let url = body["thumbnail_url"].as_str().expect("thumbnail_url");
    let prefix = format!("{}/assets/", TEST_PUBLIC_BASE_URL);
    assert!(url.starts_with(&prefix), "unexpected url {}", url);
    assert!(url.ends_with(".png"));

    let filename = &url[prefix.len()..];
    let (stem, _) = filename.rsplit_once('.').expect("extension");
    assert_eq!(stem.len(), 43);

    let files = app.asset_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0], app.assets_path().join(filename));
    assert_eq!(std::fs::read(&files[0]).unwrap(), png);

    let stored = app.videos.video(video.id).expect("video");
    assert_eq!(stored.thumbnail_url.as_deref(), Some(url));
    assert!(stored.updated_at >= video.updated_at);
}

#[tokio::test]
async fn test_uploaded_thumbnail_is_served() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);
    let png = create_minimal_png();

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(png.clone(), "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    let url = body["thumbnail_url"].as_str().unwrap().to_string();
    let path = &url[TEST_PUBLIC_BASE_URL.len()..];

    let asset = app.client().get(path).await;
    assert_eq!(asset.status_code(), StatusCode::OK);
    assert_eq!(asset.as_bytes().to_vec(), png);
}

#[tokio::test]
async fn test_jpeg_gets_jpeg_extension() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_jpeg(), "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body["thumbnail_url"].as_str().unwrap().ends_with(".jpeg"));

    let files = app.asset_files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].extension().unwrap(), "jpeg");
}

#[tokio::test]
async fn test_content_type_parameters_are_ignored() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "IMAGE/PNG; charset=binary"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(app.asset_files().len(), 1);
}

#[tokio::test]
async fn test_repeat_upload_creates_new_file() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let first = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let first_url = first.json::<serde_json::Value>()["thumbnail_url"]
        .as_str()
        .unwrap()
        .to_string();

    let second = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_jpeg(), "image/jpeg"))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);
    let second_url = second.json::<serde_json::Value>()["thumbnail_url"]
        .as_str()
        .unwrap()
        .to_string();

    assert_ne!(first_url, second_url);
    assert_eq!(app.asset_files().len(), 2);

    let stored = app.videos.video(video.id).unwrap();
    assert_eq!(stored.thumbnail_url.as_deref(), Some(second_url.as_str()));
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path("not-a-uuid"))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid ID");
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(app.asset_files().is_empty());
    assert_eq!(app.videos.update_count(), 0);
}

#[tokio::test]
async fn test_malformed_id_reported_before_missing_token() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&upload_path("12345"))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_missing_token_wins_over_bad_body() {
    let app = setup_test_app().await;
    let video = app.seed_video(Uuid::new_v4());

    let response = app
        .client()
        .post(&upload_path(video.id))
        .text("definitely not multipart")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_tokens_are_unauthorized() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let expired = make_jwt(owner, TEST_JWT_SECRET, Duration::hours(-1)).unwrap();
    let wrong_secret =
        make_jwt(owner, "some-other-secret-that-is-32-chars-long!", Duration::hours(1)).unwrap();

    for header in [
        format!("Bearer {}", expired),
        format!("Bearer {}", wrong_secret),
        "Bearer garbage".to_string(),
        "Token abc".to_string(),
    ] {
        let response = app
            .client()
            .post(&upload_path(video.id))
            .add_header("Authorization", header.clone())
            .multipart(thumbnail_form(create_minimal_png(), "image/png"))
            .await;
        assert_eq!(
            response.status_code(),
            StatusCode::UNAUTHORIZED,
            "header {} should be rejected",
            header
        );
    }

    assert!(app.asset_files().is_empty());
    assert_eq!(app.videos.update_count(), 0);
}

#[tokio::test]
async fn test_non_owner_is_unauthorized() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let video = app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(intruder))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "User is not the video owner");
    assert!(app.asset_files().is_empty());
    assert_eq!(app.videos.video(video.id).unwrap().thumbnail_url, None);
}

#[tokio::test]
async fn test_disallowed_type_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    for mime in ["image/gif", "text/plain", "application/octet-stream"] {
        let response = app
            .client()
            .post(&upload_path(video.id))
            .add_header("Authorization", bearer_for(owner))
            .multipart(thumbnail_form(create_minimal_gif(), mime))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", mime);
    }

    assert!(app.asset_files().is_empty());
    assert_eq!(app.videos.update_count(), 0);
}

#[tokio::test]
async fn test_missing_thumbnail_field_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(create_minimal_png()).mime_type("image/png"),
    );
    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .text("definitely not multipart")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

async fn upload_sized(app: &helpers::TestApp, size: usize) -> Vec<u8> {
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let mut data = create_minimal_png();
    data.resize(size, 0x5A);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(data.clone(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    data
}

#[tokio::test]
async fn test_upload_of_exactly_ten_mebibytes_is_accepted() {
    let app = setup_test_app().await;
    let data = upload_sized(&app, 10 << 20).await;

    let files = app.asset_files();
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read(&files[0]).unwrap(), data);
}

#[tokio::test]
async fn test_upload_over_memory_threshold_is_accepted() {
    let app = setup_test_app().await;
    let data = upload_sized(&app, 12 << 20).await;

    let files = app.asset_files();
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read(&files[0]).unwrap(), data);
}

#[tokio::test]
async fn test_thumbnail_part_without_filename_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let form = MultipartForm::new().add_part(
        "thumbnail",
        Part::bytes(create_minimal_png()).mime_type("image/png"),
    );
    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(app.asset_files().is_empty());
    assert_eq!(app.videos.update_count(), 0);
}

#[tokio::test]
async fn test_production_errors_omit_details() {
    let app = setup_test_app_with(&[
        ("ENVIRONMENT", "production"),
        ("CORS_ORIGINS", "http://localhost:3000"),
    ])
    .await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post(&upload_path("not-a-uuid"))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid ID");
    assert_eq!(body["code"], "INVALID_REQUEST");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[tokio::test]
async fn test_development_errors_include_details() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();

    let response = app
        .client()
        .post(&upload_path("not-a-uuid"))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error_type"], "InvalidRequest");
    assert!(body.get("details").is_some());
}

#[tokio::test]
async fn test_unknown_video_is_not_found() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();

    let response = app
        .client()
        .post(&upload_path(Uuid::new_v4()))
        .add_header("Authorization", bearer_for(user))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_lookup_failure_is_internal_error() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);
    app.videos.set_fail_gets(true);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert_eq!(body["error"], "Internal server error");
    assert!(body.get("details").is_none());
    assert!(app.asset_files().is_empty());
}

#[tokio::test]
async fn test_update_failure_removes_written_file() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);
    app.videos.set_fail_updates(true);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.asset_files().is_empty());
    assert_eq!(app.videos.video(video.id).unwrap().thumbnail_url, None);
}

#[tokio::test]
async fn test_signature_check_rejects_mismatched_bytes() {
    let app = setup_test_app_with(&[("THUMBNAIL_VERIFY_SIGNATURE", "true")]).await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_gif(), "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.asset_files().is_empty());

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(create_minimal_png(), "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_header_type_trusted_without_signature_check() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.seed_video(owner);
    let bytes = b"not an image at all".to_vec();

    let response = app
        .client()
        .post(&upload_path(video.id))
        .add_header("Authorization", bearer_for(owner))
        .multipart(thumbnail_form(bytes.clone(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let files = app.asset_files();
    assert_eq!(files.len(), 1);
    assert_eq!(std::fs::read(&files[0]).unwrap(), bytes);
}
