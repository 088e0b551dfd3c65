//! Test helpers: build AppState and router for integration tests.
//!
//! Videos live in a `MemoryVideoStore`; thumbnails are written to a temporary
//! directory that is removed when the `TestApp` is dropped.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::Duration;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::make_jwt;
use tubely_api::setup::routes;
use tubely_api::AppState;
use tubely_core::models::Video;
use tubely_core::Config;
use tubely_db::MemoryVideoStore;
use tubely_storage::LocalAssetStore;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_PUBLIC_BASE_URL: &str = "http://localhost:8091";

/// Test application: server, video store and the assets directory.
pub struct TestApp {
    pub server: TestServer,
    pub videos: MemoryVideoStore,
    pub assets_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn assets_path(&self) -> &Path {
        self.assets_dir.path()
    }

    /// Files currently in the assets directory.
    pub fn asset_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.assets_path())
            .expect("read assets dir")
            .map(|entry| entry.expect("dir entry").path())
            .collect()
    }

    /// Insert a video owned by `owner` and return it.
    pub fn seed_video(&self, owner: Uuid) -> Video {
        let video = Video::new(owner, "Boots the cat", "A short clip");
        self.videos.insert(video.clone());
        video
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup test app, overriding configuration values with `overrides`.
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let assets_dir = TempDir::new().expect("create temp dir");
    let assets_root = assets_dir.path().to_string_lossy().to_string();

    let mut vars: Vec<(String, String)> = vec![
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        (
            "DATABASE_URL".to_string(),
            "postgres://localhost/tubely_test".to_string(),
        ),
        ("ASSETS_ROOT".to_string(), assets_root),
        ("PUBLIC_BASE_URL".to_string(), TEST_PUBLIC_BASE_URL.to_string()),
    ];
    for (key, value) in overrides {
        vars.retain(|(k, _)| k.as_str() != *key);
        vars.push((key.to_string(), value.to_string()));
    }

    let config = Config::from_lookup(move |key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config");

    let videos = MemoryVideoStore::new();
    let assets = LocalAssetStore::new(assets_dir.path())
        .await
        .expect("asset store");

    let state = Arc::new(AppState::new(
        &config,
        Arc::new(videos.clone()),
        Arc::new(assets),
    ));
    let router = routes::setup_routes(&config, state).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        videos,
        assets_dir,
    }
}

/// `Authorization` header value for a fresh token issued to `user_id`.
pub fn bearer_for(user_id: Uuid) -> String {
    let token = make_jwt(user_id, TEST_JWT_SECRET, Duration::hours(1)).expect("sign token");
    format!("Bearer {}", token)
}

pub fn upload_path(video_id: impl std::fmt::Display) -> String {
    format!("/api/thumbnail_upload/{}", video_id)
}

/// Multipart form with a single `thumbnail` part.
pub fn thumbnail_form(data: Vec<u8>, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(data)
        .file_name("thumbnail")
        .mime_type(mime_type);
    MultipartForm::new().add_part("thumbnail", part)
}
