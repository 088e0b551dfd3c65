//! HTTP client for the Tubely API.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tubely_api::constants::{API_PREFIX, THUMBNAIL_FIELD};
use tubely_core::models::Video;
use uuid::Uuid;

const DEFAULT_API_URL: &str = "http://localhost:8091";

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: String, token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create client from environment: TUBELY_API_URL and TUBELY_TOKEN.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("TUBELY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = std::env::var("TUBELY_TOKEN").context("Missing token. Set TUBELY_TOKEN")?;
        Self::new(base_url, token)
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload `file` as the thumbnail of `video_id`.
    pub async fn upload_thumbnail(
        &self,
        video_id: Uuid,
        file: &Path,
        content_type: &str,
    ) -> Result<Video> {
        let data = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read file: {}", file.display()))?;

        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("thumbnail")
            .to_string();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str(content_type)
            .with_context(|| format!("Invalid content type: {}", content_type))?;
        let form = reqwest::multipart::Form::new().part(THUMBNAIL_FIELD, part);

        let url = self.build_url(&format!("{}/thumbnail_upload/{}", API_PREFIX, video_id));
        tracing::debug!(url = %url, "Uploading thumbnail");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse_response(response).await
    }

    /// Create a video owned by the token's user.
    pub async fn create_video(&self, title: &str, description: &str) -> Result<Video> {
        let url = self.build_url(&format!("{}/videos", API_PREFIX));
        tracing::debug!(url = %url, "Creating video");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "title": title, "description": description }))
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<Video> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }
}
