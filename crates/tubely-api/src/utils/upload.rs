//! Common utilities for the thumbnail upload handler

use crate::constants::{ALLOWED_THUMBNAIL_TYPES, MAX_THUMBNAIL_MEMORY_BYTES};
use axum::extract::Multipart;
use std::io::{Cursor, SeekFrom};
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncSeekExt, AsyncWriteExt};
use tubely_core::AppError;

/// Leading bytes kept for the signature check.
const HEAD_BYTES: usize = 8;

#[derive(Debug)]
enum UploadBody {
    Memory(Vec<u8>),
    Spooled(tokio::fs::File),
}

/// A file part pulled out of a multipart body.
///
/// Content stays in memory up to [`MAX_THUMBNAIL_MEMORY_BYTES`] and is
/// moved to an anonymous temporary file past that.
#[derive(Debug)]
pub struct UploadedFile {
    /// Part `Content-Type` header as sent, parameters included.
    pub content_type: Option<String>,
    pub size_bytes: u64,
    head: Vec<u8>,
    body: UploadBody,
}

impl UploadedFile {
    fn new(content_type: Option<String>) -> Self {
        Self {
            content_type,
            size_bytes: 0,
            head: Vec::with_capacity(HEAD_BYTES),
            body: UploadBody::Memory(Vec::new()),
        }
    }

    async fn append(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        if self.head.len() < HEAD_BYTES {
            let take = (HEAD_BYTES - self.head.len()).min(chunk.len());
            self.head.extend_from_slice(&chunk[..take]);
        }
        self.size_bytes += chunk.len() as u64;

        let spill = match &mut self.body {
            UploadBody::Memory(buffer) if buffer.len() + chunk.len() > MAX_THUMBNAIL_MEMORY_BYTES => {
                Some(std::mem::take(buffer))
            }
            UploadBody::Memory(buffer) => {
                buffer.extend_from_slice(chunk);
                return Ok(());
            }
            UploadBody::Spooled(_) => None,
        };

        if let Some(buffered) = spill {
            let mut file = tokio::fs::File::from_std(tempfile::tempfile()?);
            file.write_all(&buffered).await?;
            tracing::debug!(size_bytes = buffered.len(), "Upload spilled to temporary file");
            self.body = UploadBody::Spooled(file);
        }

        if let UploadBody::Spooled(file) = &mut self.body {
            file.write_all(chunk).await?;
        }
        Ok(())
    }

    /// First bytes of the content, at most eight.
    pub fn head(&self) -> &[u8] {
        &self.head
    }

    pub fn is_spooled(&self) -> bool {
        matches!(self.body, UploadBody::Spooled(_))
    }

    /// Reader over the full content, from the first byte.
    pub async fn into_reader(self) -> std::io::Result<Pin<Box<dyn AsyncRead + Send + Unpin>>> {
        match self.body {
            UploadBody::Memory(data) => Ok(Box::pin(Cursor::new(data))),
            UploadBody::Spooled(mut file) => {
                file.flush().await?;
                file.seek(SeekFrom::Start(0)).await?;
                Ok(Box::pin(file))
            }
        }
    }
}

/// Extract the first file field named `field_name` from a multipart form.
/// Other fields, and plain values without a filename, are skipped.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<UploadedFile, AppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Couldn't parse multipart form: {}", e)))?
    {
        if field.name() != Some(field_name) || field.file_name().is_none() {
            continue;
        }

        let mut upload = UploadedFile::new(field.content_type().map(|s| s.to_string()));
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Failed to read file data: {}", e)))?
        {
            upload.append(&chunk).await?;
        }

        return Ok(upload);
    }

    Err(AppError::InvalidRequest(format!(
        "Missing form file '{}'",
        field_name
    )))
}

/// Normalize MIME type by stripping parameters (e.g. "image/png; charset=binary" -> "image/png").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate a part content type against the thumbnail allowlist.
pub fn validate_thumbnail_type(content_type: Option<&str>) -> Result<ThumbnailType, AppError> {
    let normalized = content_type.map(normalize_mime_type).unwrap_or_default();
    match normalized.as_str() {
        "image/jpeg" => Ok(ThumbnailType::Jpeg),
        "image/png" => Ok(ThumbnailType::Png),
        _ => Err(AppError::InvalidRequest(format!(
            "Invalid content type. Allowed types: {}",
            ALLOWED_THUMBNAIL_TYPES.join(", ")
        ))),
    }
}

/// Check that the leading bytes match the declared media type.
pub fn validate_signature(kind: ThumbnailType, data: &[u8]) -> Result<(), AppError> {
    if !data.starts_with(kind.magic_bytes()) {
        return Err(AppError::InvalidRequest(format!(
            "File content does not match declared type {}",
            kind.mime_type()
        )));
    }
    Ok(())
}
