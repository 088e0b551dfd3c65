//! Video repository: reads and updates rows of the videos table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::models::Video;
use tubely_core::AppError;
use uuid::Uuid;

/// Trait for video record operations
/// This abstracts the database implementation (PostgreSQL)
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert a new video record.
    async fn create_video(&self, video: &Video) -> Result<Video, AppError>;

    /// Fetch a video by id. `Ok(None)` when no such record exists.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist every mutable field of `video`. Fails with `NotFound` if the row is gone.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;
}

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, created_at, updated_at, thumbnail_url, video_url";

/// PostgreSQL-backed video repository.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        let query = format!(
            r#"
            INSERT INTO videos (id, user_id, title, description, created_at, updated_at, thumbnail_url, video_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );
        let row = sqlx::query_as::<Postgres, Video>(&query)
            .bind(video.id)
            .bind(video.user_id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.created_at)
            .bind(video.updated_at)
            .bind(&video.thumbnail_url)
            .bind(&video.video_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);
        let row = sqlx::query_as::<Postgres, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = $2,
                description = $3,
                updated_at = $4,
                thumbnail_url = $5,
                video_url = $6
            WHERE id = $1
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.updated_at)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Video {} not found", video.id)));
        }

        Ok(())
    }
}
