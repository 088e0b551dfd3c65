//! In-memory `VideoStore` for testing without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tubely_core::models::Video;
use tubely_core::AppError;
use uuid::Uuid;

use super::video::VideoStore;

/// Mock video store backed by a `HashMap`.
///
/// Failures can be switched on to exercise error paths.
#[derive(Clone, Default)]
pub struct MemoryVideoStore {
    videos: Arc<Mutex<HashMap<Uuid, Video>>>,
    fail_gets: Arc<AtomicBool>,
    fail_updates: Arc<AtomicBool>,
    update_count: Arc<AtomicUsize>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, video: Video) {
        self.videos.lock().unwrap().insert(video.id, video);
    }

    pub fn video(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    pub fn set_fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `update_video` calls.
    pub fn update_count(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn create_video(&self, video: &Video) -> Result<Video, AppError> {
        self.insert(video.clone());
        Ok(video.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated lookup failure".to_string()));
        }
        Ok(self.video(id))
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated update failure".to_string()));
        }
        let mut videos = self.videos.lock().unwrap();
        match videos.get_mut(&video.id) {
            Some(existing) => {
                *existing = video.clone();
                self.update_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Video {} not found", video.id))),
        }
    }
}
