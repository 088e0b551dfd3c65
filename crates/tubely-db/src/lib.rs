//! Tubely database layer
//!
//! Repositories for the records the API reads and writes.

pub mod db;

pub use db::video::{VideoRepository, VideoStore};

#[cfg(any(test, feature = "test-helpers"))]
pub use db::memory::MemoryVideoStore;
