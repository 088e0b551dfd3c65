//! Tubely API Library
//!
//! This crate provides the HTTP handlers, authentication and application setup
//! for the thumbnail upload service.

// Module declarations
pub mod constants;
mod handlers;
pub mod middleware;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
