//! Database repositories for data access layer
//!
//! Each repository is responsible for a single table. Handlers depend on the
//! repository traits so they can run against an in-memory store in tests.

pub mod video;

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
