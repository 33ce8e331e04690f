//! Command handlers for the prompthub binaries.
//!
//! This module organizes the two operations into separate submodules.

pub mod pull;
pub mod push;

// Re-export command types for convenience
pub use pull::{fetch, PullCommand, PullDefaults};
pub use push::{prepare_push, publish, readme, PushCommand, README_PREFIX};
