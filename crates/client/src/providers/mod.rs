//! Hub provider implementations.

pub mod langsmith;

pub use langsmith::LangSmithClient;
