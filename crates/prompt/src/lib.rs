//! Prompt documents for prompthub.
//!
//! This crate provides:
//! - The flat `PromptDocument` model persisted as YAML
//! - Loading and saving documents under `prompts/`
//! - `ChatTemplate`, the multi-message shape the hub stores
//! - The publish-readiness `validator`

pub mod document;
pub mod loader;
pub mod template;
pub mod validator;

// Re-export main types
pub use document::PromptDocument;
pub use loader::{list_documents, load_document, save_document};
pub use template::{input_variables, ChatTemplate, MessageTemplate, Role};
pub use validator::{validate, Rule, ValidationReport, Violation, MIN_TECHNIQUES};
