//! Prompt hub client for prompthub.
//!
//! This crate hides the remote prompt hub behind the narrow `HubClient`
//! trait: `pull` a chat template by qualified name, `push` a template with
//! its metadata.
//!
//! # Providers
//! - **LangSmith**: the LangSmith Prompt Hub REST API
//! - **Mock**: in-memory client for tests
//!
//! # Example
//! ```no_run
//! use prompthub_client::{HubClient, QualifiedName, providers::LangSmithClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LangSmithClient::new(
//!     "https://api.smith.langchain.com",
//!     "https://smith.langchain.com",
//!     "lsv2_...",
//! )?;
//! let pulled = client.pull(&QualifiedName::parse("leonanluppi/bug_to_user_story_v1")?).await?;
//! println!("{}", pulled.template.system_text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod mock;
pub mod providers;

// Re-export main types
pub use client::{HubClient, PulledPrompt, PushRequest, QualifiedName, OWN_TENANT};
pub use factory::create_client;
pub use mock::MockHubClient;
pub use providers::LangSmithClient;
