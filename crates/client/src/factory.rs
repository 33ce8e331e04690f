//! Hub client factory.
//!
//! Builds the configured hub client, resolving the credential from the
//! application configuration.

use crate::client::HubClient;
use crate::providers::LangSmithClient;
use prompthub_core::{AppConfig, AppResult};
use std::sync::Arc;

/// Create the hub client described by `config`.
///
/// # Errors
/// - `MissingConfiguration` listing every required variable that is unset
/// - `Remote` if the HTTP client cannot be initialised
pub fn create_client(config: &AppConfig) -> AppResult<Arc<dyn HubClient>> {
    let api_key = config.require_credentials()?;

    tracing::debug!("Creating LangSmith client for {}", config.api_url);

    let client = LangSmithClient::new(&config.api_url, &config.web_url, api_key)?;
    Ok(Arc::new(client))
}
