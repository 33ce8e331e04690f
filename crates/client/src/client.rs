//! Hub client abstraction and request/response types.

use prompthub_core::{AppError, AppResult};
use prompthub_prompt::ChatTemplate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Owner placeholder meaning "the tenant the credential belongs to".
pub const OWN_TENANT: &str = "-";

/// Metadata key carrying the hub repository name of a pulled prompt.
pub const REPO_METADATA_KEY: &str = "lc_hub_repo";

/// A hub prompt identifier, `<owner>/<repo>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedName {
    pub owner: String,
    pub repo: String,
}

impl QualifiedName {
    /// Parse `owner/repo` or a bare `repo` (owned by the caller's tenant).
    pub fn parse(name: &str) -> AppResult<Self> {
        let name = name.trim();
        let (owner, repo) = match name.split_once('/') {
            Some((owner, repo)) => (owner.trim(), repo.trim()),
            None => (OWN_TENANT, name),
        };

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(AppError::Config(format!(
                "Invalid prompt name '{}': expected '<owner>/<repo>' or '<repo>'",
                name
            )));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A chat template pulled from the hub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulledPrompt {
    pub template: ChatTemplate,

    /// Hub-side metadata (`lc_hub_owner`, `lc_hub_repo`, `lc_hub_commit_hash`)
    pub metadata: BTreeMap<String, String>,
}

impl PulledPrompt {
    /// Repository name reported by the hub, if any.
    pub fn repo_name(&self) -> Option<&str> {
        self.metadata
            .get(REPO_METADATA_KEY)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Everything needed to publish a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub name: QualifiedName,
    pub template: ChatTemplate,
    pub tags: Vec<String>,
    pub description: String,
    pub readme: String,

    /// Visibility for a newly created repository
    pub is_public: bool,
}

/// Trait for prompt hub providers.
#[async_trait::async_trait]
pub trait HubClient: Send + Sync {
    /// Get the provider name (e.g., "langsmith").
    fn provider_name(&self) -> &str;

    /// Fetch the latest version of a prompt.
    ///
    /// # Errors
    /// `AppError::Remote` when the hub is unreachable, rejects the
    /// credential, or does not know the prompt.
    async fn pull(&self, name: &QualifiedName) -> AppResult<PulledPrompt>;

    /// Publish a prompt, returning a URL to the new version.
    async fn push(&self, request: &PushRequest) -> AppResult<String>;
}
