//! LangSmith Prompt Hub provider implementation.
//!
//! Prompts are stored as commits on a hub repository. Each commit carries a
//! manifest: a LangChain-serialized `ChatPromptTemplate`.

use crate::client::{HubClient, PulledPrompt, PushRequest, QualifiedName};
use prompthub_core::{AppError, AppResult};
use prompthub_prompt::{ChatTemplate, MessageTemplate, Role};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Latest commit of a hub repository.
#[derive(Debug, Deserialize)]
struct CommitManifest {
    commit_hash: String,
    manifest: Value,
}

/// Repository metadata sent on create and update.
#[derive(Debug, Serialize)]
struct RepoSettings<'a> {
    description: &'a str,
    readme: &'a str,
    tags: &'a [String],
    is_public: bool,
}

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    repo_handle: &'a str,
    #[serde(flatten)]
    settings: RepoSettings<'a>,
}

#[derive(Debug, Serialize)]
struct CreateCommitRequest<'a> {
    manifest: Value,
    parent_commit: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreateCommitResponse {
    commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    commit_hash: String,
}

/// LangSmith hub client.
pub struct LangSmithClient {
    /// Base URL for the REST API
    api_url: String,

    /// Base URL for links to the web UI
    web_url: String,

    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl LangSmithClient {
    pub fn new(
        api_url: impl Into<String>,
        web_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("prompthub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Remote(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            web_url: web_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    fn repo_url(&self, name: &QualifiedName) -> String {
        format!("{}/repos/{}/{}", self.api_url, name.owner, name.repo)
    }

    fn latest_commit_url(&self, name: &QualifiedName) -> String {
        format!("{}/commits/{}/{}/latest", self.api_url, name.owner, name.repo)
    }

    /// Send an authenticated request. `Ok(None)` means 404.
    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<Option<reqwest::Response>> {
        let response = request
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to reach LangSmith: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Remote(format!(
                "LangSmith API error ({}): {}",
                status, error_text
            )));
        }

        Ok(Some(response))
    }

    async fn latest_commit(&self, name: &QualifiedName) -> AppResult<Option<CommitManifest>> {
        let Some(response) = self.send(self.client.get(self.latest_commit_url(name))).await? else {
            return Ok(None);
        };

        let commit = response
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to parse commit for {}: {}", name, e)))?;

        Ok(Some(commit))
    }

    /// Create the repository, or update its metadata when it exists.
    async fn upsert_repo(&self, request: &PushRequest) -> AppResult<()> {
        let settings = RepoSettings {
            description: &request.description,
            readme: &request.readme,
            tags: &request.tags,
            is_public: request.is_public,
        };
        let repo_url = self.repo_url(&request.name);

        if self.send(self.client.get(&repo_url)).await?.is_some() {
            tracing::debug!("Updating repository {}", request.name);
            self.send(self.client.patch(&repo_url).json(&settings))
                .await?
                .ok_or_else(|| AppError::Remote(format!("Repository {} disappeared", request.name)))?;
        } else {
            tracing::info!("Creating repository {}", request.name);
            let body = CreateRepoRequest {
                repo_handle: &request.name.repo,
                settings,
            };
            self.send(self.client.post(format!("{}/repos/", self.api_url)).json(&body))
                .await?
                .ok_or_else(|| {
                    AppError::Remote(format!("Cannot create repository {}", request.name))
                })?;
        }

        Ok(())
    }

    fn prompt_url(&self, name: &QualifiedName, commit_hash: &str) -> String {
        let short = commit_hash.get(..8).unwrap_or(commit_hash);
        format!("{}/prompts/{}/{}", self.web_url, name.repo, short)
    }
}

#[async_trait::async_trait]
impl HubClient for LangSmithClient {
    fn provider_name(&self) -> &str {
        "langsmith"
    }

    async fn pull(&self, name: &QualifiedName) -> AppResult<PulledPrompt> {
        tracing::info!("Pulling prompt {} from LangSmith", name);

        let commit = self
            .latest_commit(name)
            .await?
            .ok_or_else(|| AppError::Remote(format!("Prompt {} not found on the hub", name)))?;

        tracing::debug!("Latest commit of {}: {}", name, commit.commit_hash);

        let template = parse_manifest(&commit.manifest)?;

        let mut metadata = BTreeMap::new();
        metadata.insert("lc_hub_owner".to_string(), name.owner.clone());
        metadata.insert("lc_hub_repo".to_string(), name.repo.clone());
        metadata.insert("lc_hub_commit_hash".to_string(), commit.commit_hash);

        Ok(PulledPrompt { template, metadata })
    }

    async fn push(&self, request: &PushRequest) -> AppResult<String> {
        tracing::info!("Pushing prompt {} to LangSmith", request.name);

        self.upsert_repo(request).await?;

        let parent = self.latest_commit(&request.name).await?;
        let body = CreateCommitRequest {
            manifest: build_manifest(&request.template),
            parent_commit: parent.as_ref().map(|c| c.commit_hash.as_str()),
        };

        let commit_url = format!(
            "{}/commits/{}/{}",
            self.api_url, request.name.owner, request.name.repo
        );
        let response = self
            .send(self.client.post(commit_url).json(&body))
            .await?
            .ok_or_else(|| AppError::Remote(format!("Repository {} not found", request.name)))?;

        let created: CreateCommitResponse = response
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Failed to parse commit response: {}", e)))?;

        tracing::debug!("Created commit {}", created.commit.commit_hash);

        Ok(self.prompt_url(&request.name, &created.commit.commit_hash))
    }
}

fn class_name(role: Role) -> &'static str {
    match role {
        Role::System => "SystemMessagePromptTemplate",
        Role::Human => "HumanMessagePromptTemplate",
        Role::Ai => "AIMessagePromptTemplate",
    }
}

/// Serialize a chat template as a LangChain `ChatPromptTemplate`.
fn build_manifest(template: &ChatTemplate) -> Value {
    let messages: Vec<Value> = template
        .messages
        .iter()
        .map(|message| {
            json!({
                "lc": 1,
                "type": "constructor",
                "id": ["langchain", "prompts", "chat", class_name(message.role)],
                "kwargs": {
                    "prompt": {
                        "lc": 1,
                        "type": "constructor",
                        "id": ["langchain", "prompts", "prompt", "PromptTemplate"],
                        "kwargs": {
                            "input_variables": message.input_variables(),
                            "template": message.template,
                            "template_format": "f-string"
                        }
                    }
                }
            })
        })
        .collect();

    json!({
        "lc": 1,
        "type": "constructor",
        "id": ["langchain", "prompts", "chat", "ChatPromptTemplate"],
        "kwargs": {
            "input_variables": template.input_variables(),
            "messages": messages
        }
    })
}

/// Read a LangChain `ChatPromptTemplate` manifest.
fn parse_manifest(manifest: &Value) -> AppResult<ChatTemplate> {
    let messages = manifest
        .pointer("/kwargs/messages")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Remote("Prompt manifest is not a chat prompt template".to_string()))?;

    Ok(ChatTemplate::new(messages.iter().map(parse_message).collect()))
}

fn parse_message(message: &Value) -> MessageTemplate {
    let class = message
        .get("id")
        .and_then(Value::as_array)
        .and_then(|id| id.last())
        .and_then(Value::as_str)
        .unwrap_or_default();

    let role = if class.starts_with("System") {
        Role::System
    } else if class.starts_with("AI") {
        Role::Ai
    } else {
        Role::Human
    };

    // Templates carry a nested PromptTemplate; plain messages carry content.
    let template = message
        .pointer("/kwargs/prompt/kwargs/template")
        .or_else(|| message.pointer("/kwargs/content"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    MessageTemplate::new(role, template)
}
