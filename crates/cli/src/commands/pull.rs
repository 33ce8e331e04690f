//! Pull command handler.
//!
//! Fetches a prompt from the hub, flattens it into a `PromptDocument` and
//! writes it under `prompts/`.

use chrono::NaiveDate;
use clap::Args;
use prompthub_client::{HubClient, QualifiedName};
use prompthub_core::config::{AppConfig, PullConfig};
use prompthub_core::AppResult;
use prompthub_prompt::{save_document, PromptDocument};
use std::path::PathBuf;

/// Pull a prompt from the hub into the prompts directory
#[derive(Args, Debug, Default)]
pub struct PullCommand {
    /// Qualified hub name (`owner/repo`); defaults to the configured source
    pub name: Option<String>,

    /// Output file (default: prompts/<name>.yml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Fields the Fetcher fills in itself rather than taking from the hub.
#[derive(Debug, Clone, PartialEq)]
pub struct PullDefaults {
    pub description: String,
    pub version: String,
    pub tags: Vec<String>,
    pub created_at: NaiveDate,
}

impl PullDefaults {
    pub fn from_config(config: &PullConfig, created_at: NaiveDate) -> Self {
        Self {
            description: config.description.clone(),
            version: config.version.clone(),
            tags: config.tags.clone(),
            created_at,
        }
    }
}

/// Pull `name` and flatten it into a document.
///
/// The first message becomes `system_prompt` and the second `user_prompt`;
/// missing messages leave the field empty. `description`, `version`, `tags`
/// and `created_at` always come from `defaults`.
pub async fn fetch(
    client: &dyn HubClient,
    name: &QualifiedName,
    defaults: &PullDefaults,
) -> AppResult<PromptDocument> {
    let pulled = client.pull(name).await?;
    let template = &pulled.template;

    if template.messages.len() < 2 {
        tracing::warn!(
            "Prompt {} has {} message(s); missing prompts are left empty",
            name,
            template.messages.len()
        );
    }

    let document_name = match pulled.repo_name() {
        Some(repo) => repo.to_string(),
        None => {
            tracing::warn!("Hub metadata has no repository name; using {}", name.repo);
            name.repo.clone()
        }
    };

    Ok(PromptDocument {
        name: document_name,
        description: defaults.description.clone(),
        system_prompt: template.system_text().to_string(),
        user_prompt: template.user_text().to_string(),
        version: defaults.version.clone(),
        created_at: Some(defaults.created_at),
        tags: defaults.tags.clone(),
        techniques: None,
    })
}

impl PullCommand {
    /// Execute the pull command, returning the path written.
    pub async fn execute(&self, config: &AppConfig, client: &dyn HubClient) -> AppResult<PathBuf> {
        tracing::info!("Executing pull command");
        tracing::debug!("Pull options: {:?}", self);

        let source = self.name.as_deref().unwrap_or(&config.pull.source);
        let name = QualifiedName::parse(source)?;

        let defaults = PullDefaults::from_config(&config.pull, chrono::Local::now().date_naive());
        let document = fetch(client, &name, &defaults).await?;

        let path = self.output_path(config, &name);
        save_document(&path, &document)?;

        Ok(path)
    }

    fn output_path(&self, config: &AppConfig, name: &QualifiedName) -> PathBuf {
        match (&self.output, &self.name) {
            (Some(output), _) => config.workspace.join(output),
            (None, Some(_)) => config.document_path(&name.repo),
            (None, None) => config.document_path(&config.pull.file),
        }
    }
}
