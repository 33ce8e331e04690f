//! Push command handler.
//!
//! Loads a prompt document, validates it and publishes it to the hub.
//! Nothing reaches the network unless the document loads and passes every
//! validation rule.

use clap::Args;
use prompthub_client::{HubClient, PushRequest, QualifiedName};
use prompthub_core::{config::AppConfig, AppError, AppResult};
use prompthub_prompt::{list_documents, load_document, validate, ChatTemplate, PromptDocument};
use std::path::PathBuf;

/// Label preceding the technique list in the hub readme.
pub const README_PREFIX: &str = "Técnicas aplicadas: ";

/// Publish a prompt document to the hub
#[derive(Args, Debug, Default)]
pub struct PushCommand {
    /// Prompt document to publish (default: prompts/<push.file>.yml)
    pub file: Option<PathBuf>,
}

/// Hub readme listing the techniques a document applies.
pub fn readme(document: &PromptDocument) -> String {
    format!("{}{}", README_PREFIX, document.techniques().join(", "))
}

/// Check a document and build the request that publishes it.
///
/// # Errors
/// - `MalformedDocument` if `name` is empty or not a hub name
/// - `Validation` with every violated rule
pub fn prepare_push(document: &PromptDocument, is_public: bool) -> AppResult<PushRequest> {
    if document.name.trim().is_empty() {
        return Err(AppError::MalformedDocument(
            "Field 'name' is missing or empty".to_string(),
        ));
    }

    let name = QualifiedName::parse(&document.name)
        .map_err(|e| AppError::MalformedDocument(e.to_string()))?;

    let report = validate(document);
    if !report.is_valid() {
        for violation in &report.violations {
            tracing::warn!("Validation failed ({:?}): {}", violation.rule, violation);
        }
        return Err(AppError::Validation(report.messages()));
    }

    Ok(PushRequest {
        name,
        template: ChatTemplate::from_document(document),
        tags: document.tags.clone(),
        description: document.description.clone(),
        readme: readme(document),
        is_public,
    })
}

/// Validate and publish a document, returning the hub URL.
///
/// Any failure from the hub is reported as `AppError::Remote`.
pub async fn publish(
    client: &dyn HubClient,
    document: &PromptDocument,
    is_public: bool,
) -> AppResult<String> {
    let request = prepare_push(document, is_public)?;

    tracing::info!(
        "Publishing {} via {} ({} tags)",
        request.name,
        client.provider_name(),
        request.tags.len()
    );

    client.push(&request).await.map_err(|e| match e {
        AppError::Remote(message) => AppError::Remote(message),
        other => AppError::Remote(other.to_string()),
    })
}

impl PushCommand {
    /// Execute the push command, returning the hub URL.
    pub async fn execute(&self, config: &AppConfig, client: &dyn HubClient) -> AppResult<String> {
        tracing::info!("Executing push command");
        tracing::debug!("Push options: {:?}", self);

        let path = self.document_path(config);

        let document = match load_document(&path) {
            Ok(document) => document,
            Err(AppError::MissingDocument(missing)) => {
                let available = list_documents(&config.prompts_path()).unwrap_or_default();
                if !available.is_empty() {
                    eprintln!("Available documents: {}", available.join(", "));
                }
                return Err(AppError::MissingDocument(missing));
            }
            Err(e) => return Err(e),
        };

        publish(client, &document, config.public).await
    }

    fn document_path(&self, config: &AppConfig) -> PathBuf {
        match &self.file {
            Some(file) => config.workspace.join(file),
            None => config.document_path(&config.push.file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme() {
        let document = PromptDocument {
            techniques: Some(vec!["few-shot".to_string(), "role-prompting".to_string()]),
            ..PromptDocument::default()
        };
        assert_eq!(readme(&document), "Técnicas aplicadas: few-shot, role-prompting");
        assert_eq!(readme(&PromptDocument::default()), "Técnicas aplicadas: ");
    }

    #[test]
    fn test_default_document_path() {
        let config = AppConfig {
            workspace: PathBuf::from("/work"),
            ..AppConfig::default()
        };
        assert_eq!(
            PushCommand::default().document_path(&config),
            PathBuf::from("/work/prompts/bug_to_user_story_v2.yml")
        );
    }

    #[test]
    fn test_empty_name_is_malformed() {
        let document = PromptDocument::new("  ");
        assert!(matches!(
            prepare_push(&document, false),
            Err(AppError::MalformedDocument(_))
        ));
    }
}
