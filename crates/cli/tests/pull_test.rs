//! Fetcher behaviour against a mock hub.

use chrono::NaiveDate;
use prompthub::commands::{fetch, PullCommand, PullDefaults};
use prompthub_client::{MockHubClient, PulledPrompt, QualifiedName};
use prompthub_core::config::{AppConfig, PullConfig};
use prompthub_core::AppError;
use prompthub_prompt::{load_document, save_document, ChatTemplate, MessageTemplate, Role};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn pulled(messages: Vec<MessageTemplate>, repo: Option<&str>) -> PulledPrompt {
    let mut metadata = BTreeMap::new();
    if let Some(repo) = repo {
        metadata.insert("lc_hub_repo".to_string(), repo.to_string());
    }
    PulledPrompt {
        template: ChatTemplate::new(messages),
        metadata,
    }
}

fn two_messages() -> Vec<MessageTemplate> {
    vec![
        MessageTemplate::new(Role::System, "Você é um Product Manager."),
        MessageTemplate::new(Role::Human, "Bug: {bug_report}"),
    ]
}

fn defaults() -> PullDefaults {
    PullDefaults::from_config(
        &PullConfig::default(),
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    )
}

fn source() -> QualifiedName {
    QualifiedName::parse("leonanluppi/bug_to_user_story_v1").unwrap()
}

#[tokio::test]
async fn test_fetch_flattens_template() {
    let client = MockHubClient::new().with_pull(pulled(two_messages(), Some("bug_to_user_story_v1")));

    let doc = fetch(&client, &source(), &defaults()).await.unwrap();

    assert_eq!(doc.name, "bug_to_user_story_v1");
    assert_eq!(doc.system_prompt, "Você é um Product Manager.");
    assert_eq!(doc.user_prompt, "Bug: {bug_report}");
    assert_eq!(doc.description, "Prompt para converter relatos de bugs em User Stories");
    assert_eq!(doc.version, "v1");
    assert_eq!(doc.created_at, NaiveDate::from_ymd_opt(2025, 1, 15));
    assert_eq!(
        doc.tags,
        vec!["bug-analysis", "user-story", "product-management"]
    );
    assert!(doc.techniques.is_none());
    assert_eq!(client.pulled_names(), vec![source()]);
}

#[tokio::test]
async fn test_fetch_with_missing_messages_degrades() {
    let single = vec![MessageTemplate::new(Role::System, "only system")];
    let client = MockHubClient::new()
        .with_pull(pulled(single, Some("repo")))
        .with_pull(pulled(vec![], Some("repo")));

    let doc = fetch(&client, &source(), &defaults()).await.unwrap();
    assert_eq!(doc.system_prompt, "only system");
    assert_eq!(doc.user_prompt, "");

    let empty = fetch(&client, &source(), &defaults()).await.unwrap();
    assert_eq!(empty.system_prompt, "");
    assert_eq!(empty.user_prompt, "");
}

#[tokio::test]
async fn test_fetch_falls_back_to_repo_name() {
    let client = MockHubClient::new().with_pull(pulled(two_messages(), None));

    let doc = fetch(&client, &source(), &defaults()).await.unwrap();
    assert_eq!(doc.name, "bug_to_user_story_v1");
}

#[tokio::test]
async fn test_fetch_reports_remote_failure() {
    let client = MockHubClient::new().with_pull_error("401 Unauthorized");

    let result = fetch(&client, &source(), &defaults()).await;
    assert!(matches!(result, Err(AppError::Remote(_))));
}

#[tokio::test]
async fn test_execute_writes_document() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        workspace: temp_dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let client = MockHubClient::new().with_pull(pulled(two_messages(), Some("bug_to_user_story_v1")));

    let path = PullCommand::default().execute(&config, &client).await.unwrap();

    assert_eq!(path, temp_dir.path().join("prompts/bug_to_user_story_v1.yml"));
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.name, "bug_to_user_story_v1");
    assert_eq!(doc.user_prompt, "Bug: {bug_report}");
    assert!(doc.created_at.is_some());
}

#[tokio::test]
async fn test_refetch_resets_local_edits() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        workspace: temp_dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let path = config.document_path(&config.pull.file);

    let mut edited = prompthub_prompt::PromptDocument::new("bug_to_user_story_v1");
    edited.description = "Edited by hand".to_string();
    edited.tags = vec!["custom".to_string()];
    save_document(&path, &edited).unwrap();

    let client = MockHubClient::new().with_pull(pulled(two_messages(), Some("bug_to_user_story_v1")));
    PullCommand::default().execute(&config, &client).await.unwrap();

    let doc = load_document(&path).unwrap();
    assert_eq!(doc.description, config.pull.description);
    assert_eq!(doc.tags, config.pull.tags);
}

#[tokio::test]
async fn test_execute_rejects_invalid_name() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        workspace: temp_dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let command = PullCommand {
        name: Some("owner/".to_string()),
        output: None,
    };
    let client = MockHubClient::new();

    assert!(command.execute(&config, &client).await.is_err());
    assert!(client.pulled_names().is_empty());
}
