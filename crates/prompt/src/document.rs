//! The flat prompt document persisted under `prompts/`.
//!
//! Documents are written by `pull-prompts` and then edited by hand before
//! `push-prompts` publishes them, so decoding is lenient: `null` or missing
//! string fields become empty strings, a `techniques` value that is not a
//! list of strings is treated as absent, and a `created_at` that is not a
//! date is dropped. The validator reports what is wrong instead of the loader
//! refusing the file.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// A prompt as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDocument {
    /// Hub repository name (`repo` or `owner/repo`)
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    /// Persona and behavior instructions
    #[serde(default, deserialize_with = "lenient_string")]
    pub system_prompt: String,

    /// Template combined with the runtime input
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_prompt: String,

    /// Version tag, e.g. `v1`
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: String,

    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDate>,

    /// Discovery tags on the hub
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,

    /// Prompt-engineering techniques applied; only on publish-ready documents
    #[serde(
        default,
        deserialize_with = "optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub techniques: Option<Vec<String>>,
}

impl PromptDocument {
    /// Create an empty document with the given hub name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Techniques as a slice; empty when absent.
    pub fn techniques(&self) -> &[String] {
        self.techniques.as_deref().unwrap_or_default()
    }

    /// System and user prompt joined by a single space.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.system_prompt, self.user_prompt)
    }
}

/// Render a YAML scalar as a string. Sequences and mappings yield `None`.
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value).ok_or_else(|| de::Error::custom("expected a string"))
}

fn string_items<E: de::Error>(items: Vec<Value>) -> Result<Vec<String>, E> {
    items
        .into_iter()
        .map(|item| scalar_to_string(item).ok_or_else(|| E::custom("expected a list of strings")))
        .collect()
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => string_items(items),
        _ => Err(de::Error::custom("expected a list of strings")),
    }
}

fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Sequence(items) => items
            .into_iter()
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };

    if items.is_none() {
        tracing::debug!("Ignoring techniques value that is not a list of strings");
    }
    Ok(items)
}

/// Accepts `YYYY-MM-DD`, or a timestamp whose date part is kept.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let date = scalar_to_string(value.clone())
        .filter(|text| !text.is_empty())
        .and_then(|text| parse_date(&text));

    if date.is_none() && !value.is_null() {
        tracing::debug!("Ignoring unparseable created_at value: {:?}", value);
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserialization() {
        let yaml = r#"
name: bug_to_user_story_v2
description: Converte bugs em User Stories
system_prompt: |
  Você é um Product Manager.
user_prompt: "{bug_report}"
version: v2
created_at: 2025-01-15
tags:
  - user-story
techniques:
  - few-shot
  - role-prompting
"#;

        let doc: PromptDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.name, "bug_to_user_story_v2");
        assert_eq!(doc.system_prompt, "Você é um Product Manager.\n");
        assert_eq!(doc.user_prompt, "{bug_report}");
        assert_eq!(doc.created_at, NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(doc.tags, vec!["user-story".to_string()]);
        assert_eq!(doc.techniques(), ["few-shot", "role-prompting"]);
    }

    #[test]
    fn test_missing_and_null_fields_are_empty() {
        let doc: PromptDocument = serde_yaml::from_str("name: x\nsystem_prompt: null\ntags: null\n").unwrap();
        assert_eq!(doc.system_prompt, "");
        assert_eq!(doc.user_prompt, "");
        assert!(doc.tags.is_empty());
        assert!(doc.created_at.is_none());
        assert!(doc.techniques.is_none());
    }

    #[test]
    fn test_non_list_techniques_is_absent() {
        let doc: PromptDocument = serde_yaml::from_str("name: x\ntechniques: few-shot\n").unwrap();
        assert!(doc.techniques.is_none());
        assert!(doc.techniques().is_empty());
    }

    #[test]
    fn test_nested_technique_items_are_absent() {
        let doc: PromptDocument =
            serde_yaml::from_str("name: x\ntechniques:\n  - few-shot\n  - [a, b]\n  - k: v\n").unwrap();
        assert!(doc.techniques.is_none());
    }

    #[test]
    fn test_created_at_timestamp_keeps_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15);
        for value in ["2025-01-15T10:00:00", "2025-01-15T10:00:00Z", "'2025-01-15 08:30:00'"] {
            let doc: PromptDocument = serde_yaml::from_str(&format!("name: x\ncreated_at: {}\n", value)).unwrap();
            assert_eq!(doc.created_at, expected, "created_at: {}", value);
        }
    }

    #[test]
    fn test_unparseable_created_at_is_dropped() {
        for value in ["\"15/01/2025\"", "today", "20250115", "''", "[2025]"] {
            let doc: PromptDocument = serde_yaml::from_str(&format!("name: x\ncreated_at: {}\n", value)).unwrap();
            assert!(doc.created_at.is_none(), "created_at: {}", value);
        }
    }

    #[test]
    fn test_numeric_version_is_stringified() {
        let doc: PromptDocument = serde_yaml::from_str("name: x\nversion: 2\n").unwrap();
        assert_eq!(doc.version, "2");
    }

    #[test]
    fn test_mapping_as_prompt_is_rejected() {
        let result: Result<PromptDocument, _> = serde_yaml::from_str("system_prompt:\n  nested: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_techniques_not_serialized() {
        let yaml = serde_yaml::to_string(&PromptDocument::new("x")).unwrap();
        assert!(!yaml.contains("techniques"));
        assert!(!yaml.contains("created_at"));
    }

    #[test]
    fn test_combined_text() {
        let doc = PromptDocument {
            system_prompt: "sys".to_string(),
            user_prompt: "user".to_string(),
            ..PromptDocument::default()
        };
        assert_eq!(doc.combined_text(), "sys user");
    }
}
