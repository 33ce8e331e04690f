//! Chat templates: the multi-message shape the prompt hub stores.
//!
//! A `PromptDocument` is flat; the hub keeps an ordered list of role-tagged
//! message templates. By convention the first message carries the system
//! instructions and the second the user input.

use crate::document::PromptDocument;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Message role within a chat template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Ai,
}

/// A single role-tagged template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub role: Role,
    pub template: String,
}

impl MessageTemplate {
    pub fn new(role: Role, template: impl Into<String>) -> Self {
        Self {
            role,
            template: template.into(),
        }
    }

    /// Placeholders referenced by this message.
    pub fn input_variables(&self) -> Vec<String> {
        input_variables(&self.template)
    }
}

/// Ordered list of message templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTemplate {
    pub messages: Vec<MessageTemplate>,
}

impl ChatTemplate {
    pub fn new(messages: Vec<MessageTemplate>) -> Self {
        Self { messages }
    }

    /// Compose the system/user pair of a document.
    pub fn from_document(document: &PromptDocument) -> Self {
        Self::new(vec![
            MessageTemplate::new(Role::System, document.system_prompt.clone()),
            MessageTemplate::new(Role::Human, document.user_prompt.clone()),
        ])
    }

    /// Text of message `index`, or `""` when the template is shorter.
    pub fn message_text(&self, index: usize) -> &str {
        self.messages
            .get(index)
            .map(|m| m.template.as_str())
            .unwrap_or_default()
    }

    /// System instructions, by position.
    pub fn system_text(&self) -> &str {
        self.message_text(0)
    }

    /// User instructions, by position.
    pub fn user_text(&self) -> &str {
        self.message_text(1)
    }

    /// Placeholders referenced anywhere in the template, sorted.
    pub fn input_variables(&self) -> Vec<String> {
        let all: BTreeSet<String> = self
            .messages
            .iter()
            .flat_map(|m| m.input_variables())
            .collect();
        all.into_iter().collect()
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    // Escaped braces are matched first so `{{name}}` is never a placeholder.
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
    })
}

/// Extract f-string placeholders (`{name}`) from a template, sorted and
/// de-duplicated.
pub fn input_variables(template: &str) -> Vec<String> {
    let names: BTreeSet<String> = placeholder_regex()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();
    names.into_iter().collect()
}
