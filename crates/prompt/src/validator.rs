//! Publish-readiness checks for prompt documents.
//!
//! The rules are marker heuristics over short, human-curated text. Every rule
//! runs on every call; the report collects all violations so an editor can
//! fix them in one pass.

use crate::document::PromptDocument;
use std::fmt;

/// Minimum number of techniques a publishable document lists.
pub const MIN_TECHNIQUES: usize = 2;

/// Marker that declares the persona in the system prompt.
const PERSONA_MARKER: &str = "Você é";

/// Unfilled placeholder that must not reach the hub.
const TODO_MARKER: &str = "[TODO]";

/// Fence delimiting a code block in Markdown.
const CODE_FENCE: &str = "```";

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    SystemPromptPresent,
    PersonaDeclared,
    OutputFormat,
    FewShotExamples,
    NoTodoPlaceholders,
    MinimumTechniques,
}

impl Rule {
    /// All rules, in reporting order.
    pub const ALL: [Rule; 6] = [
        Rule::SystemPromptPresent,
        Rule::PersonaDeclared,
        Rule::OutputFormat,
        Rule::FewShotExamples,
        Rule::NoTodoPlaceholders,
        Rule::MinimumTechniques,
    ];

    /// Check the rule against a document, returning the violation if any.
    pub fn check(self, document: &PromptDocument) -> Option<Violation> {
        let system = document.system_prompt.as_str();

        let passed = match self {
            Rule::SystemPromptPresent => !system.trim().is_empty(),
            Rule::PersonaDeclared => system.contains(PERSONA_MARKER),
            Rule::OutputFormat => system.contains("Markdown") || system.contains("User Story"),
            Rule::FewShotExamples => has_example_section(system) || has_code_examples(system),
            Rule::NoTodoPlaceholders => !document.combined_text().contains(TODO_MARKER),
            Rule::MinimumTechniques => document.techniques().len() >= MIN_TECHNIQUES,
        };

        if passed {
            None
        } else {
            Some(Violation {
                rule: self,
                message: self.message(document),
            })
        }
    }

    fn message(self, document: &PromptDocument) -> String {
        match self {
            Rule::SystemPromptPresent => "Field 'system_prompt' is missing or blank".to_string(),
            Rule::PersonaDeclared => format!(
                "System prompt does not declare a persona (expected '{}', e.g. '{} um Product Manager')",
                PERSONA_MARKER, PERSONA_MARKER
            ),
            Rule::OutputFormat => {
                "System prompt does not mention the expected output format (Markdown or User Story)"
                    .to_string()
            }
            Rule::FewShotExamples => {
                "System prompt does not contain structured input/output examples".to_string()
            }
            Rule::NoTodoPlaceholders => format!(
                "Prompt still contains '{}' placeholders that must be filled in",
                TODO_MARKER
            ),
            Rule::MinimumTechniques => match &document.techniques {
                None => format!(
                    "Field 'techniques' must be a list of at least {} techniques",
                    MIN_TECHNIQUES
                ),
                Some(techniques) => format!(
                    "Field 'techniques' lists {} technique(s); at least {} are required",
                    techniques.len(),
                    MIN_TECHNIQUES
                ),
            },
        }
    }
}

/// Labelled example sections: "Exemplo" with a colon, Input/Output markers,
/// or a Markdown header next to "Exemplo".
fn has_example_section(text: &str) -> bool {
    let has_exemplo = text.contains("Exemplo");

    (has_exemplo && text.contains(':'))
        || text.contains("Input:")
        || text.contains("Entrada:")
        || text.contains("Output:")
        || text.contains("Saída:")
        || (has_exemplo && text.contains("##"))
}

/// Two fences are taken as one complete example block.
fn has_code_examples(text: &str) -> bool {
    text.matches(CODE_FENCE).count() >= 2
}

/// A failed rule and its human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    pub fn has_violation(&self, rule: Rule) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

/// Run every rule against a document.
pub fn validate(document: &PromptDocument) -> ValidationReport {
    let violations = Rule::ALL
        .iter()
        .filter_map(|rule| rule.check(document))
        .collect();

    ValidationReport { violations }
}
