//! Named prompt templates and the builder that fills them.
//!
//! Each template pairs a system instruction with a query pattern holding
//! `{field}` placeholders. Every placeholder the pattern references must be
//! supplied at build time; an unfilled placeholder never reaches a backend
//! call. The response-format instructions (single-line bash command in a
//! fenced block) are part of the template text and pass through verbatim;
//! parsing the backend's answer is the command runner's job, not ours.

use std::collections::BTreeMap;

use crate::error::PromptError;

/// The named templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    /// Bash-script extraction from documentation.
    Draft,
    /// Repair with prior-issue evidence.
    RagRepair,
    /// Repair with a directory listing as evidence.
    LogRepair,
    /// Repair with external search evidence.
    SearchRepair,
}

impl TemplateId {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::RagRepair => "rag_repair",
            Self::LogRepair => "log_repair",
            Self::SearchRepair => "search_repair",
        }
    }

    /// System instruction sent alongside every query built from this
    /// template.
    pub const fn system(self) -> &'static str {
        match self {
            Self::Draft => DRAFT_SYSTEM,
            Self::RagRepair => RAG_REPAIR_SYSTEM,
            Self::LogRepair => LOG_REPAIR_SYSTEM,
            Self::SearchRepair => SEARCH_REPAIR_SYSTEM,
        }
    }

    const fn query_pattern(self) -> &'static str {
        match self {
            Self::Draft => DRAFT_QUERY,
            Self::RagRepair => RAG_REPAIR_QUERY,
            Self::LogRepair => LOG_REPAIR_QUERY,
            Self::SearchRepair => SEARCH_REPAIR_QUERY,
        }
    }
}

/// Field values for one build.
#[derive(Debug, Clone, Default)]
pub struct PromptFields {
    values: BTreeMap<&'static str, String>,
}

impl PromptFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Build the query string for `id` from `fields`.
///
/// Fails with [`PromptError::MissingField`] when the pattern references a
/// field that was not supplied. Extra fields are ignored. Field values are
/// inserted verbatim and never rescanned for placeholders.
pub fn build(id: TemplateId, fields: &PromptFields) -> Result<String, PromptError> {
    let pattern = id.query_pattern();
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(PromptError::MalformedTemplate {
                template: id.name(),
                cause: "unterminated placeholder".to_string(),
            });
        };
        let field = &after[..close];
        let value = fields.get(field).ok_or_else(|| PromptError::MissingField {
            template: id.name(),
            field: field.to_string(),
        })?;
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

const DRAFT_SYSTEM: &str = include_str!("../templates/prompts/draft_system.md");
const DRAFT_QUERY: &str = include_str!("../templates/prompts/draft_query.md");

const RAG_REPAIR_SYSTEM: &str = include_str!("../templates/prompts/rag_repair_system.md");
const RAG_REPAIR_QUERY: &str = include_str!("../templates/prompts/rag_repair_query.md");

const LOG_REPAIR_SYSTEM: &str = include_str!("../templates/prompts/log_repair_system.md");
const LOG_REPAIR_QUERY: &str = include_str!("../templates/prompts/log_repair_query.md");

const SEARCH_REPAIR_SYSTEM: &str = include_str!("../templates/prompts/search_repair_system.md");
const SEARCH_REPAIR_QUERY: &str = include_str!("../templates/prompts/search_repair_query.md");
