//! Repair agents: one generic pipeline parameterized by an evidence
//! strategy, plus the script drafter.
//!
//! Every strategy shares the same shape: truncate the captured streams,
//! gather evidence, build a prompt, call the backend, wrap the transcript.
//! A call is a strictly sequential pipeline; nothing here runs concurrently
//! with another repair attempt.

use std::sync::Arc;

use runbook_backend::GenerationBackend;
use runbook_retrieval::RetrievalIndex;
use runbook_utils_text::take_last_tokens;

use crate::context::FailureContext;
use crate::context::RepairTranscript;
use crate::error::Result;
use crate::prompt;
use crate::prompt::PromptFields;
use crate::prompt::TemplateId;
use crate::search::SearchProvider;

/// Token budget for cheap external-search and corpus-lookup queries.
pub const SHORT_EVIDENCE_BUDGET: usize = 1024;

/// Token budget for evidence in prompts sent to the generation backend.
pub const LONG_EVIDENCE_BUDGET: usize = 2048;

/// Default number of issue documents spliced into a rag repair prompt.
pub const DEFAULT_TOP_K: usize = 3;

/// Where a repair agent gets its evidence from.
pub enum EvidenceStrategy {
    /// Top-k prior issue reports from the retrieval index.
    CorpusLookup {
        index: Arc<RetrievalIndex>,
        top_k: usize,
    },
    /// The directory listing captured on the failure context.
    DirectoryListing,
    /// A reference text from the external search provider.
    ExternalSearch { provider: Arc<dyn SearchProvider> },
}

impl EvidenceStrategy {
    fn label(&self) -> &'static str {
        match self {
            Self::CorpusLookup { .. } => "corpus_lookup",
            Self::DirectoryListing => "directory_listing",
            Self::ExternalSearch { .. } => "external_search",
        }
    }

    fn template(&self) -> TemplateId {
        match self {
            Self::CorpusLookup { .. } => TemplateId::RagRepair,
            Self::DirectoryListing => TemplateId::LogRepair,
            Self::ExternalSearch { .. } => TemplateId::SearchRepair,
        }
    }
}

/// Agent producing one corrective command for a failure context.
pub struct RepairAgent {
    backend: Arc<dyn GenerationBackend>,
    strategy: EvidenceStrategy,
}

impl RepairAgent {
    pub fn new(backend: Arc<dyn GenerationBackend>, strategy: EvidenceStrategy) -> Self {
        Self { backend, strategy }
    }

    /// Agent backed by prior-issue evidence.
    pub fn issue_repair(backend: Arc<dyn GenerationBackend>, index: Arc<RetrievalIndex>) -> Self {
        Self::new(backend, EvidenceStrategy::CorpusLookup {
            index,
            top_k: DEFAULT_TOP_K,
        })
    }

    /// Agent backed by the context's directory listing.
    pub fn log_repair(backend: Arc<dyn GenerationBackend>) -> Self {
        Self::new(backend, EvidenceStrategy::DirectoryListing)
    }

    /// Agent backed by external search.
    pub fn search_repair(
        backend: Arc<dyn GenerationBackend>,
        provider: Arc<dyn SearchProvider>,
    ) -> Self {
        Self::new(backend, EvidenceStrategy::ExternalSearch { provider })
    }

    /// Produce one corrective command for `context`.
    ///
    /// The returned transcript always carries the fully assembled query and
    /// the raw backend response, including the degraded sentinel when the
    /// backend never answered usefully.
    pub async fn repair(&self, context: &FailureContext) -> Result<RepairTranscript> {
        let template = self.strategy.template();
        tracing::debug!(
            strategy = self.strategy.label(),
            template = template.name(),
            command = %context.command,
            "assembling repair prompt"
        );

        let mut search_query = None;
        let mut search_response = None;

        let mut fields = PromptFields::new()
            .set("command", context.command.as_str())
            .set(
                "stdout",
                take_last_tokens(&context.stdout, LONG_EVIDENCE_BUDGET),
            )
            .set(
                "stderr",
                take_last_tokens(&context.stderr, LONG_EVIDENCE_BUDGET),
            );

        match &self.strategy {
            EvidenceStrategy::CorpusLookup { index, top_k } => {
                let lookup = evidence_query(context);
                let hits = index.query(&lookup, *top_k);
                tracing::debug!(hits = hits.len(), top_k = *top_k, "issue corpus consulted");
                fields = fields
                    .set("return_code", context.return_code.to_string())
                    .set("issue_info", hits.join("\n\n"));
            }
            EvidenceStrategy::DirectoryListing => {
                fields = fields.set("return_code", context.return_code.to_string());
                if let Some(listing) = &context.directory_listing {
                    fields = fields.set("tree_dir", take_last_tokens(listing, LONG_EVIDENCE_BUDGET));
                }
                // A context without a listing fails the build below with
                // MissingField("tree_dir"): a caller contract violation,
                // not a runtime condition.
            }
            EvidenceStrategy::ExternalSearch { provider } => {
                let reference = match &context.reference_text {
                    Some(reference) => reference.clone(),
                    None => {
                        let query = evidence_query(context);
                        let response = provider.search(&query).await?;
                        search_query = Some(query);
                        search_response = Some(response.clone());
                        response
                    }
                };
                fields = fields.set("reference_from_web_search", reference);
            }
        }

        let query = prompt::build(template, &fields)?;
        let response = self.backend.generate(&query, template.system()).await?;

        Ok(RepairTranscript {
            query,
            response,
            search_query,
            search_response,
        })
    }
}

/// Short-budget query describing the failure, shared by the corpus lookup
/// and the external search call.
fn evidence_query(context: &FailureContext) -> String {
    format!(
        "# COMMAND\n{}\n\n# STDOUT\n{}\n\n# STDERR\n{}\n",
        context.command,
        take_last_tokens(&context.stdout, SHORT_EVIDENCE_BUDGET),
        take_last_tokens(&context.stderr, SHORT_EVIDENCE_BUDGET),
    )
}

/// Drafts a bash script from raw documentation text. No failure context is
/// involved; the input is the documentation itself.
pub struct ScriptDrafter {
    backend: Arc<dyn GenerationBackend>,
}

impl ScriptDrafter {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Ask the backend to extract a categorized bash script from `readme`.
    pub async fn draft(&self, readme: &str) -> Result<RepairTranscript> {
        let fields = PromptFields::new().set("readme", readme);
        let query = prompt::build(TemplateId::Draft, &fields)?;
        let response = self
            .backend
            .generate(&query, TemplateId::Draft.system())
            .await?;
        Ok(RepairTranscript::new(query, response))
    }
}
