//! Repair decisions for failing documented commands.
//!
//! A failure context (command, captured streams, exit status) flows into a
//! repair agent; the agent gathers evidence from one source (prior issue
//! corpus, directory listing, or external search), truncates it to a fixed
//! token budget, builds a prompt from a named template, calls the
//! generation backend, and returns a transcript holding the assembled query
//! and the raw response. The orchestrator bounds how long degraded answers
//! are retried across strategies.

pub mod agent;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod search;

pub use agent::DEFAULT_TOP_K;
pub use agent::EvidenceStrategy;
pub use agent::LONG_EVIDENCE_BUDGET;
pub use agent::RepairAgent;
pub use agent::SHORT_EVIDENCE_BUDGET;
pub use agent::ScriptDrafter;
pub use context::FailureContext;
pub use context::RepairTranscript;
pub use error::PromptError;
pub use error::RepairError;
pub use error::Result;
pub use orchestrator::AgentOrchestrator;
pub use orchestrator::RepairOutcome;
pub use orchestrator::RepairReport;
pub use prompt::PromptFields;
pub use prompt::TemplateId;
pub use search::SearchProvider;
