//! Bounded orchestration across repair strategies.
//!
//! A degraded backend answer is not an error, so something has to decide
//! how long to keep asking. The orchestrator makes that policy explicit:
//! it consults its agents in order, skips past degraded answers, and gives
//! up after a bounded number of rounds instead of looping forever.

use runbook_backend::is_degraded;

use crate::agent::RepairAgent;
use crate::context::FailureContext;
use crate::context::RepairTranscript;
use crate::error::Result;

/// Outcome of one failure-resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// A strategy produced a real (non-degraded) answer. The command is the
    /// raw backend response; extracting the fenced bash block is the
    /// command runner's job.
    Resolved { command: String },
    /// Every strategy degraded in every round.
    Exhausted,
}

/// Everything gathered during one resolution run. Transcripts are kept for
/// every consulted strategy, degraded ones included, so the audit trail
/// survives total backend unavailability.
#[derive(Debug, Clone)]
pub struct RepairReport {
    pub outcome: RepairOutcome,
    pub transcripts: Vec<RepairTranscript>,
}

/// Consults repair agents in a fixed order with a bounded round count.
pub struct AgentOrchestrator {
    agents: Vec<RepairAgent>,
    max_rounds: usize,
}

impl AgentOrchestrator {
    pub const DEFAULT_MAX_ROUNDS: usize = 1;

    /// Orchestrator consulting `agents` in the given order.
    pub fn new(agents: Vec<RepairAgent>) -> Self {
        Self {
            agents,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
        }
    }

    /// Set how many passes over the agent order to make before giving up.
    pub fn max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Run the resolution loop for one failure context.
    ///
    /// Degraded answers advance to the next agent; prompt-build contract
    /// violations surface immediately.
    pub async fn resolve(&self, context: &FailureContext) -> Result<RepairReport> {
        let mut transcripts = Vec::new();

        for round in 0..self.max_rounds {
            for (position, agent) in self.agents.iter().enumerate() {
                let transcript = agent.repair(context).await?;
                if is_degraded(&transcript.response) {
                    tracing::warn!(
                        round,
                        agent = position,
                        "repair degraded, moving to next strategy"
                    );
                    transcripts.push(transcript);
                    continue;
                }

                let command = transcript.response.clone();
                transcripts.push(transcript);
                return Ok(RepairReport {
                    outcome: RepairOutcome::Resolved { command },
                    transcripts,
                });
            }
        }

        tracing::error!(
            rounds = self.max_rounds,
            agents = self.agents.len(),
            "all repair strategies degraded, giving up"
        );
        Ok(RepairReport {
            outcome: RepairOutcome::Exhausted,
            transcripts,
        })
    }
}
