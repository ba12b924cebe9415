//! Shared retry and degradation policy for generation backends.
//!
//! Any backend can be passed through [`Retrying`] once instead of
//! re-implementing the loop per call site. The policy favors availability
//! over correctness-signaling: after the attempt cap, the wrapper returns
//! the fixed sentinel string as a normal response rather than raising, so
//! callers detect degradation by [`is_degraded`] and never by catching.

use std::time::Duration;

use async_trait::async_trait;

use crate::GenerationBackend;
use crate::error::Result;

/// Sentinel returned once retries are exhausted.
pub const DEGRADED_RESPONSE: &str = "Error: Failed to get a response after multiple attempts.";

/// Whether a response is the degraded sentinel rather than real output.
pub fn is_degraded(response: &str) -> bool {
    response == DEGRADED_RESPONSE
}

/// Retry policy: attempt cap and the fixed wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts before degrading, including the first.
    pub max_attempts: u32,
    /// Fixed wait between consecutive attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(60);
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            backoff: Self::DEFAULT_BACKOFF,
        }
    }
}

/// Wrapper adding the retry/degradation policy to any inner backend.
///
/// The same request is retried unchanged; the wait between attempts is the
/// policy's full fixed backoff. The call blocks its task for the whole
/// sequence and never runs attempts concurrently.
pub struct Retrying<B> {
    inner: B,
    policy: RetryPolicy,
}

impl<B> Retrying<B> {
    /// Wrap `inner` with the default policy (5 attempts, 60 s backoff).
    pub fn new(inner: B) -> Self {
        Self::with_policy(inner, RetryPolicy::default())
    }

    /// Wrap `inner` with an explicit policy.
    pub fn with_policy(inner: B, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<B: GenerationBackend> GenerationBackend for Retrying<B> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        let mut failures = 0u32;
        loop {
            match self.inner.generate(prompt, system_instruction).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    failures += 1;
                    if failures >= self.policy.max_attempts {
                        tracing::error!(
                            backend = self.inner.name(),
                            failures,
                            error = %e,
                            "backend exhausted retries, returning degraded response"
                        );
                        return Ok(DEGRADED_RESPONSE.to_string());
                    }
                    tracing::warn!(
                        backend = self.inner.name(),
                        attempt = failures,
                        max_attempts = self.policy.max_attempts,
                        backoff_secs = self.policy.backoff.as_secs(),
                        error = %e,
                        "backend call failed, backing off"
                    );
                    tokio::time::sleep(self.policy.backoff).await;
                }
            }
        }
    }
}
