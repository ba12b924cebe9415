//! Failure contexts and repair transcripts.

/// Captured result of running one command, plus optional supporting
/// evidence supplied by the host. Constructed per repair attempt and not
/// persisted here.
#[derive(Debug, Clone, Default)]
pub struct FailureContext {
    /// The command that was executed.
    pub command: String,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Process exit status.
    pub return_code: i32,
    /// Directory/file listing of the working tree, when the host captured
    /// one. Required by the directory-listing repair strategy.
    pub directory_listing: Option<String>,
    /// Externally supplied reference text. When present, the search repair
    /// strategy uses it instead of calling the search provider.
    pub reference_text: Option<String>,
}

impl FailureContext {
    /// Context for a command run with no optional evidence attached.
    pub fn new(
        command: impl Into<String>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        return_code: i32,
    ) -> Self {
        Self {
            command: command.into(),
            stdout: stdout.into(),
            stderr: stderr.into(),
            return_code,
            directory_listing: None,
            reference_text: None,
        }
    }

    /// Attach a directory listing.
    pub fn directory_listing(mut self, listing: impl Into<String>) -> Self {
        self.directory_listing = Some(listing.into());
        self
    }

    /// Attach externally supplied reference text.
    pub fn reference_text(mut self, reference: impl Into<String>) -> Self {
        self.reference_text = Some(reference.into());
        self
    }
}

/// Transcript of one repair attempt. Immutable once produced; kept even
/// when the backend degraded so a human can see what evidence was
/// assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairTranscript {
    /// The fully assembled query sent to the generation backend.
    pub query: String,
    /// The raw backend response (possibly the degraded sentinel).
    pub response: String,
    /// The query sent to the external search provider, when one was
    /// consulted.
    pub search_query: Option<String>,
    /// The search provider's response, when one was consulted.
    pub search_response: Option<String>,
}

impl RepairTranscript {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            search_query: None,
            search_response: None,
        }
    }
}
