//! Issue corpus loading and rendering.
//!
//! The source format is an ordered sequence of JSON records with optional
//! `title`, `body`, and `comments[].{user.login, body}` fields. Missing
//! fields default to empty rather than failing the load. Document identity
//! is the record's position in the sequence.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::error::RetrievalError;

/// One comment on an issue report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    pub author: String,
    pub body: String,
}

/// One previously-resolved issue report. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDocument {
    pub title: String,
    pub body: String,
    pub comments: Vec<IssueComment>,
}

impl IssueDocument {
    /// Render the document to the flat text form that gets indexed and, on a
    /// query hit, spliced into repair prompts.
    ///
    /// Sections are prefixed with role markers; each comment is attributed
    /// to its author:
    ///
    /// ```text
    /// **Title**
    /// {title}
    /// **Body**
    /// {body}
    /// **Response** [{author}]
    /// {comment body}
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("**Title**\n{}\n**Body**\n{}\n", self.title, self.body);
        let responses: Vec<String> = self
            .comments
            .iter()
            .map(|c| format!("**Response** [{}]\n{}", c.author, c.body))
            .collect();
        out.push_str(&responses.join("\n"));
        out
    }
}

/// Ordered, exclusively-owned sequence of issue documents.
#[derive(Debug, Clone, Default)]
pub struct IssueCorpus {
    documents: Vec<IssueDocument>,
}

impl IssueCorpus {
    /// Build a corpus from already-constructed documents, preserving order.
    pub fn new(documents: Vec<IssueDocument>) -> Self {
        Self { documents }
    }

    /// Parse a corpus from its JSON source format.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawIssue> = serde_json::from_str(json).map_err(|e| {
            RetrievalError::CorpusParse {
                cause: e.to_string(),
            }
        })?;
        let documents = raw.into_iter().map(RawIssue::into_document).collect();
        Ok(Self { documents })
    }

    /// Load a corpus from a JSON file on disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| RetrievalError::CorpusRead {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        let corpus = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            documents = corpus.len(),
            "issue corpus loaded"
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[IssueDocument] {
        &self.documents
    }

    /// Get a document by its corpus position.
    pub fn get(&self, index: usize) -> Option<&IssueDocument> {
        self.documents.get(index)
    }
}

// Wire types for the source format. Every field is optional at the record
// level; defaults keep a malformed record from failing the whole load.

#[derive(Debug, Default, Deserialize)]
struct RawIssue {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    comments: Vec<RawComment>,
}

#[derive(Debug, Default, Deserialize)]
struct RawComment {
    #[serde(default)]
    user: RawUser,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawUser {
    #[serde(default)]
    login: String,
}

impl RawIssue {
    fn into_document(self) -> IssueDocument {
        IssueDocument {
            title: self.title,
            body: self.body,
            comments: self
                .comments
                .into_iter()
                .map(|c| IssueComment {
                    author: c.user.login,
                    body: c.body,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn render_includes_role_markers_and_authors() {
        let doc = IssueDocument {
            title: "CUDA OOM".to_string(),
            body: "reduce batch size".to_string(),
            comments: vec![IssueComment {
                author: "maintainer".to_string(),
                body: "try --batch-size 8".to_string(),
            }],
        };
        assert_eq!(
            doc.render(),
            "**Title**\nCUDA OOM\n**Body**\nreduce batch size\n\
             **Response** [maintainer]\ntry --batch-size 8"
        );
    }

    #[test]
    fn render_without_comments_keeps_trailing_newline() {
        let doc = IssueDocument {
            title: "t".to_string(),
            body: "b".to_string(),
            comments: Vec::new(),
        };
        assert_eq!(doc.render(), "**Title**\nt\n**Body**\nb\n");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let corpus = IssueCorpus::from_json_str(
            r#"[
                {"title": "only a title"},
                {"comments": [{"body": "orphan comment"}]},
                {}
            ]"#,
        )
        .unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get(0).unwrap().title, "only a title");
        assert_eq!(corpus.get(0).unwrap().body, "");
        assert_eq!(corpus.get(1).unwrap().comments.len(), 1);
        assert_eq!(corpus.get(1).unwrap().comments[0].author, "");
        assert_eq!(corpus.get(1).unwrap().comments[0].body, "orphan comment");
        assert_eq!(corpus.get(2).unwrap(), &IssueDocument {
            title: String::new(),
            body: String::new(),
            comments: Vec::new(),
        });
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = IssueCorpus::from_json_str("not json").unwrap_err();
        assert!(matches!(err, RetrievalError::CorpusParse { .. }));
    }

    #[test]
    fn load_from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.json");
        std::fs::write(&path, r#"[{"title": "pinned", "body": "use torch==2.1"}]"#).unwrap();

        let corpus = IssueCorpus::from_json_file(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(0).unwrap().body, "use torch==2.1");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = IssueCorpus::from_json_file(Path::new("/nonexistent/issues.json")).unwrap_err();
        assert!(matches!(err, RetrievalError::CorpusRead { .. }));
    }
}
