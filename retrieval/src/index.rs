//! BM25 ranking over rendered issue documents.
//!
//! The index is derived wholesale from an [`IssueCorpus`] at build time and
//! never mutated afterwards; rebuilding is the only way to pick up corpus
//! changes. Scoring uses the `bm25` crate (term-frequency saturation,
//! inverse document frequency, length normalization against the corpus
//! average), with ranking ties broken by original corpus order.

use bm25::Embedder;
use bm25::EmbedderBuilder;
use bm25::Scorer;
use bm25::Tokenizer;

use crate::corpus::IssueCorpus;
use crate::corpus::IssueDocument;
use crate::tokenizer::SpaceTokenizer;

/// BM25 scoring parameters.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f32,
    /// Document length normalization strength.
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        // The standard Okapi defaults; issue reports are ordinary prose, so
        // no length-normalization tuning is needed.
        Self { k1: 1.5, b: 0.75 }
    }
}

/// Average document length used when the corpus is empty. Any positive value
/// works since there is nothing to score against.
const EMPTY_CORPUS_AVGDL: f32 = 1.0;

/// Read-only BM25 index over a corpus of issue documents.
pub struct RetrievalIndex {
    /// Rendered document texts, in corpus order.
    texts: Vec<String>,
    embedder: Embedder<u32, SpaceTokenizer>,
    scorer: Scorer<u32, u32>,
}

impl RetrievalIndex {
    /// Build an index from a corpus with default BM25 parameters.
    pub fn build(corpus: &IssueCorpus) -> Self {
        Self::with_params(corpus, Bm25Params::default())
    }

    /// Build an index from a corpus with explicit BM25 parameters.
    pub fn with_params(corpus: &IssueCorpus, params: Bm25Params) -> Self {
        let texts: Vec<String> = corpus.documents().iter().map(IssueDocument::render).collect();

        // avgdl comes from the corpus itself, measured with the same
        // tokenizer the embedder uses.
        let tokenizer = SpaceTokenizer;
        let avgdl = if texts.is_empty() {
            EMPTY_CORPUS_AVGDL
        } else {
            let total: usize = texts.iter().map(|t| tokenizer.tokenize(t).len()).sum();
            total as f32 / texts.len() as f32
        };

        let embedder = EmbedderBuilder::<u32, SpaceTokenizer>::with_avgdl(avgdl)
            .k1(params.k1)
            .b(params.b)
            .build();

        let mut scorer = Scorer::new();
        for (position, text) in texts.iter().enumerate() {
            let embedding = embedder.embed(text);
            scorer.upsert(&(position as u32), embedding);
        }

        tracing::debug!(documents = texts.len(), avgdl, "retrieval index built");
        Self {
            texts,
            embedder,
            scorer,
        }
    }

    /// Number of indexed documents. Always equals the corpus length the
    /// index was built from.
    pub fn doc_count(&self) -> usize {
        self.texts.len()
    }

    /// Rendered text of a document by corpus position.
    pub fn text(&self, position: usize) -> Option<&str> {
        self.texts.get(position).map(String::as_str)
    }

    /// Rank every document against a free-text query.
    ///
    /// Returns up to `top_k` (corpus position, score) pairs, descending by
    /// score, ties broken by corpus position. Documents sharing no token
    /// with the query score 0.0 but still rank, so a query always yields
    /// `min(top_k, doc_count)` results; only an empty corpus yields none.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<(usize, f32)> {
        let query_embedding = self.embedder.embed(query);

        let mut scores = vec![0.0f32; self.texts.len()];
        for doc in self.scorer.matches(&query_embedding) {
            scores[doc.id as usize] = doc.score;
        }

        let mut ranked: Vec<(usize, f32)> = scores.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(top_k);
        ranked
    }

    /// Rendered texts of the `top_k` most relevant documents.
    pub fn query(&self, query: &str, top_k: usize) -> Vec<&str> {
        self.rank(query, top_k)
            .into_iter()
            .map(|(position, _)| self.texts[position].as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::corpus::IssueComment;

    fn doc(title: &str, body: &str) -> IssueDocument {
        IssueDocument {
            title: title.to_string(),
            body: body.to_string(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn empty_corpus_ranks_nothing() {
        let index = RetrievalIndex::build(&IssueCorpus::default());
        assert_eq!(index.doc_count(), 0);
        assert_eq!(index.query("anything", 5), Vec::<&str>::new());
        assert_eq!(index.query("", 0), Vec::<&str>::new());
    }

    #[test]
    fn index_count_matches_corpus_count() {
        let corpus = IssueCorpus::new(vec![doc("a", "b"), doc("c", "d"), doc("e", "f")]);
        let index = RetrievalIndex::build(&corpus);
        assert_eq!(index.doc_count(), corpus.len());
    }

    #[test]
    fn identical_documents_preserve_insertion_order() {
        let corpus = IssueCorpus::new(vec![
            doc("install fails", "reinstall the package from source"),
            doc("install fails", "reinstall the package from source"),
            doc("install fails", "reinstall the package from source"),
        ]);
        let index = RetrievalIndex::build(&corpus);

        let ranked = index.rank("the package", 3);
        let positions: Vec<usize> = ranked.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert!(ranked.windows(2).all(|w| w[0].1 == w[1].1));
    }

    #[test]
    fn rare_token_document_ranks_first() {
        let corpus = IssueCorpus::new(vec![
            doc("training is slow", "try more workers maybe"),
            doc("training is slow", "try fewer workers maybe"),
            doc("segfault on import", "rebuild libfoo with --xyzzy-flag enabled"),
            doc("inference is slow", "batch the incoming requests"),
        ]);
        let index = RetrievalIndex::build(&corpus);

        let top = index.query("--xyzzy-flag", 1);
        assert_eq!(top.len(), 1);
        assert!(top[0].contains("segfault on import"));
    }

    #[test]
    fn query_returns_at_most_top_k() {
        let corpus = IssueCorpus::new(vec![
            doc("build broke", "missing a header file"),
            doc("build broke", "missing a library file"),
            doc("build broke", "missing a compiler flag"),
        ]);
        let index = RetrievalIndex::build(&corpus);
        assert_eq!(index.query("missing a file", 2).len(), 2);
        assert_eq!(index.query("missing a file", 10).len(), 3);
    }

    #[test]
    fn non_matching_query_still_ranks_in_corpus_order() {
        // The reference top-n contract: documents with zero overlap score
        // 0.0 but are still returned, in corpus order.
        let corpus = IssueCorpus::new(vec![doc("alpha one", "beta two"), doc("gamma three", "delta four")]);
        let index = RetrievalIndex::build(&corpus);

        let ranked = index.rank("zeta unknown", 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], (0, 0.0));
        assert_eq!(ranked[1], (1, 0.0));
    }

    #[test]
    fn comment_text_is_searchable() {
        let corpus = IssueCorpus::new(vec![
            doc("unrelated report", "nothing useful here"),
            IssueDocument {
                title: "checkpoint 404".to_string(),
                body: "download link broken".to_string(),
                comments: vec![IssueComment {
                    author: "maintainer".to_string(),
                    body: "mirror is at example.org/weights.bin now".to_string(),
                }],
            },
        ]);
        let index = RetrievalIndex::build(&corpus);

        let top = index.query("example.org/weights.bin", 1);
        assert_eq!(top.len(), 1);
        assert!(top[0].contains("checkpoint 404"));
    }

    #[test]
    fn newlines_do_not_separate_tokens() {
        // "memory" is a clean space-delimited token in the second document
        // only; in the first it is glued to its neighbors by newlines.
        let corpus = IssueCorpus::new(vec![
            doc("gpu report", "ran\nout\nof\nmemory\nyesterday"),
            doc("gpu report", "ran out of memory yesterday"),
        ]);
        let index = RetrievalIndex::build(&corpus);

        let ranked = index.rank("more memory please", 2);
        assert_eq!(ranked[0].0, 1);
        assert!(ranked[0].1 > 0.0);
        assert_eq!(ranked[1], (0, 0.0));
    }
}
