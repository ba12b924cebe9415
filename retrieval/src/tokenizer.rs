//! Space-split tokenizer for the BM25 index.

use bm25::Tokenizer;

/// Tokenizer that splits on literal space characters only.
///
/// This is deliberately naive and must stay reproducible: tab and newline
/// characters are NOT separators, and consecutive spaces yield empty tokens.
/// Index-time and query-time tokenization share this rule through the one
/// embedder owned by the index; diverging rules would silently degrade
/// relevance without any error.
#[derive(Debug, Clone, Default)]
pub struct SpaceTokenizer;

impl Tokenizer for SpaceTokenizer {
    fn tokenize(&self, input_text: &str) -> Vec<String> {
        input_text.split(' ').map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn splits_on_spaces_only() {
        let tokens = SpaceTokenizer.tokenize("pip install\ttorch\nnumpy scipy");
        assert_eq!(tokens, vec!["pip", "install\ttorch\nnumpy", "scipy"]);
    }

    #[test]
    fn consecutive_spaces_yield_empty_tokens() {
        let tokens = SpaceTokenizer.tokenize("a  b");
        assert_eq!(tokens, vec!["a", "", "b"]);
    }

    #[test]
    fn case_is_preserved() {
        let tokens = SpaceTokenizer.tokenize("CUDA OOM");
        assert_eq!(tokens, vec!["CUDA", "OOM"]);
    }
}
