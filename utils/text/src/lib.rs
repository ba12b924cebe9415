// Whitespace-preserving suffix truncation for bounded evidence windows.

/// Take the suffix of `text` containing at most `budget` tokens.
///
/// A token is a maximal run of non-whitespace characters or a maximal run of
/// whitespace characters, so the text splits into alternating runs and the
/// rejoin of the kept tail is byte-identical to a trailing fragment of the
/// input. Runs of whitespace count against the budget, which keeps newlines
/// and indentation intact in the truncated tail.
#[inline]
pub fn take_last_tokens(text: &str, budget: usize) -> &str {
    if budget == 0 {
        return "";
    }

    // Byte offset of each run start. A run boundary is any transition
    // between whitespace and non-whitespace.
    let mut run_starts: Vec<usize> = Vec::new();
    let mut prev_is_ws: Option<bool> = None;
    for (i, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        if prev_is_ws != Some(is_ws) {
            run_starts.push(i);
            prev_is_ws = Some(is_ws);
        }
    }

    if run_starts.len() <= budget {
        return text;
    }
    &text[run_starts[run_starts.len() - budget]..]
}

/// Count the whitespace-preserving tokens in `text`.
pub fn count_tokens(text: &str) -> usize {
    let mut count = 0usize;
    let mut prev_is_ws: Option<bool> = None;
    for ch in text.chars() {
        let is_ws = ch.is_whitespace();
        if prev_is_ws != Some(is_ws) {
            count += 1;
            prev_is_ws = Some(is_ws);
        }
    }
    count
}
