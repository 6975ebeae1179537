pub const SENTENCE_DELIMITER: &str = ". ";

/// Splits `text` on the literal `". "` delimiter.
///
/// The final fragment keeps whatever terminator it had; consumers that display
/// a sentence re-append a single period. Empty input yields no sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split(SENTENCE_DELIMITER).map(str::to_string).collect()
}

/// Rejoins sentences with the delimiter and appends one period.
pub fn join_sentences(sentences: &[String]) -> String {
    let mut joined = sentences.join(SENTENCE_DELIMITER);
    joined.push('.');
    joined
}

pub fn with_period(sentence: &str) -> String {
    format!("{sentence}.")
}
