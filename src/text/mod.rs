//! Keyword tokenization.
//!
//! Lowercases, turns every non-ASCII-alphanumeric character into a separator,
//! and drops short words plus a fixed list of filler words that appear in
//! nearly every resume and job posting. The stub encoder builds its features
//! from these keywords.

/// Words that carry no signal when comparing resumes to job descriptions.
pub const STOP_WORDS: &[&str] = &[
    "the",
    "and",
    "for",
    "with",
    "that",
    "this",
    "from",
    "have",
    "has",
    "your",
    "you",
    "are",
    "our",
    "will",
    "can",
    "into",
    "about",
    "than",
    "their",
    "they",
    "them",
    "not",
    "but",
    "all",
    "any",
    "was",
    "were",
    "been",
    "being",
    "job",
    "work",
    "role",
    "team",
    "years",
    "year",
    "experience",
    "skills",
    "skill",
];

/// Minimum keyword length (in bytes) that survives filtering.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Splits `text` into lowercase ASCII-alphanumeric words, unfiltered.
pub fn words(text: &str) -> Vec<String> {
    let normalized: String = text
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() { c } else { ' ' }
        })
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}

/// Returns the keywords of `text`: [`words`] minus short words and [`STOP_WORDS`].
pub fn keywords(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| w.len() >= MIN_KEYWORD_LEN && !is_stop_word(w))
        .collect()
}

/// Returns `true` if `word` (already lowercase) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
