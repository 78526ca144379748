//! # Reading time
use serde::Deserialize;

/// Average reading speed used for the estimate
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReadingOptions {
    pub words_per_minute: usize,
}

impl Default for ReadingOptions {
    fn default() -> Self {
        Self {
            words_per_minute: WORDS_PER_MINUTE,
        }
    }
}

/// Minutes needed to read the text at [`WORDS_PER_MINUTE`]
pub fn estimate_minutes(plain_text: &str) -> usize {
    estimate_minutes_at(plain_text, WORDS_PER_MINUTE)
}

/// Minutes needed to read the text, rounded up and never less than one
pub fn estimate_minutes_at(plain_text: &str, words_per_minute: usize) -> usize {
    let words = plain_text.split_whitespace().count();
    words.div_ceil(words_per_minute.max(1)).max(1)
}
