// Whitespace tokenizer shared by the length and frequency statistics.

use serde::{Deserialize, Serialize};

/// Tokenization switches. The default counts raw tokens, case preserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerOptions {
    pub lowercase: bool,
}

/// Split on runs of Unicode whitespace. No stemming, no stop words.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Number of whitespace-delimited tokens. An empty or blank string yields 0.
pub fn word_count(text: &str) -> usize {
    tokens(text).count()
}

impl TokenizerOptions {
    /// Normalize one token for counting.
    pub fn normalize(&self, token: &str) -> String {
        if self.lowercase {
            token.to_lowercase()
        } else {
            token.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace_run() {
        let t: Vec<&str> = tokens("  good\tday\n\u{3000}again ").collect();
        assert_eq!(t, vec!["good", "day", "again"]);
    }

    #[test]
    fn empty_and_blank_have_no_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \t"), 0);
    }

    #[test]
    fn punctuation_stays_attached() {
        let t: Vec<&str> = tokens("wow!! @user #tag").collect();
        assert_eq!(t, vec!["wow!!", "@user", "#tag"]);
    }

    #[test]
    fn lowercase_option() {
        let opts = TokenizerOptions { lowercase: true };
        assert_eq!(opts.normalize("Day"), "day");
        assert_eq!(TokenizerOptions::default().normalize("Day"), "Day");
    }
}
