// Corpus-wide token frequency table with a deterministic top-K query.

use std::collections::HashMap;

use serde::Serialize;

use super::tokenize::{tokens, TokenizerOptions};
use crate::dataset::Dataset;

/// Default K for the top-token chart.
pub const DEFAULT_TOP_K: usize = 20;

/// One token and its number of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// Token -> occurrence count, remembering the order tokens were first seen.
///
/// The sum of all counts equals the total word count of the corpus.
#[derive(Debug, Clone, Default)]
pub struct TokenFrequencyTable {
    /// Entries in first-seen order.
    entries: Vec<TokenCount>,
    /// Token -> position in `entries`.
    index: HashMap<String, usize>,
}

/// Count every whitespace token across all records, in dataset order.
pub fn token_frequency(dataset: &Dataset, options: TokenizerOptions) -> TokenFrequencyTable {
    let mut table = TokenFrequencyTable::default();
    for record in dataset {
        for token in tokens(&record.text) {
            table.add(options.normalize(token));
        }
    }
    table
}

impl TokenFrequencyTable {
    fn add(&mut self, token: String) {
        match self.index.get(&token) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(token.clone(), self.entries.len());
                self.entries.push(TokenCount { token, count: 1 });
            }
        }
    }

    /// Occurrences of one token (0 if never seen).
    pub fn get(&self, token: &str) -> usize {
        self.index
            .get(token)
            .map(|&pos| self.entries[pos].count)
            .unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Every count, in first-seen token order.
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.count)
    }

    /// Every entry, in first-seen token order.
    pub fn entries(&self) -> &[TokenCount] {
        &self.entries
    }

    /// The `k` most frequent tokens, count descending.
    ///
    /// Returns exactly `min(k, distinct())` entries. Ties keep first-seen
    /// order because the sort is stable over the insertion-ordered entries.
    pub fn top_k(&self, k: usize) -> Vec<TokenCount> {
        let mut ranked: Vec<&TokenCount> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.into_iter().take(k).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::models::record;

    fn table(texts: &[&str]) -> TokenFrequencyTable {
        let ds = Dataset::new(texts.iter().map(|t| record(t, "pos")).collect());
        token_frequency(&ds, TokenizerOptions::default())
    }

    #[test]
    fn good_day_bad_day() {
        let t = table(&["good day", "bad day"]);
        assert_eq!(
            t.top_k(1),
            vec![TokenCount {
                token: "day".to_string(),
                count: 2
            }]
        );
        assert_eq!(t.total(), 4);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let t = table(&["b a c", "c a b"]);
        let top: Vec<String> = t.top_k(3).into_iter().map(|e| e.token).collect();
        assert_eq!(top, vec!["b", "a", "c"]);
    }

    #[test]
    fn top_k_larger_than_vocabulary() {
        let t = table(&["x y"]);
        assert_eq!(t.top_k(20).len(), 2);
        assert!(t.top_k(0).is_empty());
    }

    #[test]
    fn case_preserved_by_default() {
        let t = table(&["Day day DAY"]);
        assert_eq!(t.distinct(), 3);
        assert_eq!(t.get("day"), 1);
    }

    #[test]
    fn lowercase_merges_case_variants() {
        let ds = Dataset::new(vec![record("Day day DAY", "pos")]);
        let t = token_frequency(&ds, TokenizerOptions { lowercase: true });
        assert_eq!(t.distinct(), 1);
        assert_eq!(t.get("day"), 3);
    }

    #[test]
    fn empty_text_contributes_nothing() {
        let t = table(&["", "   "]);
        assert!(t.is_empty());
        assert_eq!(t.total(), 0);
    }
}
