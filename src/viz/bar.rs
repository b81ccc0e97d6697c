// Top-token bar chart specification.

use serde::Serialize;

use crate::stats::{TokenCount, TokenFrequencyTable};

/// `(token, count)` bars in descending count order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSpec {
    pub k: usize,
    pub bars: Vec<TokenCount>,
}

impl BarSpec {
    pub fn top_tokens(table: &TokenFrequencyTable, k: usize) -> Self {
        Self {
            k,
            bars: table.top_k(k),
        }
    }

    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
