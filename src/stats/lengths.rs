// Per-record word counts, index-aligned with the Dataset.

use serde::Serialize;

use super::tokenize::word_count;
use crate::dataset::Dataset;

/// One word count per record, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LengthDistribution {
    counts: Vec<usize>,
}

/// Count whitespace tokens in every record's text.
pub fn length_distribution(dataset: &Dataset) -> LengthDistribution {
    LengthDistribution {
        counts: dataset.iter().map(|r| word_count(&r.text)).collect(),
    }
}

impl LengthDistribution {
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total words across all records.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn min(&self) -> Option<usize> {
        self.counts.iter().copied().min()
    }

    pub fn max(&self) -> Option<usize> {
        self.counts.iter().copied().max()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.counts.is_empty() {
            None
        } else {
            Some(self.total() as f64 / self.counts.len() as f64)
        }
    }
}
