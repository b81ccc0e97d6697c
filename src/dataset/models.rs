// Record and Dataset — the immutable in-memory table every stage reads.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Column holding the raw tweet text.
pub const TWEET_COLUMN: &str = "tweet";
/// Column holding the ground-truth sentiment.
pub const LABEL_COLUMN: &str = "label";
/// Column holding the bi-LSTM baseline prediction.
pub const BILSTM_COLUMN: &str = "baseline_bilstm_pred";
/// Column holding the zero-shot LLaMA prediction.
pub const LLAMA_ZEROSHOT_COLUMN: &str = "llama_zeroshot_pred";
/// Column holding the fine-tuned LLaMA prediction.
pub const LLAMA_FINETUNED_COLUMN: &str = "llama_zeroshot_finetuned_pred";

/// The fixed input schema. A header must contain exactly these names.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    TWEET_COLUMN,
    LABEL_COLUMN,
    BILSTM_COLUMN,
    LLAMA_ZEROSHOT_COLUMN,
    LLAMA_FINETUNED_COLUMN,
];

/// A categorical sentiment value, kept exactly as it appears in the source.
///
/// Labels are never normalized: "0", "negative" and "neg" are three distinct
/// values. Display and comparison both use the raw text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tweet with its ground truth and the three model predictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    pub ground_truth_label: Label,
    pub pred_bilstm: Label,
    pub pred_llama_zeroshot: Label,
    pub pred_llama_finetuned: Label,
}

impl Record {
    /// All four label fields, ground truth first.
    pub fn labels(&self) -> [&Label; 4] {
        [
            &self.ground_truth_label,
            &self.pred_bilstm,
            &self.pred_llama_zeroshot,
            &self.pred_llama_finetuned,
        ]
    }
}

/// An ordered, read-only sequence of records indexed `0..len`.
///
/// There is no mutable access: once built, indices stay stable for the
/// lifetime of the value, which selection-by-index relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The finite label set: every distinct value across all four label columns.
    pub fn label_set(&self) -> BTreeSet<&Label> {
        self.records.iter().flat_map(|r| r.labels()).collect()
    }

    /// The full corpus: every record's text joined by single spaces.
    pub fn corpus(&self) -> String {
        let texts: Vec<&str> = self.records.iter().map(|r| r.text.as_str()).collect();
        texts.join(" ")
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) fn record(text: &str, label: &str) -> Record {
    Record {
        text: text.to_string(),
        ground_truth_label: Label::new(label),
        pred_bilstm: Label::new(label),
        pred_llama_zeroshot: Label::new(label),
        pred_llama_finetuned: Label::new(label),
    }
}
