// Record inspector — project one selected record for side-by-side display.
//
// Pure read: no aggregation, no inference, label values pass through untouched.

use serde::Serialize;

use crate::dataset::{Dataset, Label};
use crate::error::IndexError;

/// Characters of tweet text shown in a selector label.
pub const PREVIEW_CHARS: usize = 50;

/// One record's text and labels, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRecord {
    pub index: usize,
    pub text: String,
    /// First PREVIEW_CHARS characters of `text`.
    pub preview: String,
    pub ground_truth_label: Label,
    pub pred_bilstm: Label,
    pub pred_llama_zeroshot: Label,
    pub pred_llama_finetuned: Label,
}

impl ComparisonRecord {
    /// The four label rows, ground truth first, with display captions.
    pub fn rows(&self) -> [(&'static str, &Label); 4] {
        [
            ("Ground truth", &self.ground_truth_label),
            ("bi-LSTM prediction", &self.pred_bilstm),
            ("LLaMA zero-shot prediction", &self.pred_llama_zeroshot),
            ("LLaMA fine-tuned prediction", &self.pred_llama_finetuned),
        ]
    }
}

/// One entry of the record selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub index: usize,
    pub label: String,
}

/// Project record `index` of the dataset.
///
/// Negative or too-large indices fail with IndexError; nothing is clamped.
pub fn inspect(dataset: &Dataset, index: i64) -> Result<ComparisonRecord, IndexError> {
    let out_of_range = IndexError {
        index,
        len: dataset.len(),
    };
    let position = usize::try_from(index).map_err(|_| out_of_range.clone())?;
    let record = dataset.get(position).ok_or(out_of_range)?;

    Ok(ComparisonRecord {
        index: position,
        text: record.text.clone(),
        preview: preview(&record.text),
        ground_truth_label: record.ground_truth_label.clone(),
        pred_bilstm: record.pred_bilstm.clone(),
        pred_llama_zeroshot: record.pred_llama_zeroshot.clone(),
        pred_llama_finetuned: record.pred_llama_finetuned.clone(),
    })
}

/// First PREVIEW_CHARS characters, cut on a character boundary.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Selector entries for every record: `Index {i} | {preview}...`.
pub fn selector_options(dataset: &Dataset) -> Vec<SelectorOption> {
    dataset
        .iter()
        .enumerate()
        .map(|(index, record)| SelectorOption {
            index,
            label: format!("Index {index} | {}...", preview(&record.text)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::models::record;

    fn dataset() -> Dataset {
        let mut second = record("bad day", "neg");
        second.pred_llama_finetuned = Label::new("pos");
        Dataset::new(vec![record("good day", "pos"), second])
    }

    #[test]
    fn projects_fields_verbatim() {
        let ds = dataset();
        let c = inspect(&ds, 1).unwrap();
        let r = ds.get(1).unwrap();
        assert_eq!(c.index, 1);
        assert_eq!(c.text, r.text);
        assert_eq!(c.ground_truth_label, r.ground_truth_label);
        assert_eq!(c.pred_bilstm, r.pred_bilstm);
        assert_eq!(c.pred_llama_zeroshot, r.pred_llama_zeroshot);
        assert_eq!(c.pred_llama_finetuned.as_str(), "pos");
    }

    #[test]
    fn out_of_range_fails() {
        let ds = dataset();
        assert_eq!(inspect(&ds, 2), Err(IndexError { index: 2, len: 2 }));
        assert_eq!(inspect(&ds, -1), Err(IndexError { index: -1, len: 2 }));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let text = "é".repeat(60);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn selector_labels() {
        let opts = selector_options(&dataset());
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[0].label, "Index 0 | good day...");
        assert_eq!(opts[1].index, 1);
    }

    #[test]
    fn rows_start_with_ground_truth() {
        let c = inspect(&dataset(), 0).unwrap();
        let rows = c.rows();
        assert_eq!(rows[0].0, "Ground truth");
        assert_eq!(rows[0].1.as_str(), "pos");
        assert_eq!(rows.len(), 4);
    }
}
