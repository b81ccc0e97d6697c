// How often each model's prediction matches the ground truth.

use serde::Serialize;

use crate::dataset::{Dataset, Label, Record};

/// Agreement of one model with the ground-truth label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAgreement {
    pub model: &'static str,
    pub matches: usize,
    pub total: usize,
}

impl ModelAgreement {
    /// Share of records where prediction == ground truth, 0.0 for an empty dataset.
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matches as f64 / self.total as f64
        }
    }
}

const MODELS: [&str; 3] = ["bi-LSTM", "LLaMA zero-shot", "LLaMA fine-tuned"];

fn prediction(record: &Record, model: usize) -> &Label {
    match model {
        0 => &record.pred_bilstm,
        1 => &record.pred_llama_zeroshot,
        _ => &record.pred_llama_finetuned,
    }
}

/// Exact-match agreement for the three models, in display order.
pub fn model_agreement(dataset: &Dataset) -> Vec<ModelAgreement> {
    MODELS
        .iter()
        .enumerate()
        .map(|(i, &model)| ModelAgreement {
            model,
            matches: dataset
                .iter()
                .filter(|r| prediction(r, i) == &r.ground_truth_label)
                .count(),
            total: dataset.len(),
        })
        .collect()
}
