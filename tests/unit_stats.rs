// Unit tests for the statistics engine.
//
// Covers the length distribution, token frequency table and model agreement
// against small hand-built datasets. No I/O.

use sentiboard::dataset::{Dataset, Label, Record};
use sentiboard::stats::{
    length_distribution, model_agreement, token_frequency, TokenizerOptions, DEFAULT_TOP_K,
};

fn rec(text: &str, truth: &str, bilstm: &str, zeroshot: &str, finetuned: &str) -> Record {
    Record {
        text: text.to_string(),
        ground_truth_label: Label::new(truth),
        pred_bilstm: Label::new(bilstm),
        pred_llama_zeroshot: Label::new(zeroshot),
        pred_llama_finetuned: Label::new(finetuned),
    }
}

fn good_bad_day() -> Dataset {
    Dataset::new(vec![
        rec("good day", "pos", "pos", "neg", "pos"),
        rec("bad day", "neg", "neg", "neg", "pos"),
    ])
}

// ============================================================
// Length distribution
// ============================================================

#[test]
fn lengths_follow_record_order() {
    let lengths = length_distribution(&good_bad_day());
    assert_eq!(lengths.counts(), &[2, 2]);
    assert_eq!(lengths.len(), 2);
}

#[test]
fn empty_tweet_has_zero_words() {
    let ds = Dataset::new(vec![
        rec("", "pos", "pos", "pos", "pos"),
        rec("one two three", "neg", "neg", "neg", "neg"),
    ]);
    let lengths = length_distribution(&ds);
    assert_eq!(lengths.counts(), &[0, 3]);
    assert_eq!(lengths.min(), Some(0));
    assert_eq!(lengths.max(), Some(3));
}

#[test]
fn runs_of_whitespace_count_as_one_separator() {
    let ds = Dataset::new(vec![rec("  a \t b\n\nc  ", "pos", "pos", "pos", "pos")]);
    assert_eq!(length_distribution(&ds).counts(), &[3]);
}

#[test]
fn mean_length() {
    let ds = Dataset::new(vec![
        rec("a", "pos", "pos", "pos", "pos"),
        rec("a b c", "pos", "pos", "pos", "pos"),
    ]);
    let mean = length_distribution(&ds).mean().unwrap();
    assert!((mean - 2.0).abs() < 1e-9);
}

// ============================================================
// Token frequency
// ============================================================

#[test]
fn top_one_of_good_bad_day_is_day() {
    let table = token_frequency(&good_bad_day(), TokenizerOptions::default());
    let top = table.top_k(1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].token, "day");
    assert_eq!(top[0].count, 2);
}

#[test]
fn counts_sum_to_total_words() {
    let ds = Dataset::new(vec![
        rec("the cat sat on the mat", "pos", "pos", "pos", "pos"),
        rec("", "neg", "neg", "neg", "neg"),
        rec("The cat   ran", "neg", "neg", "neg", "neg"),
    ]);
    let lengths = length_distribution(&ds);
    let table = token_frequency(&ds, TokenizerOptions::default());
    assert_eq!(table.counts().sum::<usize>(), lengths.total());
    assert_eq!(table.total(), 9);
}

#[test]
fn tokens_keep_case_by_default() {
    let ds = Dataset::new(vec![rec("Day day DAY", "pos", "pos", "pos", "pos")]);
    let table = token_frequency(&ds, TokenizerOptions::default());
    assert_eq!(table.distinct(), 3);
    assert_eq!(table.get("day"), 1);
}

#[test]
fn lowercase_option_merges_case() {
    let ds = Dataset::new(vec![rec("Day day DAY", "pos", "pos", "pos", "pos")]);
    let table = token_frequency(&ds, TokenizerOptions { lowercase: true });
    assert_eq!(table.distinct(), 1);
    assert_eq!(table.get("day"), 3);
}

#[test]
fn punctuation_stays_attached() {
    let ds = Dataset::new(vec![rec("day day.", "pos", "pos", "pos", "pos")]);
    let table = token_frequency(&ds, TokenizerOptions::default());
    assert_eq!(table.get("day"), 1);
    assert_eq!(table.get("day."), 1);
}

#[test]
fn top_k_is_capped_by_distinct_tokens() {
    let table = token_frequency(&good_bad_day(), TokenizerOptions::default());
    assert_eq!(table.top_k(DEFAULT_TOP_K).len(), 3);
    assert!(table.top_k(0).is_empty());
}

#[test]
fn top_k_is_sorted_and_ties_keep_first_seen_order() {
    let ds = Dataset::new(vec![
        rec("zebra apple mango", "pos", "pos", "pos", "pos"),
        rec("mango apple apple", "pos", "pos", "pos", "pos"),
    ]);
    let table = token_frequency(&ds, TokenizerOptions::default());
    let top_k = table.top_k(3);
    let top: Vec<(&str, usize)> = top_k
        .iter()
        .map(|t| (t.token.as_str(), t.count))
        .collect();
    assert_eq!(top, vec![("apple", 3), ("mango", 2), ("zebra", 1)]);

    // b and c tie at one; first seen wins.
    let ds = Dataset::new(vec![rec("b a c a", "pos", "pos", "pos", "pos")]);
    let table = token_frequency(&ds, TokenizerOptions::default());
    let order: Vec<String> = table.top_k(3).into_iter().map(|t| t.token).collect();
    assert_eq!(order, vec!["a", "b", "c"]);
}

#[test]
fn top_k_counts_never_increase() {
    let ds = Dataset::new(vec![rec(
        "x y z x y x w w w w q",
        "pos",
        "pos",
        "pos",
        "pos",
    )]);
    let table = token_frequency(&ds, TokenizerOptions::default());
    let top = table.top_k(10);
    assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
}

// ============================================================
// Model agreement
// ============================================================

#[test]
fn agreement_per_model() {
    let agreement = model_agreement(&good_bad_day());
    assert_eq!(agreement.len(), 3);

    let by_model: Vec<(usize, usize)> = agreement.iter().map(|a| (a.matches, a.total)).collect();
    // bi-LSTM matches both, zero-shot one, fine-tuned one.
    assert_eq!(by_model, vec![(2, 2), (1, 2), (1, 2)]);
    assert!((agreement[0].rate() - 1.0).abs() < 1e-9);
    assert!((agreement[1].rate() - 0.5).abs() < 1e-9);
}

#[test]
fn agreement_on_empty_dataset_is_zero() {
    let agreement = model_agreement(&Dataset::new(Vec::new()));
    assert!(agreement.iter().all(|a| a.total == 0 && a.rate() == 0.0));
}
