// Unit tests for the visualization adapter.
//
// Histogram bucketing, top-K bar specs, SVG rendering and word cloud layout.
// Charts are rendered to in-memory strings; nothing touches the filesystem.

use sentiboard::stats::{LengthDistribution, TokenFrequencyTable};
use sentiboard::stats::{token_frequency, TokenizerOptions};
use sentiboard::dataset::{Dataset, Label, Record};
use sentiboard::viz::render::{bar_svg, bar_title, histogram_svg};
use sentiboard::viz::wordcloud::word_frequencies;
use sentiboard::viz::{BarSpec, HistogramSpec, WordCloud, DEFAULT_BINS, WORD_CLOUD_ALT_TEXT};

fn lengths(v: &[usize]) -> LengthDistribution {
    LengthDistribution::from_counts(v.to_vec())
}

fn table(texts: &[&str]) -> TokenFrequencyTable {
    let records = texts
        .iter()
        .map(|t| Record {
            text: t.to_string(),
            ground_truth_label: Label::new("pos"),
            pred_bilstm: Label::new("pos"),
            pred_llama_zeroshot: Label::new("pos"),
            pred_llama_finetuned: Label::new("pos"),
        })
        .collect();
    token_frequency(&Dataset::new(records), TokenizerOptions::default())
}

// ============================================================
// Histogram
// ============================================================

#[test]
fn histogram_counts_sum_to_record_count() {
    let values = [1, 3, 3, 7, 12, 12, 12, 25, 40, 0];
    let spec = HistogramSpec::from_lengths(&lengths(&values), DEFAULT_BINS).unwrap();
    assert_eq!(spec.bins(), DEFAULT_BINS);
    assert_eq!(spec.edges.len(), DEFAULT_BINS + 1);
    assert_eq!(spec.total(), values.len());
}

#[test]
fn histogram_max_value_lands_in_last_bin() {
    let spec = HistogramSpec::from_lengths(&lengths(&[0, 10]), 5).unwrap();
    assert_eq!(spec.counts, vec![1, 0, 0, 0, 1]);
    assert_eq!(spec.edges.first(), Some(&0.0));
    assert_eq!(spec.edges.last(), Some(&10.0));
}

#[test]
fn every_length_falls_inside_its_bin_edges() {
    for lo in 0..5usize {
        for hi in (lo + 1)..80 {
            for bins in [1, 3, 7, 10, 29, 30, 31, 50] {
                let values: Vec<usize> = (lo..=hi).collect();
                let spec = HistogramSpec::from_lengths(&lengths(&values), bins).unwrap();
                assert_eq!(spec.total(), values.len());

                // Replay the counts bin by bin against the edges.
                let mut expected = vec![0usize; bins];
                for &v in &values {
                    let v = v as f64;
                    let bin = (0..bins)
                        .find(|&i| {
                            let last = i == bins - 1;
                            spec.edges[i] <= v
                                && (v < spec.edges[i + 1] || (last && v <= spec.edges[i + 1]))
                        })
                        .unwrap_or_else(|| panic!("{v} outside [{lo}, {hi}] edges"));
                    expected[bin] += 1;
                }
                assert_eq!(spec.counts, expected, "lo={lo} hi={hi} bins={bins}");
            }
        }
    }
}

#[test]
fn tweet_of_23_words_lands_on_edge_bin() {
    let spec = HistogramSpec::from_lengths(&lengths(&[0, 23, 46]), DEFAULT_BINS).unwrap();
    let bin = spec
        .iter_bins()
        .position(|(lo, hi, _)| lo <= 23.0 && 23.0 < hi)
        .unwrap();
    assert_eq!(spec.counts[bin], 1);
}

#[test]
fn histogram_of_identical_lengths_has_width() {
    let spec = HistogramSpec::from_lengths(&lengths(&[4, 4, 4]), 3).unwrap();
    assert_eq!(spec.total(), 3);
    assert_eq!(spec.edges.first(), Some(&3.5));
    assert_eq!(spec.edges.last(), Some(&4.5));
}

#[test]
fn histogram_rejects_zero_bins() {
    assert!(HistogramSpec::from_lengths(&lengths(&[1, 2]), 0).is_err());
}

#[test]
fn histogram_of_no_records_is_empty() {
    let spec = HistogramSpec::from_lengths(&lengths(&[]), 4).unwrap();
    assert_eq!(spec.total(), 0);
    assert_eq!(spec.bins(), 4);
}

#[test]
fn histogram_svg_has_title() {
    let spec = HistogramSpec::from_lengths(&lengths(&[1, 2, 2, 5]), 4).unwrap();
    let svg = histogram_svg(&spec).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Distribution of tweet lengths"));
}

// ============================================================
// Top-K bar chart
// ============================================================

#[test]
fn bar_spec_is_top_k_in_order() {
    let spec = BarSpec::top_tokens(&table(&["good day", "bad day", "day off"]), 2);
    assert_eq!(spec.k, 2);
    assert_eq!(spec.bars.len(), 2);
    assert_eq!(spec.bars[0].token, "day");
    assert_eq!(spec.bars[0].count, 3);
    assert_eq!(spec.bars[1].token, "good");
    assert_eq!(spec.max_count(), 3);
}

#[test]
fn bar_spec_with_fewer_tokens_than_k() {
    let spec = BarSpec::top_tokens(&table(&["one two"]), 20);
    assert_eq!(spec.bars.len(), 2);
}

#[test]
fn bar_title_names_k() {
    assert_eq!(bar_title(20), "Top 20 most frequent words");
    assert_eq!(bar_title(5), "Top 5 most frequent words");
}

#[test]
fn bar_svg_renders() {
    let spec = BarSpec::top_tokens(&table(&["good day", "bad day"]), 20);
    let svg = bar_svg(&spec).unwrap();
    assert!(svg.contains("Top 20 most frequent words"));
}

// ============================================================
// Word cloud
// ============================================================

#[test]
fn word_frequencies_drop_stop_words_and_numbers() {
    let freqs = word_frequencies("the pizza and the pizza 2024 guitar").unwrap();
    let words: Vec<&str> = freqs.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["pizza", "guitar"]);
    assert_eq!(freqs[0].1, 2);
}

#[test]
fn word_frequencies_keep_accented_words() {
    let freqs = word_frequencies("café café naïve").unwrap();
    assert_eq!(freqs[0], ("café".to_string(), 2));
    assert_eq!(freqs[1], ("naïve".to_string(), 1));
}

#[test]
fn word_cloud_sizes_follow_frequency() {
    let corpus = "pizza pizza pizza pizza guitar guitar volcano";
    let image = WordCloud::default().generate(corpus).unwrap();
    assert_eq!(image.alt_text, WORD_CLOUD_ALT_TEXT);
    assert_eq!((image.width, image.height), (800, 400));
    assert_eq!(image.words[0].word, "pizza");
    assert!(image
        .words
        .windows(2)
        .all(|w| w[0].font_size >= w[1].font_size));
}

#[test]
fn word_cloud_words_stay_on_canvas() {
    let corpus = "pizza guitar volcano ".repeat(10) + "lantern harbor meadow";
    let image = WordCloud::default().generate(&corpus).unwrap();
    for w in &image.words {
        assert!(w.x >= 0.0 && w.y >= 0.0, "{} off canvas", w.word);
        assert!(w.x + w.width <= image.width as f64 + 1e-6);
        assert!(w.y + w.height <= image.height as f64 + 1e-6);
    }
}

#[test]
fn word_cloud_of_empty_corpus_is_blank() {
    let image = WordCloud::default().generate("").unwrap();
    assert!(image.words.is_empty());
    assert!(image.data_uri().starts_with("data:image/svg+xml;base64,"));
}
