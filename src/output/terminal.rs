// Colored terminal output for dataset summaries, token charts and records.
//
// This module handles all terminal-specific formatting: colors, text bar
// charts, tables. The main.rs commands delegate here.

use colored::Colorize;

use crate::inspect::{ComparisonRecord, SelectorOption};
use crate::session::Session;
use crate::stats::ModelAgreement;
use crate::viz::{BarSpec, HistogramSpec};

const BAR_WIDTH: usize = 30;

/// Display the dataset summary: size, tweet lengths, label set, model agreement.
pub fn display_summary(session: &Session) {
    let dataset = session.dataset();
    let lengths = session.lengths();

    println!(
        "\n{}",
        format!("=== Dataset: {} ({} tweets) ===", session.source(), dataset.len()).bold()
    );
    println!();

    println!(
        "  Words per tweet: min {}  max {}  mean {:.1}",
        lengths.min().unwrap_or(0),
        lengths.max().unwrap_or(0),
        lengths.mean().unwrap_or(0.0),
    );
    println!(
        "  Tokens: {} total, {} distinct",
        lengths.total(),
        session.frequencies().distinct()
    );

    let labels: Vec<&str> = dataset.label_set().into_iter().map(|l| l.as_str()).collect();
    println!("  Labels: {}", labels.join(", ").dimmed());

    match session.histogram() {
        Ok(histogram) => display_histogram(&histogram),
        Err(e) => println!("\n  {} {}", "Histogram unavailable:".yellow(), e),
    }

    display_agreement(session.agreement());
}

/// Display a length histogram as horizontal text bars.
pub fn display_histogram(histogram: &HistogramSpec) {
    println!("\n{}", "=== Distribution of tweet lengths ===".bold());
    println!();

    let max = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    for (lo, hi, count) in histogram.iter_bins() {
        let filled = (count * BAR_WIDTH).div_ceil(max);
        println!(
            "  {:>6.1}-{:<6.1} {} {}",
            lo,
            hi,
            "#".repeat(filled).bright_blue(),
            count.to_string().dimmed()
        );
    }
}

/// Display the top-token chart.
pub fn display_top_tokens(spec: &BarSpec) {
    println!(
        "\n{}",
        format!("=== Top {} most frequent words ===", spec.k).bold()
    );
    println!();

    if spec.bars.is_empty() {
        println!("  No tokens in the corpus.");
        return;
    }

    let max = spec.max_count().max(1);
    for (i, bar) in spec.bars.iter().enumerate() {
        // Build the bar: filled portion + empty portion
        let filled = (bar.count as f64 / max as f64 * BAR_WIDTH as f64).round() as usize;
        let empty = BAR_WIDTH.saturating_sub(filled);
        let text_bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

        // Color the bar by its share of the leading token
        let ratio = bar.count as f64 / max as f64;
        let colored_bar = if ratio >= 0.66 {
            text_bar.bright_green()
        } else if ratio >= 0.33 {
            text_bar.bright_yellow()
        } else {
            text_bar.bright_blue()
        };

        println!(
            "  {:>2}. {:<24} {} {}",
            i + 1,
            super::truncate_chars(&bar.token, 21).bold(),
            colored_bar,
            bar.count
        );
    }
}

/// Display how often each model matches the ground truth.
pub fn display_agreement(agreement: &[ModelAgreement]) {
    println!("\n{}", "=== Agreement with ground truth ===".bold());
    println!();
    for a in agreement {
        let pct = a.rate() * 100.0;
        let pct_str = format!("{pct:>5.1}%");
        let colored = if pct >= 80.0 {
            pct_str.green()
        } else if pct >= 50.0 {
            pct_str.yellow()
        } else {
            pct_str.red()
        };
        println!(
            "  {:<18} {}  ({}/{})",
            a.model, colored, a.matches, a.total
        );
    }
}

/// Display selector entries, at most `limit` of them.
pub fn display_selector(options: &[SelectorOption], limit: usize) {
    for option in options.iter().take(limit) {
        println!("  {}", option.label);
    }
    if options.len() > limit {
        println!(
            "  {}",
            format!("... {} more (use --limit)", options.len() - limit).dimmed()
        );
    }
}

/// Display one record's text and its four labels.
pub fn display_comparison(record: &ComparisonRecord) {
    println!(
        "\n{}",
        format!("=== Tweet #{} ===", record.index).bold()
    );
    println!("  {}", record.text);
    println!();

    for (i, (caption, label)) in record.rows().iter().enumerate() {
        // Predictions are green when they match the ground truth, red otherwise.
        let value = if i == 0 {
            label.as_str().bold()
        } else if *label == &record.ground_truth_label {
            label.as_str().green()
        } else {
            label.as_str().red()
        };
        println!("  {:<28} {}", format!("{caption}:"), value);
    }
}
