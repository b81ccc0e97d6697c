// Word cloud — corpus text in, sized-by-frequency image plus alt text out.
//
// Word extraction follows the usual word cloud conventions: `\w[\w']+` tokens,
// English stop words removed, trailing "'s" stripped, case variants merged
// under their most common spelling, plurals folded into an existing singular.
// Layout walks an Archimedean spiral from the canvas centre and places each
// word at the first position where its box overlaps nothing already placed.
// Font size never increases from one placed word to the next, and words are
// placed in descending frequency, so size is monotonic in frequency.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use base64::Engine;
use plotters::prelude::*;
use regex::Regex;
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::error::VizError;

/// Accessible description of the image, shown wherever the image is.
pub const WORD_CLOUD_ALT_TEXT: &str = "Word cloud showing word frequency visually, \
     where the size of each word reflects how often it occurs in the tweets.";

/// Word pattern; `\w` matches Unicode word characters, so accented words stay whole.
static WORD_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\w[\w']+"));

const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 73, 125),
    RGBColor(44, 110, 73),
    RGBColor(136, 46, 114),
    RGBColor(178, 80, 24),
    RGBColor(30, 30, 30),
    RGBColor(90, 60, 150),
];

/// Word cloud canvas and layout parameters.
#[derive(Debug, Clone)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: f64,
    /// Weight of relative frequency in font size, 0.0 (rank only) to 1.0.
    pub relative_scaling: f64,
    /// Gap in pixels kept around every word box.
    pub margin: f64,
}

impl Default for WordCloud {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            max_words: 200,
            min_font_size: 4.0,
            relative_scaling: 0.5,
            margin: 2.0,
        }
    }
}

/// A word drawn on the canvas. `(x, y)` is the top-left corner of its box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    pub count: usize,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The rendered word cloud.
#[derive(Debug, Clone, Serialize)]
pub struct WordCloudImage {
    pub width: u32,
    pub height: u32,
    /// SVG document.
    pub svg: String,
    pub alt_text: String,
    pub words: Vec<PlacedWord>,
}

impl WordCloudImage {
    /// `data:` URI suitable for an `<img src>` attribute.
    pub fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.svg.as_bytes());
        format!("data:image/svg+xml;base64,{encoded}")
    }
}

impl WordCloud {
    /// Build the image for a full corpus string.
    pub fn generate(&self, corpus: &str) -> Result<WordCloudImage, VizError> {
        let frequencies = word_frequencies(corpus)?;
        let words = self.layout(&frequencies);
        debug!(
            candidates = frequencies.len(),
            placed = words.len(),
            "Laid out word cloud"
        );
        let svg = self.render(&words)?;

        Ok(WordCloudImage {
            width: self.width,
            height: self.height,
            svg,
            alt_text: WORD_CLOUD_ALT_TEXT.to_string(),
            words,
        })
    }

    /// Place words, most frequent first. Words that fit nowhere, even at the
    /// minimum font size, are dropped along with everything after them.
    pub fn layout(&self, frequencies: &[(String, usize)]) -> Vec<PlacedWord> {
        let mut placed: Vec<PlacedWord> = Vec::new();
        let Some(&(_, top)) = frequencies.first() else {
            return placed;
        };

        let canvas_w = self.width as f64;
        let canvas_h = self.height as f64;
        // Start large enough that the top word spans a good part of the canvas.
        let mut last_size = canvas_h / 2.5;

        for (word, count) in frequencies.iter().take(self.max_words) {
            let rel = *count as f64 / top as f64;
            let scaled = last_size * (self.relative_scaling * rel + (1.0 - self.relative_scaling));
            let mut size = if placed.is_empty() { last_size } else { scaled.min(last_size) };

            let spot = loop {
                if size < self.min_font_size {
                    break None;
                }
                let (w, h) = text_box(word, size);
                if w <= canvas_w && h <= canvas_h {
                    if let Some(pos) = self.find_position(w, h, &placed) {
                        break Some((pos, w, h));
                    }
                }
                size *= 0.85;
            };

            let Some(((x, y), w, h)) = spot else {
                break;
            };

            last_size = size;
            placed.push(PlacedWord {
                word: word.clone(),
                count: *count,
                font_size: size,
                x,
                y,
                width: w,
                height: h,
            });
        }

        placed
    }

    /// First collision-free top-left corner along a spiral from the centre.
    fn find_position(&self, w: f64, h: f64, placed: &[PlacedWord]) -> Option<(f64, f64)> {
        let canvas_w = self.width as f64;
        let canvas_h = self.height as f64;
        let cx = canvas_w / 2.0;
        let cy = canvas_h / 2.0;
        // The spiral is stretched horizontally to match the canvas aspect ratio.
        let aspect = canvas_w / canvas_h;
        let max_radius = (cx * cx + cy * cy).sqrt();

        let mut t: f64 = 0.0;
        loop {
            let r = 2.0 * t;
            if r > max_radius {
                return None;
            }
            let x = cx + aspect * r * t.cos() - w / 2.0;
            let y = cy + r * t.sin() - h / 2.0;

            if x >= 0.0 && y >= 0.0 && x + w <= canvas_w && y + h <= canvas_h {
                let fits = placed
                    .iter()
                    .all(|p| !self.overlaps((x, y, w, h), p));
                if fits {
                    return Some((x, y));
                }
            }
            t += 0.1;
        }
    }

    fn overlaps(&self, (x, y, w, h): (f64, f64, f64, f64), p: &PlacedWord) -> bool {
        let m = self.margin;
        x < p.x + p.width + m && p.x < x + w + m && y < p.y + p.height + m && p.y < y + h + m
    }

    fn render(&self, words: &[PlacedWord]) -> Result<String, VizError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            for (rank, word) in words.iter().enumerate() {
                let color = PALETTE[rank % PALETTE.len()];
                let style = ("sans-serif", word.font_size).into_font().color(&color);
                root.draw(&Text::new(
                    word.word.clone(),
                    (word.x.round() as i32, word.y.round() as i32),
                    style,
                ))
                .map_err(render_err)?;
            }
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }
}

/// Estimated text box for a word at a font size. Sans-serif glyphs average
/// a little over half an em wide.
fn text_box(word: &str, size: f64) -> (f64, f64) {
    (word.chars().count() as f64 * size * 0.6, size * 1.1)
}

fn render_err(e: impl std::fmt::Display) -> VizError {
    VizError::Render(e.to_string())
}

/// Extract word cloud candidates from a corpus, most frequent first.
///
/// Ties keep first-seen order.
pub fn word_frequencies(corpus: &str) -> Result<Vec<(String, usize)>, VizError> {
    let pattern = WORD_PATTERN.as_ref().map_err(render_err)?;
    let stop: HashSet<String> = get(LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect();

    // lowercase form -> (first-seen position, spelling -> count)
    let mut groups: HashMap<String, (usize, HashMap<String, usize>)> = HashMap::new();
    for m in pattern.find_iter(corpus) {
        let mut word = m.as_str();
        if let Some(stripped) = word
            .strip_suffix("'s")
            .or_else(|| word.strip_suffix("'S"))
        {
            word = stripped;
        }
        if word.chars().all(char::is_numeric) {
            continue;
        }
        let lower = word.to_lowercase();
        if stop.contains(&lower) {
            continue;
        }
        let next = groups.len();
        let entry = groups.entry(lower).or_insert_with(|| (next, HashMap::new()));
        *entry.1.entry(word.to_string()).or_insert(0) += 1;
    }

    // Fold "guitars" into "guitar" when both appear.
    let plurals: Vec<String> = groups
        .keys()
        .filter(|k| k.len() > 1 && k.ends_with('s') && !k.ends_with("ss"))
        .filter(|k| groups.contains_key(&k[..k.len() - 1]))
        .cloned()
        .collect();
    for plural in plurals {
        if let Some((_, spellings)) = groups.remove(&plural) {
            let moved: usize = spellings.values().sum();
            if let Some((_, singular)) = groups.get_mut(&plural[..plural.len() - 1]) {
                if let Some(best) = most_common_spelling(singular) {
                    *singular.entry(best).or_insert(0) += moved;
                }
            }
        }
    }

    let mut merged: Vec<(usize, String, usize)> = groups
        .into_values()
        .filter_map(|(first, spellings)| {
            let total = spellings.values().sum();
            most_common_spelling(&spellings).map(|w| (first, w, total))
        })
        .collect();
    merged.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    Ok(merged.into_iter().map(|(_, w, c)| (w, c)).collect())
}

/// The spelling with the highest count; ties go to the lexicographically smallest.
fn most_common_spelling(spellings: &HashMap<String, usize>) -> Option<String> {
    spellings
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(w, _)| w.clone())
}
