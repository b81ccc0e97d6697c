// Fixed-bin histogram over per-record word counts.

use serde::Serialize;

use crate::error::VizError;
use crate::stats::LengthDistribution;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 30;

/// Bin edges and counts ready for bar rendering.
///
/// `edges.len() == counts.len() + 1`. Bin `i` covers `[edges[i], edges[i+1])`,
/// except the last bin, which also includes its right edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HistogramSpec {
    /// Bucket a length distribution into `bins` equal-width bins over [min, max].
    ///
    /// When every value is the same the range is widened to
    /// [value - 0.5, value + 0.5] so the bins still have width.
    pub fn from_lengths(lengths: &LengthDistribution, bins: usize) -> Result<Self, VizError> {
        if bins == 0 {
            return Err(VizError::InvalidBinCount);
        }

        let (mut lo, mut hi) = match (lengths.min(), lengths.max()) {
            (Some(min), Some(max)) => (min as f64, max as f64),
            _ => (0.0, 1.0),
        };
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| lo + i as f64 * width).collect();
        edges.push(hi);

        let mut counts = vec![0usize; bins];
        for &value in lengths.counts() {
            let v = value as f64;
            let mut idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            // The division can round across an edge; the stored edges decide.
            while idx > 0 && v < edges[idx] {
                idx -= 1;
            }
            while idx < bins - 1 && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Sum of bin counts; equals the number of records bucketed.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(lower edge, upper edge, count)` for each bin.
    pub fn iter_bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}
