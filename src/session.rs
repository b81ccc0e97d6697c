// Dashboard session — one loaded Dataset plus its memoized derivations.
//
// Statistics are computed on first use and kept for the session. A selection
// change only runs the record inspector; it never recomputes statistics.

use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::dataset::{DataSource, Dataset, DatasetCache, LoadOptions};
use crate::error::{IndexError, LoadError, VizError};
use crate::inspect::{self, ComparisonRecord, SelectorOption};
use crate::stats::{
    length_distribution, model_agreement, token_frequency, LengthDistribution, ModelAgreement,
    TokenFrequencyTable, TokenizerOptions, DEFAULT_TOP_K,
};
use crate::viz::{BarSpec, HistogramSpec, WordCloud, WordCloudImage, DEFAULT_BINS};

/// Settings that shape what a session loads and derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub load: LoadOptions,
    pub tokenizer: TokenizerOptions,
    pub top_k: usize,
    pub histogram_bins: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            tokenizer: TokenizerOptions::default(),
            top_k: DEFAULT_TOP_K,
            histogram_bins: DEFAULT_BINS,
        }
    }
}

pub struct Session {
    source: DataSource,
    dataset: Arc<Dataset>,
    options: SessionOptions,
    lengths: OnceLock<LengthDistribution>,
    frequencies: OnceLock<TokenFrequencyTable>,
    agreement: OnceLock<Vec<ModelAgreement>>,
    word_cloud: OnceLock<WordCloudImage>,
}

impl Session {
    /// Load (or reuse from the cache) the dataset behind `source`.
    pub async fn open(
        cache: &DatasetCache,
        source: DataSource,
        options: SessionOptions,
    ) -> Result<Self, LoadError> {
        let dataset = cache.get_or_load(&source, options.load).await?;
        info!(source = %source, records = dataset.len(), "Session opened");
        Ok(Self::from_dataset(source, dataset, options))
    }

    /// Wrap an already loaded dataset.
    pub fn from_dataset(source: DataSource, dataset: Arc<Dataset>, options: SessionOptions) -> Self {
        Self {
            source,
            dataset,
            options,
            lengths: OnceLock::new(),
            frequencies: OnceLock::new(),
            agreement: OnceLock::new(),
            word_cloud: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn lengths(&self) -> &LengthDistribution {
        self.lengths.get_or_init(|| {
            debug!("Computing length distribution");
            length_distribution(&self.dataset)
        })
    }

    pub fn frequencies(&self) -> &TokenFrequencyTable {
        self.frequencies.get_or_init(|| {
            debug!("Computing token frequencies");
            token_frequency(&self.dataset, self.options.tokenizer)
        })
    }

    pub fn agreement(&self) -> &[ModelAgreement] {
        self.agreement.get_or_init(|| model_agreement(&self.dataset))
    }

    pub fn histogram(&self) -> Result<HistogramSpec, VizError> {
        HistogramSpec::from_lengths(self.lengths(), self.options.histogram_bins)
    }

    pub fn top_tokens(&self) -> BarSpec {
        BarSpec::top_tokens(self.frequencies(), self.options.top_k)
    }

    /// The word cloud for the whole corpus, rendered once per session.
    pub fn word_cloud(&self) -> Result<&WordCloudImage, VizError> {
        if let Some(image) = self.word_cloud.get() {
            return Ok(image);
        }
        let image = WordCloud::default().generate(&self.dataset.corpus())?;
        Ok(self.word_cloud.get_or_init(|| image))
    }

    /// Compute every memoized derivation now instead of on first use.
    ///
    /// A word cloud failure is returned; the statistics are filled either way.
    pub fn warm_up(&self) -> Result<(), VizError> {
        self.lengths();
        self.frequencies();
        self.agreement();
        self.word_cloud().map(|_| ())
    }

    pub fn selector_options(&self) -> Vec<SelectorOption> {
        inspect::selector_options(&self.dataset)
    }

    /// Selection-change handler: project the chosen record.
    pub fn on_select(&self, index: i64) -> Result<ComparisonRecord, IndexError> {
        debug!(index, "Record selected");
        inspect::inspect(&self.dataset, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::models::record;

    fn session() -> Session {
        let ds = Dataset::new(vec![record("good day", "pos"), record("bad day", "neg")]);
        Session::from_dataset(
            DataSource::parse("mem.csv"),
            Arc::new(ds),
            SessionOptions::default(),
        )
    }

    #[test]
    fn statistics_are_memoized() {
        let s = session();
        let first = s.frequencies() as *const TokenFrequencyTable;
        let second = s.frequencies() as *const TokenFrequencyTable;
        assert_eq!(first, second);
        assert_eq!(s.lengths().counts(), &[2, 2]);
    }

    #[test]
    fn selection_does_not_touch_statistics() {
        let s = session();
        let record = s.on_select(0).unwrap();
        assert_eq!(record.text, "good day");
        assert!(s.frequencies.get().is_none());
        assert!(s.lengths.get().is_none());
    }

    #[test]
    fn warm_up_fills_every_memo() {
        let s = session();
        s.warm_up().unwrap();
        assert!(s.lengths.get().is_some());
        assert!(s.frequencies.get().is_some());
        assert!(s.agreement.get().is_some());
        assert!(s.word_cloud.get().is_some());
    }

    #[test]
    fn selection_out_of_range() {
        assert!(session().on_select(5).is_err());
    }

    #[test]
    fn histogram_covers_all_records() {
        assert_eq!(session().histogram().unwrap().total(), 2);
    }
}
