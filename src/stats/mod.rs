// Descriptive statistics over the tweet text column.
//
// Both operations are pure functions of a Dataset: per-record word counts and
// a corpus-wide token frequency table.

pub mod agreement;
pub mod frequency;
pub mod lengths;
pub mod tokenize;

pub use agreement::{model_agreement, ModelAgreement};
pub use frequency::{token_frequency, TokenCount, TokenFrequencyTable, DEFAULT_TOP_K};
pub use lengths::{length_distribution, LengthDistribution};
pub use tokenize::TokenizerOptions;
