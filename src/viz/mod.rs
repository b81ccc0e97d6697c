// Visualization adapter — statistics in, chart specifications and images out.
//
// Nothing here mutates a Dataset or a derived table. Every operation can be
// repeated and yields the same artifact.

pub mod bar;
pub mod histogram;
pub mod render;
pub mod wordcloud;

pub use bar::BarSpec;
pub use histogram::{HistogramSpec, DEFAULT_BINS};
pub use wordcloud::{WordCloud, WordCloudImage, WORD_CLOUD_ALT_TEXT};
