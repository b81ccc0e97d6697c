use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::warn;

use crate::dataset::{LoadOptions, MissingText};
use crate::session::SessionOptions;
use crate::stats::{TokenizerOptions, DEFAULT_TOP_K};
use crate::viz::DEFAULT_BINS;

/// The dataset the dashboard was built around.
pub const DEFAULT_DATA_SOURCE: &str =
    "https://github.com/Bitnair/oc_p10_poc/blob/main/test_df_with_preds.csv";

pub const DEFAULT_TITLE: &str = "Tweet Sentiment Dashboard";

/// Central configuration loaded from environment variables.
///
/// Nothing is required: every value has a default. The .env file is loaded
/// automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path or URL of the CSV dataset (SENTIBOARD_DATA_SOURCE)
    pub data_source: String,
    /// How many tokens the bar chart shows
    pub top_k: usize,
    /// Number of bins in the tweet length histogram
    pub histogram_bins: usize,
    /// Where `report` writes its files
    pub output_dir: PathBuf,
    /// Coercion of empty tweet cells
    pub missing_text: MissingText,
    /// Lowercase tokens before counting
    pub lowercase: bool,
    /// Dashboard page title
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            top_k: DEFAULT_TOP_K,
            histogram_bins: DEFAULT_BINS,
            output_dir: PathBuf::from("./output"),
            missing_text: MissingText::Empty,
            lowercase: false,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable numbers fall back to their defaults with a warning; zero
    /// bins or a zero K are rejected.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let missing_text = match env::var("SENTIBOARD_MISSING_TEXT").as_deref() {
            Ok("literal") => MissingText::Literal,
            Ok("empty") | Err(_) => MissingText::Empty,
            Ok(other) => {
                warn!(value = other, "Unknown SENTIBOARD_MISSING_TEXT, using 'empty'");
                MissingText::Empty
            }
        };

        let config = Self {
            data_source: env::var("SENTIBOARD_DATA_SOURCE").unwrap_or(defaults.data_source),
            top_k: parse_or("SENTIBOARD_TOP_K", defaults.top_k),
            histogram_bins: parse_or("SENTIBOARD_HISTOGRAM_BINS", defaults.histogram_bins),
            output_dir: env::var("SENTIBOARD_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            missing_text,
            lowercase: matches!(
                env::var("SENTIBOARD_LOWERCASE").as_deref(),
                Ok("1" | "true" | "yes")
            ),
            title: env::var("SENTIBOARD_TITLE").unwrap_or(defaults.title),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no chart can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            anyhow::bail!("SENTIBOARD_HISTOGRAM_BINS must be at least 1");
        }
        if self.top_k == 0 {
            anyhow::bail!("SENTIBOARD_TOP_K must be at least 1");
        }
        if self.data_source.trim().is_empty() {
            anyhow::bail!("SENTIBOARD_DATA_SOURCE is set but empty");
        }
        Ok(())
    }

    /// The per-session settings derived from this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            load: LoadOptions {
                missing_text: self.missing_text,
            },
            tokenizer: TokenizerOptions {
                lowercase: self.lowercase,
            },
            top_k: self.top_k,
            histogram_bins: self.histogram_bins,
        }
    }
}

fn parse_or(var: &str, default: usize) -> usize {
    match env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = var, value = %raw, default, "Not a number, using default");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_k, 20);
        assert_eq!(config.histogram_bins, 30);
    }

    #[test]
    fn zero_bins_rejected() {
        let config = Config {
            histogram_bins: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn session_options_carry_settings() {
        let config = Config {
            top_k: 5,
            lowercase: true,
            missing_text: MissingText::Literal,
            ..Config::default()
        };
        let opts = config.session_options();
        assert_eq!(opts.top_k, 5);
        assert!(opts.tokenizer.lowercase);
        assert_eq!(opts.load.missing_text, MissingText::Literal);
    }
}
