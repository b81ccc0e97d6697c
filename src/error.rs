// Typed errors for the data-to-visualization pipeline.
//
// LoadError is fatal at session startup and surfaced verbatim. IndexError
// is raised by the record inspector for any out-of-range selection.
// Application layers wrap these in anyhow::Error with `?`.

use thiserror::Error;

/// Failure to produce a Dataset from a source reference.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read at all (missing file, DNS, connection).
    #[error("data source unreachable: {source_ref}: {reason}")]
    Unreachable { source_ref: String, reason: String },

    /// The remote source answered with a non-success status.
    #[error("data source {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The bytes are not a well-formed table (CSV syntax, ragged rows, bad UTF-8).
    #[error("malformed data in {source_ref}: {reason}")]
    Malformed { source_ref: String, reason: String },

    /// One or more required columns are absent from the header.
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// The header carries columns outside the fixed schema.
    #[error("unexpected columns: {}", columns.join(", "))]
    UnexpectedColumns { columns: Vec<String> },

    /// The table has a valid header but no records.
    #[error("data source {source_ref} contains no records")]
    Empty { source_ref: String },
}

/// A record selection outside `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record index {index} out of range (dataset has {len} records)")]
pub struct IndexError {
    pub index: i64,
    pub len: usize,
}

/// Failure to build or render a chart.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("histogram needs at least one bin")]
    InvalidBinCount,

    #[error("chart rendering failed: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_names() {
        let err = LoadError::MissingColumns {
            columns: vec!["label".to_string(), "tweet".to_string()],
        };
        assert_eq!(err.to_string(), "missing required columns: label, tweet");
    }

    #[test]
    fn index_error_message_includes_bounds() {
        let err = IndexError { index: -1, len: 3 };
        assert_eq!(
            err.to_string(),
            "record index -1 out of range (dataset has 3 records)"
        );
    }
}
