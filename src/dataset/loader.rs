// CSV loader — raw bytes to a schema-checked Dataset.
//
// Either the whole table is valid and a Dataset comes back, or a LoadError
// does. There is no partial result.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::fetch::SourceFetcher;
use super::models::{
    Dataset, Label, Record, BILSTM_COLUMN, LABEL_COLUMN, LLAMA_FINETUNED_COLUMN,
    LLAMA_ZEROSHOT_COLUMN, REQUIRED_COLUMNS, TWEET_COLUMN,
};
use super::source::DataSource;
use crate::error::LoadError;

/// How an empty tweet cell is turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingText {
    /// Empty string: contributes no tokens.
    #[default]
    Empty,
    /// The literal "None", reproducing the historical phantom token.
    Literal,
}

impl MissingText {
    pub const LITERAL: &'static str = "None";

    fn coerce(self) -> String {
        match self {
            MissingText::Empty => String::new(),
            MissingText::Literal => Self::LITERAL.to_string(),
        }
    }
}

/// Parameters that change what a load produces. Part of the cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    pub missing_text: MissingText,
}

/// Fetch a source and parse it into a Dataset. Single attempt.
pub async fn load(
    fetcher: &dyn SourceFetcher,
    source: &DataSource,
    options: LoadOptions,
) -> Result<Dataset, LoadError> {
    let bytes = fetcher.fetch(source).await?;
    let dataset = parse_csv(&bytes, &source.to_string(), options)?;
    info!(source = %source, records = dataset.len(), "Loaded dataset");
    Ok(dataset)
}

/// Parse CSV bytes against the fixed schema.
///
/// `source_ref` only appears in error messages.
pub fn parse_csv(
    bytes: &[u8],
    source_ref: &str,
    options: LoadOptions,
) -> Result<Dataset, LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        source_ref: source_ref.to_string(),
        reason,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| malformed(format!("unreadable header: {e}")))?
        .clone();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        // Row numbers in messages are 1-based and skip the header line.
        let line = row + 2;
        let raw = result.map_err(|e| malformed(format!("line {line}: {e}")))?;

        let text = match &raw[columns.tweet] {
            "" => options.missing_text.coerce(),
            t => t.to_string(),
        };

        let label = |col: usize, name: &str| -> Result<Label, LoadError> {
            let value = raw[col].trim();
            if value.is_empty() {
                return Err(malformed(format!("line {line}: empty value in column '{name}'")));
            }
            Ok(Label::new(value))
        };

        records.push(Record {
            text,
            ground_truth_label: label(columns.label, LABEL_COLUMN)?,
            pred_bilstm: label(columns.bilstm, BILSTM_COLUMN)?,
            pred_llama_zeroshot: label(columns.llama_zeroshot, LLAMA_ZEROSHOT_COLUMN)?,
            pred_llama_finetuned: label(columns.llama_finetuned, LLAMA_FINETUNED_COLUMN)?,
        });
    }

    if records.is_empty() {
        return Err(LoadError::Empty {
            source_ref: source_ref.to_string(),
        });
    }

    debug!(records = records.len(), "Parsed CSV");
    Ok(Dataset::new(records))
}

/// Positions of the schema columns within a header row.
struct ColumnIndex {
    tweet: usize,
    label: usize,
    bilstm: usize,
    llama_zeroshot: usize,
    llama_finetuned: usize,
}

/// Match a header against REQUIRED_COLUMNS. Column order is free; names are not.
fn resolve_columns(headers: &StringRecord) -> Result<ColumnIndex, LoadError> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut unexpected = Vec::new();

    for (i, name) in headers.iter().enumerate() {
        let name = name.trim();
        let known = REQUIRED_COLUMNS.contains(&name);
        // A duplicated schema column is as wrong as an unknown one.
        if !known || positions.insert(name, i).is_some() {
            unexpected.push(name.to_string());
        }
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !positions.contains_key(*c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(LoadError::MissingColumns { columns: missing });
    }
    if !unexpected.is_empty() {
        return Err(LoadError::UnexpectedColumns {
            columns: unexpected,
        });
    }

    Ok(ColumnIndex {
        tweet: positions[TWEET_COLUMN],
        label: positions[LABEL_COLUMN],
        bilstm: positions[BILSTM_COLUMN],
        llama_zeroshot: positions[LLAMA_ZEROSHOT_COLUMN],
        llama_finetuned: positions[LLAMA_FINETUNED_COLUMN],
    })
}
