//! JSON / JSON Lines dataset reader.
//!
//! The whole file is read and validated up front so a malformed row fails
//! the run before any inference call is made.

use atoss_application::{DatasetError, RecordSource};
use atoss_domain::{Aspects, Record};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// In-memory dataset loaded from a `.jsonl` or `.json` file.
///
/// A file whose first non-blank character is `[` is read as one JSON array;
/// anything else is read as JSON Lines (one object per line, blank lines
/// ignored). Each object must carry the sentence under `text_field` and the
/// quadruplets under `labels_field`, either as a list or as a JSON-encoded
/// string.
#[derive(Debug)]
pub struct JsonDataset {
    name: String,
    records: Vec<Record>,
}

impl JsonDataset {
    /// Load with the default `text` / `labels` field names
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::open_with_fields(path, "text", "labels")
    }

    pub fn open_with_fields(
        path: impl AsRef<Path>,
        text_field: &str,
        labels_field: &str,
    ) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let fields = Fields {
            text: text_field,
            labels: labels_field,
        };
        let records = if content.trim_start().starts_with('[') {
            parse_array(&content, &fields)?
        } else {
            parse_lines(&content, &fields)?
        };

        debug!("Loaded {} records from {}", records.len(), path.display());

        Ok(Self {
            name: path.display().to_string(),
            records,
        })
    }
}

impl RecordSource for JsonDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn record(&self, index: usize) -> Result<Record, DatasetError> {
        self.records
            .get(index)
            .cloned()
            .ok_or(DatasetError::OutOfRange {
                index,
                len: self.records.len(),
            })
    }
}

struct Fields<'a> {
    text: &'a str,
    labels: &'a str,
}

fn parse_array(content: &str, fields: &Fields<'_>) -> Result<Vec<Record>, DatasetError> {
    let rows: Vec<Value> = serde_json::from_str(content).map_err(|e| DatasetError::Parse {
        line: e.line(),
        message: e.to_string(),
    })?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| to_record(index, None, row, fields))
        .collect()
}

fn parse_lines(content: &str, fields: &Fields<'_>) -> Result<Vec<Record>, DatasetError> {
    let mut records = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row: Value = serde_json::from_str(line).map_err(|e| DatasetError::Parse {
            line: line_index + 1,
            message: e.to_string(),
        })?;
        records.push(to_record(records.len(), Some(line_index + 1), &row, fields)?);
    }
    Ok(records)
}

fn to_record(
    index: usize,
    line: Option<usize>,
    row: &Value,
    fields: &Fields<'_>,
) -> Result<Record, DatasetError> {
    let invalid = |message: String| DatasetError::InvalidRecord {
        index,
        line,
        message,
    };

    let sentence = row
        .get(fields.text)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(format!("missing string field '{}'", fields.text)))?;

    let labels = row
        .get(fields.labels)
        .ok_or_else(|| invalid(format!("missing field '{}'", fields.labels)))?;
    let aspects: Aspects = serde_json::from_value(labels.clone())
        .map_err(|e| invalid(format!("invalid '{}': {}", fields.labels, e)))?;

    Record::new(sentence, aspects).map_err(|e| invalid(e.to_string()))
}
