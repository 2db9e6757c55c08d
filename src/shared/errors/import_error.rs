use serde::Serialize;
use thiserror::Error;

/// Terminal failures of the import pipeline.
///
/// Every variant is returned as data; nothing in the parsers panics on
/// untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ImportError {
    #[error("Unable to detect file format. Please use JSON or CSV format.")]
    UnrecognizedFormat,

    #[error("Invalid JSON format: {0}")]
    MalformedInput(String),

    #[error("CSV file is empty or has no data rows")]
    EmptyInput,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Import rejected with {} error(s)", .0.len())]
    Validation(Vec<String>),
}

impl ImportError {
    /// User-facing messages, one per line of the error panel
    pub fn messages(&self) -> Vec<String> {
        match self {
            ImportError::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
