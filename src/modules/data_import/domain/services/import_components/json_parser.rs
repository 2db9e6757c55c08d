use serde_json::Value;

use super::types::{ParsedBatch, SourceFormat};
use super::validation_service::{Candidate, PredictionValidator};
use crate::log_debug;
use crate::shared::errors::ImportError;

pub struct JsonParser;

impl JsonParser {
    /// Parse a single prediction object or an array of them
    pub fn parse(content: &str, validator: &PredictionValidator) -> Result<ParsedBatch, ImportError> {
        let document: Value = serde_json::from_str(content.trim())
            .map_err(|e| ImportError::MalformedInput(e.to_string()))?;

        let candidates = Self::candidates(document);
        if candidates.is_empty() {
            return Err(ImportError::Validation(vec![
                "No predictions found in input".to_string(),
            ]));
        }
        log_debug!("JSON input holds {} candidate prediction(s)", candidates.len());

        let (predictions, warnings) = validator
            .validate_batch(&candidates)
            .map_err(ImportError::Validation)?;

        Ok(ParsedBatch {
            format: SourceFormat::Json,
            predictions,
            skipped_rows: Vec::new(),
            warnings,
        })
    }

    /// A lone object becomes a one-element list
    fn candidates(document: Value) -> Vec<Candidate> {
        match document {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, value)| Candidate::new(index, value))
                .collect(),
            other => vec![Candidate::new(0, other)],
        }
    }
}
