use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::modules::prediction::domain::{Prediction, Tier};

/// Text layout recognised by the format detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Csv,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "JSON"),
            SourceFormat::Csv => write!(f, "CSV"),
        }
    }
}

/// A CSV data row that was dropped because its shape did not fit the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based line number; the header is line 1
    pub row: usize,
    pub reason: String,
}

impl RowError {
    pub fn column_count_mismatch(row: usize) -> Self {
        Self {
            row,
            reason: "Column count mismatch".to_string(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.reason)
    }
}

/// Successful parse: every record passed validation and was normalised
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedBatch {
    pub format: SourceFormat,
    pub predictions: Vec<Prediction>,
    pub skipped_rows: Vec<RowError>,
    pub warnings: Vec<String>,
}

impl ParsedBatch {
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.predictions.iter().map(|p| p.matches.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPrediction {
    pub id: Uuid,
    pub label: String,
    pub tier: Tier,
    pub match_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedImport {
    pub label: String,
    pub reason: String,
}

/// Outcome of a bulk save; one entry per input record in either list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkSaveResult {
    pub saved: Vec<SavedPrediction>,
    pub failed: Vec<FailedImport>,
    pub total: usize,
}

impl BulkSaveResult {
    pub fn success_count(&self) -> usize {
        self.saved.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// One-line summary shown after the save loop finishes
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Imported {} prediction(s)", self.saved.len())
        } else {
            format!(
                "Imported {} prediction(s), {} failed",
                self.saved.len(),
                self.failed.len()
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub current: usize,
    pub total: usize,
    pub current_label: String,
    pub saved_count: usize,
    pub failed_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_display() {
        assert_eq!(
            RowError::column_count_mismatch(3).to_string(),
            "Row 3: Column count mismatch"
        );
    }

    #[test]
    fn test_summary() {
        let mut result = BulkSaveResult {
            total: 3,
            ..Default::default()
        };
        result.failed.push(FailedImport {
            label: "2025-01-27 (gold)".to_string(),
            reason: "boom".to_string(),
        });
        assert_eq!(result.summary(), "Imported 0 prediction(s), 1 failed");
        assert_eq!(result.failure_count(), 1);
        assert_eq!(result.success_count(), 0);

        result.failed.clear();
        assert_eq!(result.summary(), "Imported 0 prediction(s)");
    }
}
