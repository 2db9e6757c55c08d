use serde_json::{json, Map, Value};
use std::collections::HashMap;

use super::types::{ParsedBatch, RowError, SourceFormat};
use super::validation_service::{Candidate, PredictionValidator};
use crate::shared::errors::ImportError;
use crate::{log_debug, log_warn};

/// Header columns every CSV import must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "prediction_date",
    "tier",
    "match_date",
    "match_name",
    "prediction",
    "odds",
];

/// Plain comma-separated text: no quoting, one row per match
pub struct CsvParser;

impl CsvParser {
    pub fn parse(content: &str, validator: &PredictionValidator) -> Result<ParsedBatch, ImportError> {
        let lines: Vec<&str> = content.trim().split('\n').collect();
        if lines.len() < 2 {
            return Err(ImportError::EmptyInput);
        }

        let headers: Vec<&str> = lines[0].split(',').map(str::trim).collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.contains(column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        let mut groups = PredictionGroups::default();
        let mut skipped_rows = Vec::new();

        for (line_index, line) in lines.iter().enumerate().skip(1) {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            if values.len() != headers.len() {
                let error = RowError::column_count_mismatch(line_index + 1);
                log_warn!("Skipping CSV {}", error);
                skipped_rows.push(error);
                continue;
            }

            let row: HashMap<&str, &str> = headers.iter().copied().zip(values).collect();
            groups.push(&row);
        }

        let candidates = groups.into_candidates();
        log_debug!(
            "CSV input grouped into {} candidate prediction(s), {} row(s) skipped",
            candidates.len(),
            skipped_rows.len()
        );

        let mut messages: Vec<String> = skipped_rows.iter().map(ToString::to_string).collect();

        if candidates.is_empty() {
            return Err(ImportError::Validation(messages));
        }

        match validator.validate_batch(&candidates) {
            Ok((predictions, warnings)) => Ok(ParsedBatch {
                format: SourceFormat::Csv,
                predictions,
                skipped_rows,
                warnings,
            }),
            Err(errors) => {
                messages.extend(errors);
                Err(ImportError::Validation(messages))
            }
        }
    }
}

/// Rows keyed by (prediction_date, tier), in first-seen order
#[derive(Default)]
struct PredictionGroups {
    order: Vec<(String, String)>,
    parents: HashMap<(String, String), Map<String, Value>>,
}

impl PredictionGroups {
    fn push(&mut self, row: &HashMap<&str, &str>) {
        let field = |name: &str| row.get(name).copied().unwrap_or_default();
        let key = (field("prediction_date").to_string(), field("tier").to_string());

        // ticket_odds and result come from the group's first row only
        if !self.parents.contains_key(&key) {
            let mut parent = Map::new();
            parent.insert("prediction_date".to_string(), json!(key.0));
            parent.insert("tier".to_string(), json!(key.1));
            if let Some(odds) = row.get("ticket_odds").filter(|v| !v.is_empty()) {
                parent.insert("ticket_odds".to_string(), number_or_text(odds));
            }
            if let Some(result) = row.get("result").filter(|v| !v.is_empty()) {
                parent.insert("result".to_string(), json!(result));
            }
            parent.insert("matches".to_string(), Value::Array(Vec::new()));

            self.order.push(key.clone());
            self.parents.insert(key.clone(), parent);
        }

        let entry = json!({
            "match_date": field("match_date"),
            "match_name": field("match_name"),
            "prediction": field("prediction"),
            "odds": number_or_text(field("odds")),
        });
        if let Some(Value::Array(matches)) = self
            .parents
            .get_mut(&key)
            .and_then(|parent| parent.get_mut("matches"))
        {
            matches.push(entry);
        }
    }

    fn into_candidates(mut self) -> Vec<Candidate> {
        self.order
            .iter()
            .filter_map(|key| self.parents.remove(key))
            .enumerate()
            .map(|(index, parent)| Candidate::new(index, Value::Object(parent)))
            .collect()
    }
}

/// Numeric cells become JSON numbers; anything else is left for the validator
fn number_or_text(raw: &str) -> Value {
    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => json!(number),
        _ => json!(raw),
    }
}
