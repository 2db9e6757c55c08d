use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::prediction::domain::{NewPrediction, NewPredictionMatch, Tier};

/// Body of a parent-row insert/update
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRow {
    pub prediction_date: NaiveDate,
    pub tier: Tier,
    pub ticket_odds: Option<f64>,
    pub result: Option<String>,
}

impl From<NewPrediction> for PredictionRow {
    fn from(new: NewPrediction) -> Self {
        Self {
            prediction_date: new.prediction_date,
            tier: new.tier,
            ticket_odds: new.ticket_odds,
            result: new.result,
        }
    }
}

/// Body of a child-row insert, carrying the parent's foreign key
#[derive(Debug, Clone, Serialize)]
pub struct MatchRow {
    pub prediction_id: Uuid,
    pub match_date: NaiveDate,
    pub match_name: String,
    pub prediction: String,
    pub odds: Option<f64>,
}

impl MatchRow {
    pub fn new(prediction_id: Uuid, new: NewPredictionMatch) -> Self {
        Self {
            prediction_id,
            match_date: new.match_date,
            match_name: new.match_name,
            prediction: new.prediction,
            odds: new.odds,
        }
    }
}

/// `column=eq.value` filter in the backend's query syntax
pub fn eq_filter(column: &str, value: impl std::fmt::Display) -> (String, String) {
    (column.to_string(), format!("eq.{}", value))
}

/// `order=column.asc|desc` clause
pub fn order_clause(column: &str, ascending: bool) -> (String, String) {
    let direction = if ascending { "asc" } else { "desc" };
    ("order".to_string(), format!("{}.{}", column, direction))
}
