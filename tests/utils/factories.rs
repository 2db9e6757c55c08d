/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use chrono::NaiveDate;
use serde_json::{json, Value};
use tipdesk_lib::modules::prediction::domain::{Prediction, PredictionMatch, Tier};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub struct PredictionFactory {
    prediction_date: NaiveDate,
    tier: Tier,
    ticket_odds: Option<f64>,
    result: Option<String>,
    matches: Vec<PredictionMatch>,
}

impl Default for PredictionFactory {
    fn default() -> Self {
        Self {
            prediction_date: date("2025-01-27"),
            tier: Tier::Silver,
            ticket_odds: None,
            result: None,
            matches: Vec::new(),
        }
    }
}

impl PredictionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn silver(day: &str) -> Self {
        Self::new()
            .date(day)
            .with_match("Arsenal vs Chelsea", "1 (Home Win)", 1.80)
    }

    pub fn gold(day: &str) -> Self {
        Self::new()
            .date(day)
            .tier(Tier::Gold)
            .with_match("Arsenal vs Chelsea", "1 (Home Win)", 1.70)
            .with_match("Barcelona vs Real Madrid", "Over 2.5", 2.00)
            .with_match("Bayern vs Dortmund", "BTTS Yes", 2.50)
    }

    pub fn date(mut self, day: &str) -> Self {
        self.prediction_date = date(day);
        self
    }

    pub fn tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn ticket_odds(mut self, odds: f64) -> Self {
        self.ticket_odds = Some(odds);
        self
    }

    pub fn result(mut self, result: &str) -> Self {
        self.result = Some(result.to_string());
        self
    }

    pub fn with_match(mut self, name: &str, pick: &str, odds: f64) -> Self {
        self.matches.push(PredictionMatch {
            match_date: self.prediction_date,
            match_name: name.to_string(),
            prediction: pick.to_string(),
            odds,
        });
        self
    }

    pub fn build(self) -> Prediction {
        Prediction {
            prediction_date: self.prediction_date,
            tier: self.tier,
            ticket_odds: self.ticket_odds,
            result: self.result,
            matches: self.matches,
        }
    }

    /// The same record as an untrusted JSON payload
    pub fn build_json(self) -> Value {
        serde_json::to_value(self.build()).unwrap()
    }
}

/// A raw match object for hand-built payloads
pub fn match_json(day: &str, name: &str, pick: &str, odds: Value) -> Value {
    json!({
        "match_date": day,
        "match_name": name,
        "prediction": pick,
        "odds": odds,
    })
}
