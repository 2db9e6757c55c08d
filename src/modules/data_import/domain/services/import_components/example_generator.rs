use chrono::{NaiveDate, Utc};

use crate::modules::prediction::domain::{Prediction, PredictionMatch, Tier};
use crate::shared::errors::AppResult;

/// Canned sample payloads handed to whoever prepares an import file
pub struct ExampleGenerator;

impl ExampleGenerator {
    /// Pretty-printed JSON sample for `tier`, dated today (UTC)
    pub fn generate(tier: Tier) -> AppResult<String> {
        Self::generate_for(tier, Utc::now().date_naive())
    }

    pub fn generate_for(tier: Tier, today: NaiveDate) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&Self::example(tier, today))?)
    }

    pub fn example(tier: Tier, today: NaiveDate) -> Prediction {
        let ticket_odds = match tier {
            Tier::Silver => 1.80,
            Tier::Gold => 8.50,
            Tier::Platinum => 45.00,
        };
        let picks: &[(&str, &str, f64)] = match tier {
            Tier::Silver => &[("Arsenal vs Chelsea", "1 (Home Win)", 1.80)],
            Tier::Gold => &[
                ("Arsenal vs Chelsea", "1 (Home Win)", 1.70),
                ("Barcelona vs Real Madrid", "Over 2.5", 2.00),
                ("Bayern vs Dortmund", "BTTS Yes", 2.50),
            ],
            Tier::Platinum => &[
                ("Juventus vs Inter", "2 (Away Win)", 3.00),
                ("PSG vs Lyon", "Home Win & Over 2.5", 5.00),
                ("Atletico vs Sevilla", "1X", 3.00),
            ],
        };

        Prediction {
            prediction_date: today,
            tier,
            ticket_odds: Some(ticket_odds),
            result: None,
            matches: picks
                .iter()
                .map(|(match_name, prediction, odds)| PredictionMatch {
                    match_date: today,
                    match_name: match_name.to_string(),
                    prediction: prediction.to_string(),
                    odds: *odds,
                })
                .collect(),
        }
    }
}
