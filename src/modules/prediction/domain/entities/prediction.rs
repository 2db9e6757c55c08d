use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};

use super::records::{NewPrediction, NewPredictionMatch};
use crate::modules::prediction::domain::services::OddsCalculator;
use crate::modules::prediction::domain::value_objects::Tier;

/// One pick inside a prediction ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMatch {
    pub match_date: NaiveDate,
    pub match_name: String,
    pub prediction: String,
    #[serde(deserialize_with = "lenient_odds")]
    pub odds: f64,
}

/// A prediction ticket as published for one tier on one day.
///
/// Matches keep their entry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction_date: NaiveDate,
    pub tier: Tier,
    #[serde(
        default,
        deserialize_with = "lenient_optional_odds",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_odds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub matches: Vec<PredictionMatch>,
}

impl Prediction {
    /// Product of every match's odds, rounded to cents
    pub fn computed_ticket_odds(&self) -> Option<f64> {
        OddsCalculator::ticket_odds(self.matches.iter().map(|m| m.odds))
    }

    /// Short human label used in logs and bulk save reports
    pub fn label(&self) -> String {
        format!("{} ({})", self.prediction_date, self.tier)
    }

    /// Split into the parent row and its child rows for persistence
    pub fn to_rows(&self) -> (NewPrediction, Vec<NewPredictionMatch>) {
        let parent = NewPrediction {
            prediction_date: self.prediction_date,
            tier: self.tier,
            ticket_odds: self.ticket_odds,
            result: self
                .result
                .as_ref()
                .filter(|r| !r.trim().is_empty())
                .cloned(),
        };
        let children = self
            .matches
            .iter()
            .map(|m| NewPredictionMatch {
                match_date: m.match_date,
                match_name: m.match_name.clone(),
                prediction: m.prediction.clone(),
                odds: Some(m.odds),
            })
            .collect();
        (parent, children)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOdds {
    Number(f64),
    Text(String),
}

impl RawOdds {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            RawOdds::Number(n) => Ok(n),
            RawOdds::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("odds '{}' is not a number", s))),
        }
    }
}

/// Accepts `1.8` as well as `"1.80"`; AI exports quote numbers inconsistently
fn lenient_odds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawOdds::deserialize(deserializer)?.into_f64()
}

fn lenient_optional_odds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawOdds>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawOdds::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(raw) => raw.into_f64().map(Some),
    }
}
