use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::prediction::domain::services::OddsCalculator;
use crate::modules::prediction::domain::{
    NewPrediction, NewPredictionMatch, PredictionWithMatches, Tier,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::validation::DATE_FORMAT;
use crate::shared::utils::Validator;

/// One match row of the admin form, kept as raw text until submit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchForm {
    pub match_date: String,
    pub match_name: String,
    pub prediction: String,
    #[serde(default)]
    pub odds: String,
}

impl MatchForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            match_date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }
}

/// Admin create/edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    pub prediction_date: String,
    pub tier: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub ticket_odds: String,
    pub matches: Vec<MatchForm>,
}

impl PredictionForm {
    /// Fresh form: today's date, silver tier, one empty match
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            prediction_date: today.format(DATE_FORMAT).to_string(),
            tier: Tier::default().to_string(),
            result: String::new(),
            ticket_odds: String::new(),
            matches: vec![MatchForm::blank(today)],
        }
    }

    /// Prefill from a stored prediction for editing
    pub fn from_record(entry: &PredictionWithMatches) -> Self {
        let record = &entry.prediction;
        Self {
            prediction_date: record.prediction_date.format(DATE_FORMAT).to_string(),
            tier: record.tier.to_string(),
            result: record.result.clone().unwrap_or_default(),
            ticket_odds: record.ticket_odds.map(|o| o.to_string()).unwrap_or_default(),
            matches: entry
                .matches
                .iter()
                .map(|m| MatchForm {
                    match_date: m.match_date.format(DATE_FORMAT).to_string(),
                    match_name: m.match_name.clone(),
                    prediction: m.prediction.clone(),
                    odds: m.odds.map(|o| o.to_string()).unwrap_or_default(),
                })
                .collect(),
        }
    }

    /// Value for the "auto-calculate" button, formatted like the odds field
    pub fn auto_ticket_odds(&self) -> String {
        let entries: Vec<&str> = self.matches.iter().map(|m| m.odds.as_str()).collect();
        format!("{:.2}", OddsCalculator::form_total(&entries))
    }

    pub fn add_match(&mut self, today: NaiveDate) {
        self.matches.push(MatchForm::blank(today));
    }

    /// A ticket keeps at least one match
    pub fn remove_match(&mut self, index: usize) -> AppResult<MatchForm> {
        if self.matches.len() <= 1 {
            return Err(AppError::ValidationError(
                "At least one match is required".to_string(),
            ));
        }
        if index >= self.matches.len() {
            return Err(AppError::InvalidInput(format!(
                "No match at position {}",
                index + 1
            )));
        }
        Ok(self.matches.remove(index))
    }

    /// Check every field and convert to rows; all problems are reported together
    pub fn to_rows(&self) -> AppResult<(NewPrediction, Vec<NewPredictionMatch>)> {
        let mut errors = Vec::new();

        let prediction_date = parse_form_date("Prediction date", &self.prediction_date, &mut errors);
        let tier = match self.tier.parse::<Tier>() {
            Ok(tier) => Some(tier),
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let ticket_odds = parse_form_odds("Ticket odds", &self.ticket_odds, &mut errors);

        if self.matches.is_empty() {
            errors.push("At least one match is required".to_string());
        }

        let mut children = Vec::with_capacity(self.matches.len());
        for (index, form) in self.matches.iter().enumerate() {
            let label = format!("Match {}", index + 1);
            if form.match_date.trim().is_empty()
                || form.match_name.trim().is_empty()
                || form.prediction.trim().is_empty()
            {
                errors.push(format!("{}: Please fill all match details", label));
                continue;
            }

            let match_date = parse_form_date(&format!("{} date", label), &form.match_date, &mut errors);
            let odds = parse_form_odds(&format!("{} odds", label), &form.odds, &mut errors);
            if let Some(match_date) = match_date {
                children.push(NewPredictionMatch {
                    match_date,
                    match_name: form.match_name.trim().to_string(),
                    prediction: form.prediction.trim().to_string(),
                    odds,
                });
            }
        }

        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors.join("; ")));
        }

        match (prediction_date, tier) {
            (Some(prediction_date), Some(tier)) => {
                let result = Some(self.result.trim().to_string()).filter(|r| !r.is_empty());
                Ok((
                    NewPrediction {
                        prediction_date,
                        tier,
                        ticket_odds,
                        result,
                    },
                    children,
                ))
            }
            _ => Err(AppError::InternalError(
                "Form validated without date or tier".to_string(),
            )),
        }
    }
}

fn parse_form_date(label: &str, value: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    match Validator::parse_date(value.trim()) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("{} must be a valid YYYY-MM-DD date", label));
            None
        }
    }
}

/// Blank means "not set"; anything else must be a positive number
fn parse_form_odds(label: &str, value: &str, errors: &mut Vec<String>) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    match Validator::parse_positive_odds(value) {
        Some(odds) => Some(odds),
        None => {
            errors.push(format!("{} must be a positive number", label));
            None
        }
    }
}
