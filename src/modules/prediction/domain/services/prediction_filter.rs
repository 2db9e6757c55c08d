use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::modules::prediction::domain::entities::PredictionWithMatches;
use crate::modules::prediction::domain::value_objects::{ResultStatus, Tier};

/// Minimum Jaro-Winkler score for a word to count as a fuzzy hit
pub const FUZZY_THRESHOLD: f64 = 0.88;

/// Admin list filter; unset fields match everything
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionFilter {
    pub tier: Option<Tier>,
    pub query: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<ResultStatus>,
}

impl PredictionFilter {
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_status(mut self, status: ResultStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, entry: &PredictionWithMatches) -> bool {
        let record = &entry.prediction;

        if self.tier.is_some_and(|tier| tier != record.tier) {
            return false;
        }
        if self.from.is_some_and(|from| record.prediction_date < from) {
            return false;
        }
        if self.to.is_some_and(|to| record.prediction_date > to) {
            return false;
        }
        if self.status.is_some_and(|status| status != entry.status()) {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => entry
                .matches
                .iter()
                .any(|m| text_matches(query, &m.match_name) || text_matches(query, &m.prediction)),
        }
    }

    /// Keeps input order
    pub fn apply(&self, entries: Vec<PredictionWithMatches>) -> Vec<PredictionWithMatches> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Substring match, or every query word close to some word of the target
fn text_matches(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    if target.contains(&query) {
        return true;
    }

    let target_words: Vec<&str> = target.split_whitespace().collect();
    query.split_whitespace().all(|q| {
        target_words
            .iter()
            .any(|t| jaro_winkler(q, t) >= FUZZY_THRESHOLD)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::prediction::domain::entities::{PredictionMatchRecord, PredictionRecord};
    use uuid::Uuid;

    fn entry(day: u32, tier: Tier, result: Option<&str>, games: &[(&str, &str)]) -> PredictionWithMatches {
        let id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        PredictionWithMatches::new(
            PredictionRecord {
                id,
                prediction_date: date,
                tier,
                ticket_odds: None,
                result: result.map(str::to_string),
                created_at: None,
            },
            games
                .iter()
                .map(|(name, pick)| PredictionMatchRecord {
                    id: Uuid::new_v4(),
                    prediction_id: id,
                    match_date: date,
                    match_name: name.to_string(),
                    prediction: pick.to_string(),
                    odds: Some(1.5),
                })
                .collect(),
        )
    }

    fn sample() -> Vec<PredictionWithMatches> {
        vec![
            entry(27, Tier::Gold, Some("WIN"), &[("Arsenal vs Chelsea", "1"), ("PSG vs Lyon", "Over 2.5")]),
            entry(26, Tier::Silver, None, &[("Bayern vs Dortmund", "BTTS Yes")]),
            entry(20, Tier::Platinum, Some("LOSS"), &[("Juventus vs Inter", "2")]),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(PredictionFilter::default().apply(sample()).len(), 3);
    }

    #[test]
    fn test_filter_by_tier() {
        let result = PredictionFilter::default().with_tier(Tier::Silver).apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tier(), Tier::Silver);
    }

    #[test]
    fn test_substring_search_is_case_insensitive() {
        let result = PredictionFilter::default().with_query("chelsea").apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tier(), Tier::Gold);

        let by_pick = PredictionFilter::default().with_query("btts").apply(sample());
        assert_eq!(by_pick.len(), 1);
    }

    #[test]
    fn test_fuzzy_search_tolerates_typos() {
        let result = PredictionFilter::default().with_query("Juventos").apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].tier(), Tier::Platinum);

        let none = PredictionFilter::default().with_query("Real Madrid").apply(sample());
        assert!(none.is_empty());
    }

    #[test]
    fn test_date_range_and_status() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 21);
        let recent = PredictionFilter::default().with_range(from, None).apply(sample());
        assert_eq!(recent.len(), 2);

        let pending = PredictionFilter::default()
            .with_status(ResultStatus::Pending)
            .apply(sample());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].tier(), Tier::Silver);
    }
}
