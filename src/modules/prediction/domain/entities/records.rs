use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::prediction::domain::value_objects::{ResultStatus, Tier};

/// Parent row before insertion (the store assigns the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPrediction {
    pub prediction_date: NaiveDate,
    pub tier: Tier,
    pub ticket_odds: Option<f64>,
    pub result: Option<String>,
}

/// Child row before insertion; `prediction_id` is supplied at insert time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPredictionMatch {
    pub match_date: NaiveDate,
    pub match_name: String,
    pub prediction: String,
    pub odds: Option<f64>,
}

/// Stored parent row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub prediction_date: NaiveDate,
    pub tier: Tier,
    pub ticket_odds: Option<f64>,
    pub result: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PredictionRecord {
    pub fn from_new(id: Uuid, new: NewPrediction) -> Self {
        Self {
            id,
            prediction_date: new.prediction_date,
            tier: new.tier,
            ticket_odds: new.ticket_odds,
            result: new.result,
            created_at: Some(Utc::now()),
        }
    }

    pub fn status(&self) -> ResultStatus {
        ResultStatus::from_result(self.result.as_deref())
    }
}

/// Stored child row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMatchRecord {
    pub id: Uuid,
    pub prediction_id: Uuid,
    pub match_date: NaiveDate,
    pub match_name: String,
    pub prediction: String,
    pub odds: Option<f64>,
}

impl PredictionMatchRecord {
    pub fn from_new(id: Uuid, prediction_id: Uuid, new: NewPredictionMatch) -> Self {
        Self {
            id,
            prediction_id,
            match_date: new.match_date,
            match_name: new.match_name,
            prediction: new.prediction,
            odds: new.odds,
        }
    }
}

impl From<PredictionMatchRecord> for NewPredictionMatch {
    fn from(record: PredictionMatchRecord) -> Self {
        Self {
            match_date: record.match_date,
            match_name: record.match_name,
            prediction: record.prediction,
            odds: record.odds,
        }
    }
}

/// Parent row joined with its matches, as shown in the admin list and archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionWithMatches {
    #[serde(flatten)]
    pub prediction: PredictionRecord,
    pub matches: Vec<PredictionMatchRecord>,
}

impl PredictionWithMatches {
    pub fn new(prediction: PredictionRecord, matches: Vec<PredictionMatchRecord>) -> Self {
        Self {
            prediction,
            matches,
        }
    }

    pub fn id(&self) -> Uuid {
        self.prediction.id
    }

    pub fn tier(&self) -> Tier {
        self.prediction.tier
    }

    pub fn status(&self) -> ResultStatus {
        self.prediction.status()
    }
}
