use serde::{Deserialize, Serialize};

use crate::modules::prediction::domain::entities::PredictionWithMatches;
use crate::modules::prediction::domain::value_objects::{ResultStatus, Tier};

/// How many recent predictions the public archive shows
pub const ARCHIVE_LIMIT: usize = 50;

/// Settled/won counts for one tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TierRecord {
    pub total: usize,
    pub settled: usize,
    pub won: usize,
}

impl TierRecord {
    /// Share of settled tickets that won, as a percentage
    pub fn win_rate(&self) -> Option<f64> {
        if self.settled == 0 {
            return None;
        }
        Some(self.won as f64 * 100.0 / self.settled as f64)
    }
}

/// Public archive of past predictions, one bucket per tier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Archive {
    pub silver: Vec<PredictionWithMatches>,
    pub gold: Vec<PredictionWithMatches>,
    pub platinum: Vec<PredictionWithMatches>,
}

impl Archive {
    /// Buckets keep the order of `predictions`
    pub fn from_predictions(predictions: Vec<PredictionWithMatches>) -> Self {
        let mut archive = Archive::default();
        for prediction in predictions {
            archive.bucket_mut(prediction.tier()).push(prediction);
        }
        archive
    }

    pub fn bucket(&self, tier: Tier) -> &[PredictionWithMatches] {
        match tier {
            Tier::Silver => &self.silver,
            Tier::Gold => &self.gold,
            Tier::Platinum => &self.platinum,
        }
    }

    fn bucket_mut(&mut self, tier: Tier) -> &mut Vec<PredictionWithMatches> {
        match tier {
            Tier::Silver => &mut self.silver,
            Tier::Gold => &mut self.gold,
            Tier::Platinum => &mut self.platinum,
        }
    }

    pub fn record(&self, tier: Tier) -> TierRecord {
        let bucket = self.bucket(tier);
        let statuses = bucket.iter().map(|p| p.status());
        let settled = statuses.clone().filter(ResultStatus::is_settled).count();
        let won = statuses.filter(|s| *s == ResultStatus::Won).count();
        TierRecord {
            total: bucket.len(),
            settled,
            won,
        }
    }

    pub fn len(&self) -> usize {
        self.silver.len() + self.gold.len() + self.platinum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
