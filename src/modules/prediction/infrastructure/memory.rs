use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::modules::prediction::domain::{
    NewPrediction, NewPredictionMatch, PredictionMatchRecord, PredictionRecord,
    PredictionRepository,
};
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    row: T,
}

/// Process-local store with the same ordering and cascade rules as the
/// hosted backend. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryPredictionRepository {
    predictions: DashMap<Uuid, Stored<PredictionRecord>>,
    matches: DashMap<Uuid, Stored<PredictionMatchRecord>>,
    sequence: AtomicU64,
}

impl InMemoryPredictionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    pub fn prediction_count(&self) -> usize {
        self.predictions.len()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

#[async_trait]
impl PredictionRepository for InMemoryPredictionRepository {
    async fn insert_prediction(&self, prediction: NewPrediction) -> AppResult<PredictionRecord> {
        let record = PredictionRecord::from_new(Uuid::new_v4(), prediction);
        let seq = self.next_seq();
        self.predictions.insert(
            record.id,
            Stored {
                seq,
                row: record.clone(),
            },
        );
        Ok(record)
    }

    async fn insert_matches(
        &self,
        prediction_id: Uuid,
        matches: Vec<NewPredictionMatch>,
    ) -> AppResult<()> {
        if !self.predictions.contains_key(&prediction_id) {
            return Err(AppError::NotFound(format!(
                "Prediction {} does not exist",
                prediction_id
            )));
        }

        for new_match in matches {
            let record = PredictionMatchRecord::from_new(Uuid::new_v4(), prediction_id, new_match);
            let seq = self.next_seq();
            self.matches.insert(record.id, Stored { seq, row: record });
        }
        Ok(())
    }

    async fn list_predictions(&self, limit: Option<usize>) -> AppResult<Vec<PredictionRecord>> {
        let mut rows: Vec<Stored<PredictionRecord>> =
            self.predictions.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| {
            b.row
                .prediction_date
                .cmp(&a.row.prediction_date)
                .then(a.seq.cmp(&b.seq))
        });

        let rows = rows.into_iter().map(|s| s.row);
        Ok(match limit {
            Some(limit) => rows.take(limit).collect(),
            None => rows.collect(),
        })
    }

    async fn list_matches(&self, prediction_id: Uuid) -> AppResult<Vec<PredictionMatchRecord>> {
        let mut rows: Vec<Stored<PredictionMatchRecord>> = self
            .matches
            .iter()
            .filter(|e| e.value().row.prediction_id == prediction_id)
            .map(|e| e.value().clone())
            .collect();
        rows.sort_by(|a, b| a.row.match_date.cmp(&b.row.match_date).then(a.seq.cmp(&b.seq)));
        Ok(rows.into_iter().map(|s| s.row).collect())
    }

    async fn find_prediction(&self, id: Uuid) -> AppResult<Option<PredictionRecord>> {
        Ok(self.predictions.get(&id).map(|e| e.value().row.clone()))
    }

    async fn update_prediction(&self, id: Uuid, prediction: NewPrediction) -> AppResult<()> {
        let mut entry = self
            .predictions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Prediction {} does not exist", id)))?;

        let row = &mut entry.value_mut().row;
        row.prediction_date = prediction.prediction_date;
        row.tier = prediction.tier;
        row.ticket_odds = prediction.ticket_odds;
        row.result = prediction.result;
        Ok(())
    }

    async fn delete_matches(&self, prediction_id: Uuid) -> AppResult<()> {
        self.matches
            .retain(|_, stored| stored.row.prediction_id != prediction_id);
        Ok(())
    }

    async fn delete_prediction(&self, id: Uuid) -> AppResult<()> {
        if self.predictions.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("Prediction {} does not exist", id)));
        }
        // Cascade
        self.matches.retain(|_, stored| stored.row.prediction_id != id);
        Ok(())
    }
}
