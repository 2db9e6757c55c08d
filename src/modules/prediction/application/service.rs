use std::sync::Arc;
use uuid::Uuid;

use super::dto::PredictionForm;
use crate::modules::prediction::domain::services::{Archive, PredictionFilter, ARCHIVE_LIMIT};
use crate::modules::prediction::domain::{
    NewPrediction, NewPredictionMatch, PredictionRecord, PredictionRepository,
    PredictionWithMatches,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::utils::Validator;
use crate::{log_error, log_info, log_warn};

/// Admin-console operations over stored predictions
#[derive(Clone)]
pub struct PredictionService {
    repository: Arc<dyn PredictionRepository>,
}

impl PredictionService {
    pub fn new(repository: Arc<dyn PredictionRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> Arc<dyn PredictionRepository> {
        Arc::clone(&self.repository)
    }

    /// Insert the parent row, then its matches.
    ///
    /// If the matches cannot be written the fresh parent is deleted again so
    /// no childless prediction is left behind.
    pub async fn insert_with_matches(
        &self,
        parent: NewPrediction,
        children: Vec<NewPredictionMatch>,
    ) -> AppResult<PredictionRecord> {
        let record = self.repository.insert_prediction(parent).await?;

        if let Err(match_error) = self.repository.insert_matches(record.id, children).await {
            log_warn!(
                "Match insert failed for prediction {}; removing parent row",
                record.id
            );
            return match self.repository.delete_prediction(record.id).await {
                Ok(()) => Err(match_error),
                Err(delete_error) => {
                    log_error!(
                        "Prediction {} left without matches: {}",
                        record.id,
                        delete_error
                    );
                    Err(AppError::DatabaseError(format!(
                        "{}; orphaned prediction {} could not be removed: {}",
                        match_error, record.id, delete_error
                    )))
                }
            };
        }

        Ok(record)
    }

    pub async fn create(&self, form: &PredictionForm) -> AppResult<PredictionWithMatches> {
        let (parent, children) = form.to_rows()?;
        let record = self.insert_with_matches(parent, children).await?;
        log_info!("Prediction {} added ({})", record.id, record.tier);
        self.get(record.id).await
    }

    /// Replace the parent fields and the whole match list.
    ///
    /// If the new matches cannot be written the previous ones are put back.
    pub async fn update(&self, id: Uuid, form: &PredictionForm) -> AppResult<PredictionWithMatches> {
        let (parent, children) = form.to_rows()?;
        let previous: Vec<NewPredictionMatch> = self
            .repository
            .list_matches(id)
            .await?
            .into_iter()
            .map(NewPredictionMatch::from)
            .collect();

        self.repository.update_prediction(id, parent).await?;
        self.repository.delete_matches(id).await?;

        if let Err(insert_error) = self.repository.insert_matches(id, children).await {
            log_warn!("Match insert failed for prediction {}; restoring previous matches", id);
            if let Err(restore_error) = self.repository.insert_matches(id, previous).await {
                log_error!("Prediction {} left without matches: {}", id, restore_error);
                return Err(AppError::DatabaseError(format!(
                    "{}; previous matches of prediction {} could not be restored: {}",
                    insert_error, id, restore_error
                )));
            }
            return Err(insert_error);
        }

        log_info!("Prediction {} updated", id);
        self.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete_prediction(id).await?;
        log_info!("Prediction {} deleted", id);
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> AppResult<PredictionWithMatches> {
        let record = self
            .repository
            .find_prediction(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prediction {}", id)))?;
        let matches = self.repository.list_matches(id).await?;
        Ok(PredictionWithMatches::new(record, matches))
    }

    /// Newest first, each with its matches; fetched one prediction at a time
    pub async fn list_with_matches(&self, limit: Option<usize>) -> AppResult<Vec<PredictionWithMatches>> {
        if let Some(limit) = limit {
            Validator::validate_limit(limit)?;
        }

        let records = self.repository.list_predictions(limit).await.map_err(|e| {
            LogContext::error_with_context(&e, "Failed to fetch predictions");
            e
        })?;

        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let matches = self.repository.list_matches(record.id).await?;
            entries.push(PredictionWithMatches::new(record, matches));
        }
        Ok(entries)
    }

    /// Filters every stored prediction; `limit` only caps the rows returned
    pub async fn search(
        &self,
        filter: &PredictionFilter,
        limit: Option<usize>,
    ) -> AppResult<Vec<PredictionWithMatches>> {
        if let Some(limit) = limit {
            Validator::validate_limit(limit)?;
        }

        let mut hits = filter.apply(self.list_with_matches(None).await?);
        if let Some(limit) = limit {
            hits.truncate(limit);
        }
        Ok(hits)
    }

    pub async fn archive(&self) -> AppResult<Archive> {
        let entries = self.list_with_matches(Some(ARCHIVE_LIMIT)).await?;
        Ok(Archive::from_predictions(entries))
    }
}
