use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::prediction::domain::entities::{
    NewPrediction, NewPredictionMatch, PredictionMatchRecord, PredictionRecord,
};
use crate::shared::errors::AppResult;

/// Port (interface) for the hosted store that owns prediction rows.
///
/// Parent rows own their match rows by `prediction_id`; deleting a parent
/// removes its matches.
#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// Insert a parent row and return it with its assigned id
    async fn insert_prediction(&self, prediction: NewPrediction) -> AppResult<PredictionRecord>;

    /// Insert child rows for an existing parent, keeping the given order
    async fn insert_matches(
        &self,
        prediction_id: Uuid,
        matches: Vec<NewPredictionMatch>,
    ) -> AppResult<()>;

    /// Parent rows, newest `prediction_date` first
    async fn list_predictions(&self, limit: Option<usize>) -> AppResult<Vec<PredictionRecord>>;

    /// Child rows of one parent, earliest `match_date` first
    async fn list_matches(&self, prediction_id: Uuid) -> AppResult<Vec<PredictionMatchRecord>>;

    async fn find_prediction(&self, id: Uuid) -> AppResult<Option<PredictionRecord>>;

    async fn update_prediction(&self, id: Uuid, prediction: NewPrediction) -> AppResult<()>;

    /// Remove every child row of a parent
    async fn delete_matches(&self, prediction_id: Uuid) -> AppResult<()>;

    /// Remove a parent row together with its children
    async fn delete_prediction(&self, id: Uuid) -> AppResult<()>;
}
