//! Admin console entry points. Errors cross this boundary as display strings.

use serde::Deserialize;
use uuid::Uuid;

use crate::modules::prediction::domain::services::{Archive, PredictionFilter};
use crate::modules::prediction::{PredictionForm, PredictionService, PredictionWithMatches};
use crate::{log_debug, log_info};

/// Rows shown in the admin table
pub const ADMIN_LIST_LIMIT: usize = 15;

#[derive(Debug, Deserialize)]
pub struct ListPredictionsRequest {
    #[serde(default)]
    pub filter: PredictionFilter,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SavePredictionRequest {
    /// Present when editing an existing prediction
    pub id: Option<Uuid>,
    pub form: PredictionForm,
}

pub async fn list_predictions(
    request: ListPredictionsRequest,
    service: &PredictionService,
) -> Result<Vec<PredictionWithMatches>, String> {
    let limit = request.limit.unwrap_or(ADMIN_LIST_LIMIT);
    log_debug!("list_predictions called with limit {}", limit);

    service
        .search(&request.filter, Some(limit))
        .await
        .map_err(|e| e.to_string())
}

pub async fn save_prediction(
    request: SavePredictionRequest,
    service: &PredictionService,
) -> Result<PredictionWithMatches, String> {
    let result = match request.id {
        Some(id) => service.update(id, &request.form).await,
        None => service.create(&request.form).await,
    };

    match &result {
        Ok(saved) => log_info!(
            "Prediction {} saved with {} match(es)",
            saved.id(),
            saved.matches.len()
        ),
        Err(e) => log_debug!("save_prediction failed: {}", e),
    }

    result.map_err(|e| e.to_string())
}

pub async fn delete_prediction(id: Uuid, service: &PredictionService) -> Result<(), String> {
    service.delete(id).await.map_err(|e| e.to_string())
}

pub async fn get_archive(service: &PredictionService) -> Result<Archive, String> {
    service.archive().await.map_err(|e| {
        log_debug!("get_archive failed: {}", e);
        "Unable to load predictions. Please try again later.".to_string()
    })
}
