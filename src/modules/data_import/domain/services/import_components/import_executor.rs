use crate::log_info;
use crate::modules::prediction::application::PredictionService;
use crate::modules::prediction::domain::Prediction;
use crate::shared::utils::logger::{LogContext, TimedOperation};

use std::sync::Arc;

use super::types::{FailedImport, SavedPrediction};

/// Persists one validated prediction: parent row first, then its matches
#[derive(Clone)]
pub struct ImportExecutor {
    prediction_service: Arc<PredictionService>,
}

impl ImportExecutor {
    pub fn new(prediction_service: Arc<PredictionService>) -> Self {
        Self { prediction_service }
    }

    pub async fn save_single(&self, prediction: &Prediction) -> Result<SavedPrediction, FailedImport> {
        let item_timer = TimedOperation::new("save_single_prediction");
        let label = prediction.label();
        let (parent, children) = prediction.to_rows();

        match self
            .prediction_service
            .insert_with_matches(parent, children)
            .await
        {
            Ok(record) => {
                log_info!(
                    "Saved prediction {} with {} match(es) as {}",
                    label,
                    prediction.matches.len(),
                    record.id
                );
                item_timer.finish();
                Ok(SavedPrediction {
                    id: record.id,
                    label,
                    tier: prediction.tier,
                    match_count: prediction.matches.len(),
                })
            }
            Err(e) => {
                LogContext::error_with_context(&e, &format!("Failed to save prediction {}", label));
                item_timer.finish_with_info("failed");
                Err(FailedImport {
                    label,
                    reason: e.to_string(),
                })
            }
        }
    }
}
