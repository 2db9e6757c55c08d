use crate::log_info;
use crate::modules::prediction::application::PredictionService;
use crate::modules::prediction::domain::Prediction;
use crate::shared::utils::logger::{LogContext, TimedOperation};

use std::sync::Arc;

use super::import_executor::ImportExecutor;
use super::types::{BulkSaveResult, ImportProgress};

/// Receives a progress snapshot after each record
pub type ProgressCallback = Arc<dyn Fn(&ImportProgress) + Send + Sync>;

/// Runs the bulk save loop.
///
/// Records are written one at a time in input order. A failed record is
/// reported and the loop moves on; nothing is retried.
#[derive(Clone)]
pub struct ImportCoordinator {
    import_executor: ImportExecutor,
    on_progress: Option<ProgressCallback>,
}

impl ImportCoordinator {
    pub fn new(prediction_service: Arc<PredictionService>) -> Self {
        Self {
            import_executor: ImportExecutor::new(prediction_service),
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    fn emit(&self, progress: ImportProgress) {
        if let Some(callback) = &self.on_progress {
            callback(&progress);
        }
    }

    pub async fn bulk_save(&self, predictions: &[Prediction]) -> BulkSaveResult {
        let timer = TimedOperation::new("bulk_save_predictions");
        let total = predictions.len();
        let mut result = BulkSaveResult {
            total,
            ..Default::default()
        };

        log_info!("Saving {} prediction(s)", total);

        for (index, prediction) in predictions.iter().enumerate() {
            let label = prediction.label();
            LogContext::import_progress(index + 1, total, &label);

            match self.import_executor.save_single(prediction).await {
                Ok(saved) => result.saved.push(saved),
                Err(failed) => result.failed.push(failed),
            }

            self.emit(ImportProgress {
                current: index + 1,
                total,
                current_label: label,
                saved_count: result.saved.len(),
                failed_count: result.failed.len(),
            });
        }

        timer.finish_with_info(&format!(
            "{} saved, {} failed",
            result.saved.len(),
            result.failed.len()
        ));
        log_info!("{}", result.summary());

        result
    }
}
