use std::sync::Arc;

use super::super::domain::services::import_components::{
    BulkSaveResult, CsvParser, ExampleGenerator, FormatDetector, ImportCoordinator, JsonParser,
    ParsedBatch, PredictionValidator, ProgressCallback, SourceFormat,
};
use crate::modules::prediction::application::PredictionService;
use crate::modules::prediction::domain::{Prediction, Tier};
use crate::shared::errors::{AppResult, ImportError};
use crate::shared::utils::logger::TimedOperation;
use crate::{log_info, log_warn};

/// Import service - single entry point for turning exported text into stored
/// predictions. Parsing never touches the store; saving is a separate call so
/// the caller can review or edit the parsed batch first.
#[derive(Clone)]
pub struct ImportService {
    validator: PredictionValidator,
    coordinator: ImportCoordinator,
}

impl ImportService {
    pub fn new(prediction_service: Arc<PredictionService>) -> Self {
        Self {
            validator: PredictionValidator::new(),
            coordinator: ImportCoordinator::new(prediction_service),
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.coordinator = self.coordinator.with_progress(callback);
        self
    }

    /// Detect the format and parse; the whole batch is rejected if any record is invalid
    pub fn parse(&self, content: &str) -> Result<ParsedBatch, ImportError> {
        let timer = TimedOperation::new("parse_import");

        let parsed = FormatDetector::detect(content).and_then(|format| match format {
            SourceFormat::Json => JsonParser::parse(content, &self.validator),
            SourceFormat::Csv => CsvParser::parse(content, &self.validator),
        });

        match &parsed {
            Ok(batch) => {
                timer.finish_with_info(&format!("{} prediction(s)", batch.len()));
                log_info!(
                    "Parsed {} input: {} prediction(s), {} match(es), {} skipped row(s)",
                    batch.format,
                    batch.len(),
                    batch.match_count(),
                    batch.skipped_rows.len()
                );
                for warning in &batch.warnings {
                    log_warn!("{}", warning);
                }
            }
            Err(e) => {
                timer.finish_with_info("rejected");
                log_warn!("Import rejected: {}", e);
            }
        }

        parsed
    }

    pub fn example(&self, tier: Tier) -> AppResult<String> {
        ExampleGenerator::generate(tier)
    }

    /// Save each record independently; failures are collected, not raised
    pub async fn bulk_save(&self, predictions: &[Prediction]) -> BulkSaveResult {
        self.coordinator.bulk_save(predictions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::data_import::ImportProgress;
    use crate::modules::prediction::infrastructure::InMemoryPredictionRepository;
    use std::sync::Mutex;

    fn service() -> (ImportService, Arc<InMemoryPredictionRepository>) {
        let repo = Arc::new(InMemoryPredictionRepository::new());
        let predictions = Arc::new(PredictionService::new(repo.clone()));
        (ImportService::new(predictions), repo)
    }

    #[test]
    fn test_parse_dispatches_on_format() {
        let (service, _) = service();
        let csv = "prediction_date,tier,match_date,match_name,prediction,odds\n2025-01-27,silver,2025-01-27,A vs B,1,1.5";
        assert_eq!(service.parse(csv).unwrap().format, SourceFormat::Csv);

        let json = service.example(Tier::Gold).unwrap();
        let batch = service.parse(&json).unwrap();
        assert_eq!(batch.format, SourceFormat::Json);
        assert_eq!(batch.predictions[0].ticket_odds, Some(8.5));

        assert_eq!(
            service.parse("just words").unwrap_err(),
            ImportError::UnrecognizedFormat
        );
    }

    #[tokio::test]
    async fn test_bulk_save_reports_progress() {
        let (service, repo) = service();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let service = service.with_progress(Arc::new(move |p: &ImportProgress| {
            sink.lock().unwrap().push((p.current, p.saved_count));
        }));

        let batch = service.parse(&service.example(Tier::Platinum).unwrap()).unwrap();
        let result = service.bulk_save(&batch.predictions).await;

        assert_eq!(result.success_count(), 1);
        assert_eq!(result.total, 1);
        assert_eq!(repo.prediction_count(), 1);
        assert_eq!(repo.match_count(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 1)]);
    }
}
