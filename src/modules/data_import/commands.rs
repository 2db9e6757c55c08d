//! Import dialog entry points

use serde::Deserialize;

use crate::modules::data_import::{BulkSaveResult, ImportService, ParsedBatch};
use crate::modules::prediction::domain::{Prediction, Tier};
use crate::{log_debug, log_info};

#[derive(Debug, Deserialize)]
pub struct ParseImportRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkSaveRequest {
    pub predictions: Vec<Prediction>,
}

/// Errors come back as the list shown in the dialog's error panel
pub fn parse_import(
    request: ParseImportRequest,
    import_service: &ImportService,
) -> Result<ParsedBatch, Vec<String>> {
    log_debug!("parse_import called with {} byte(s)", request.content.len());
    import_service
        .parse(&request.content)
        .map_err(|e| e.messages())
}

pub fn generate_example(tier: Tier, import_service: &ImportService) -> Result<String, String> {
    import_service.example(tier).map_err(|e| e.to_string())
}

pub async fn bulk_save_predictions(
    request: BulkSaveRequest,
    import_service: &ImportService,
) -> BulkSaveResult {
    let result = import_service.bulk_save(&request.predictions).await;
    log_info!(
        "Bulk save completed - Saved: {}, Failed: {}",
        result.success_count(),
        result.failure_count()
    );
    result
}
