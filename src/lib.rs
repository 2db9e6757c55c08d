pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::data_import::ImportService;
use modules::prediction::{
    InMemoryPredictionRepository, PredictionRepository, PredictionService,
    RestPredictionRepository,
};
use shared::errors::AppResult;
use shared::BackendConfig;

/// Services wired over one prediction store
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<PredictionService>,
    pub import_service: Arc<ImportService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PredictionRepository>) -> Self {
        let prediction_service = Arc::new(PredictionService::new(repository));
        let import_service = Arc::new(ImportService::new(Arc::clone(&prediction_service)));

        Self {
            prediction_service,
            import_service,
        }
    }

    /// Backed by the hosted store
    pub fn from_config(config: BackendConfig) -> AppResult<Self> {
        let repository: Arc<dyn PredictionRepository> =
            Arc::new(RestPredictionRepository::new(config)?);
        Ok(Self::new(repository))
    }

    /// Backed by a throwaway in-process store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPredictionRepository::new()))
    }
}
