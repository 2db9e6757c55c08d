pub mod application;
pub mod commands;
pub mod domain;

// Re-exports for easy external access
pub use application::ImportService;
pub use domain::{ImportCoordinator, ImportExecutor, PredictionValidator};

// Re-export common types for shorter imports
pub use domain::services::import_components::types::{
    BulkSaveResult, FailedImport, ImportProgress, ParsedBatch, RowError, SavedPrediction,
    SourceFormat,
};
