pub mod csv_parser;
pub mod example_generator;
pub mod format_detector;
pub mod import_coordinator;
pub mod import_executor;
pub mod json_parser;
pub mod schema;
pub mod types;
pub mod validation_service;

pub use csv_parser::{CsvParser, REQUIRED_COLUMNS};
pub use example_generator::ExampleGenerator;
pub use format_detector::FormatDetector;
pub use import_coordinator::{ImportCoordinator, ProgressCallback};
pub use import_executor::ImportExecutor;
pub use json_parser::JsonParser;
pub use types::{
    BulkSaveResult, FailedImport, ImportProgress, ParsedBatch, RowError, SavedPrediction,
    SourceFormat,
};
pub use validation_service::{Candidate, PredictionValidator};
