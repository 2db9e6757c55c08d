pub mod services;

// Re-exports for easy access
pub use services::import_components::{
    Candidate, CsvParser, ExampleGenerator, FormatDetector, ImportCoordinator, ImportExecutor,
    JsonParser, PredictionValidator,
};
