pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{MatchForm, PredictionForm, PredictionService};
pub use domain::{
    NewPrediction, NewPredictionMatch, Prediction, PredictionMatch, PredictionMatchRecord,
    PredictionRecord, PredictionRepository, PredictionWithMatches, ResultStatus, Tier,
};
pub use infrastructure::{InMemoryPredictionRepository, RestPredictionRepository};
