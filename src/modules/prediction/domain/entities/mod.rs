pub mod prediction;
pub mod records;

pub use prediction::{Prediction, PredictionMatch};
pub use records::{
    NewPrediction, NewPredictionMatch, PredictionMatchRecord, PredictionRecord,
    PredictionWithMatches,
};
