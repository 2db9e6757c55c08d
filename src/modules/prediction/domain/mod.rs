pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{
    NewPrediction, NewPredictionMatch, Prediction, PredictionMatch, PredictionMatchRecord,
    PredictionRecord, PredictionWithMatches,
};
pub use repositories::PredictionRepository;
pub use value_objects::{ResultStatus, Tier};
