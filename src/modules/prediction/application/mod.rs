pub mod dto;
pub mod service;

pub use dto::{MatchForm, PredictionForm};
pub use service::PredictionService;
