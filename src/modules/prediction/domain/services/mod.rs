pub mod archive;
pub mod odds_calculator;
pub mod prediction_filter;

pub use archive::{Archive, TierRecord, ARCHIVE_LIMIT};
pub use odds_calculator::OddsCalculator;
pub use prediction_filter::PredictionFilter;
