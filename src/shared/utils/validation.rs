use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::shared::errors::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn iso_date_pattern() -> Result<&'static Regex, AppError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"))
        .as_ref()
        .map_err(|e| AppError::InternalError(format!("Date pattern failed to compile: {}", e)))
}

pub struct Validator;

impl Validator {
    /// `YYYY-MM-DD` shape and a real calendar day
    pub fn is_valid_date(value: &str) -> bool {
        matches!(iso_date_pattern().map(|pattern| pattern.is_match(value)), Ok(true))
            && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
    }

    pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
        if !iso_date_pattern()?.is_match(value) {
            return Err(AppError::ValidationError(format!(
                "Invalid date '{}' (use YYYY-MM-DD)",
                value
            )));
        }
        Ok(NaiveDate::parse_from_str(value, DATE_FORMAT)?)
    }

    /// Parses decimal odds, accepting only finite values above zero
    pub fn parse_positive_odds(value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|odds| Self::is_positive_odds(*odds))
    }

    pub fn is_positive_odds(odds: f64) -> bool {
        odds.is_finite() && odds > 0.0
    }

    pub fn validate_limit(limit: usize) -> Result<(), AppError> {
        if limit == 0 {
            return Err(AppError::ValidationError(
                "Limit must be positive".to_string(),
            ));
        }
        if limit > 500 {
            return Err(AppError::ValidationError(
                "Limit cannot exceed 500".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_pattern_compiles() {
        assert!(iso_date_pattern().is_ok());
    }

    #[test]
    fn test_valid_dates() {
        assert!(Validator::is_valid_date("2025-01-27"));
        assert!(Validator::is_valid_date("2024-02-29"));
    }

    #[test]
    fn test_shape_matches_but_calendar_invalid() {
        assert!(!Validator::is_valid_date("2025-13-40"));
        assert!(!Validator::is_valid_date("2025-02-29"));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(!Validator::is_valid_date("27/01/2025"));
        assert!(!Validator::is_valid_date("2025-1-27"));
        assert!(!Validator::is_valid_date(" 2025-01-27"));
        assert!(!Validator::is_valid_date(""));
    }

    #[test]
    fn test_parse_date_errors() {
        assert!(Validator::parse_date("2025-01-27").is_ok());
        assert!(matches!(
            Validator::parse_date("tomorrow"),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            Validator::parse_date("2025-02-30"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_positive_odds() {
        assert_eq!(Validator::parse_positive_odds("1.80"), Some(1.8));
        assert_eq!(Validator::parse_positive_odds(" 2 "), Some(2.0));
        assert_eq!(Validator::parse_positive_odds("0"), None);
        assert_eq!(Validator::parse_positive_odds("-1.5"), None);
        assert_eq!(Validator::parse_positive_odds("abc"), None);
        assert_eq!(Validator::parse_positive_odds("inf"), None);
        assert_eq!(Validator::parse_positive_odds("NaN"), None);
    }

    #[test]
    fn test_validate_limit() {
        assert!(Validator::validate_limit(15).is_ok());
        assert!(Validator::validate_limit(0).is_err());
        assert!(Validator::validate_limit(501).is_err());
    }
}
