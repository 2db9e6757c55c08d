use super::types::SourceFormat;
use crate::shared::errors::ImportError;

pub struct FormatDetector;

impl FormatDetector {
    /// Classify raw text by its first character and overall shape
    pub fn detect(content: &str) -> Result<SourceFormat, ImportError> {
        let trimmed = content.trim();

        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Ok(SourceFormat::Json);
        }

        if trimmed.contains(',') && trimmed.lines().count() > 1 {
            return Ok(SourceFormat::Csv);
        }

        Err(ImportError::UnrecognizedFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_detection() {
        assert_eq!(FormatDetector::detect("  {\"a\": 1}"), Ok(SourceFormat::Json));
        assert_eq!(FormatDetector::detect("\n[]"), Ok(SourceFormat::Json));
        // Broken JSON is still routed to the JSON parser
        assert_eq!(FormatDetector::detect("{oops"), Ok(SourceFormat::Json));
    }

    #[test]
    fn test_csv_detection() {
        assert_eq!(
            FormatDetector::detect("prediction_date,tier\n2025-01-27,gold"),
            Ok(SourceFormat::Csv)
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            FormatDetector::detect("a,b,c"),
            Err(ImportError::UnrecognizedFormat)
        );
        assert_eq!(
            FormatDetector::detect("hello\nworld"),
            Err(ImportError::UnrecognizedFormat)
        );
        assert_eq!(FormatDetector::detect("   "), Err(ImportError::UnrecognizedFormat));
        assert_eq!(
            ImportError::UnrecognizedFormat.to_string(),
            "Unable to detect file format. Please use JSON or CSV format."
        );
    }
}
