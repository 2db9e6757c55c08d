use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement state derived from the free-text `result` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pending,
    Won,
    Lost,
}

impl ResultStatus {
    /// `WIN` or a check mark marks a winning ticket; any other text is a loss
    pub fn from_result(result: Option<&str>) -> Self {
        match result.map(str::trim) {
            None | Some("") => ResultStatus::Pending,
            Some(text) if text.contains("WIN") || text.contains('✅') => ResultStatus::Won,
            Some(_) => ResultStatus::Lost,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, ResultStatus::Pending)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Pending => write!(f, "pending"),
            ResultStatus::Won => write!(f, "won"),
            ResultStatus::Lost => write!(f, "lost"),
        }
    }
}

impl std::str::FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ResultStatus::Pending),
            "won" | "win" => Ok(ResultStatus::Won),
            "lost" | "loss" => Ok(ResultStatus::Lost),
            _ => Err(format!("Invalid result status: {}", s)),
        }
    }
}
