use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription package a prediction is published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Silver, // Single pick
    Gold,
    Platinum,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Silver, Tier::Gold, Tier::Platinum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        }
    }

    /// Capitalised name used in validation messages
    pub fn title(&self) -> &'static str {
        match self {
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Silver => "Silver Package",
            Tier::Gold => "Gold Package",
            Tier::Platinum => "Platinum Package",
        }
    }

    /// Exact number of matches a ticket must carry, if the tier fixes it
    pub fn required_match_count(&self) -> Option<usize> {
        match self {
            Tier::Silver => Some(1),
            Tier::Gold | Tier::Platinum => None,
        }
    }

    /// Case-sensitive lookup used on untrusted import input
    pub fn from_exact(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.as_str() == value)
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Silver
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            _ => Err(format!("Invalid tier: {}", s)),
        }
    }
}
