//! Field tables for untrusted prediction payloads.
//!
//! Each entry names a field, whether it must be present, what shape it must
//! have, and the exact messages reported when it is absent or malformed.

use serde_json::{Map, Value};

use crate::modules::prediction::domain::Tier;
use crate::shared::utils::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `YYYY-MM-DD` that is also a real calendar day
    Date,
    /// Lowercase tier name, case-sensitive
    Tier,
    /// Non-empty string
    Text,
    /// Finite number > 0, or a string that parses to one
    PositiveNumber,
    /// JSON array
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    Missing,
    Invalid,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub missing: &'static str,
    pub invalid: &'static str,
}

impl FieldSpec {
    /// Inspect the field in `object`; `None` when it is acceptable
    pub fn check(&self, object: &Map<String, Value>) -> Option<FieldIssue> {
        let issue = inspect(self.kind, object.get(self.name))?;
        if issue == FieldIssue::Missing && !self.required {
            return None;
        }
        Some(issue)
    }

    pub fn message(&self, issue: FieldIssue) -> &'static str {
        match issue {
            FieldIssue::Missing => self.missing,
            FieldIssue::Invalid => self.invalid,
        }
    }
}

/// Required parent fields, checked first
pub const PREDICTION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "prediction_date",
        required: true,
        kind: FieldKind::Date,
        missing: "Missing prediction_date",
        invalid: "Invalid prediction_date format (use YYYY-MM-DD)",
    },
    FieldSpec {
        name: "tier",
        required: true,
        kind: FieldKind::Tier,
        missing: "Missing tier",
        invalid: "Invalid tier (must be: silver, gold, or platinum)",
    },
    FieldSpec {
        name: "matches",
        required: true,
        kind: FieldKind::List,
        missing: "Missing or invalid matches array",
        invalid: "Missing or invalid matches array",
    },
];

/// Optional parent fields; checked only when a value is supplied
pub const PREDICTION_OPTIONAL_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "ticket_odds",
        required: false,
        kind: FieldKind::PositiveNumber,
        missing: "Missing ticket_odds",
        invalid: "Invalid ticket_odds (must be a positive number)",
    },
    FieldSpec {
        name: "result",
        required: false,
        kind: FieldKind::Text,
        missing: "Missing result",
        invalid: "Invalid result (must be text)",
    },
];

pub const MATCH_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "match_date",
        required: true,
        kind: FieldKind::Date,
        missing: "Missing match_date",
        invalid: "Invalid match_date format",
    },
    FieldSpec {
        name: "match_name",
        required: true,
        kind: FieldKind::Text,
        missing: "Missing match_name",
        invalid: "Invalid match_name (must be text)",
    },
    FieldSpec {
        name: "prediction",
        required: true,
        kind: FieldKind::Text,
        missing: "Missing prediction",
        invalid: "Invalid prediction (must be text)",
    },
    FieldSpec {
        name: "odds",
        required: true,
        kind: FieldKind::PositiveNumber,
        missing: "Missing odds",
        invalid: "Invalid odds (must be a positive number)",
    },
];

/// Read a numeric field the way the schema accepts it
pub fn number_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn inspect(kind: FieldKind, value: Option<&Value>) -> Option<FieldIssue> {
    let value = match value {
        None | Some(Value::Null) => return Some(FieldIssue::Missing),
        Some(v) if kind != FieldKind::List && is_blank(v) => return Some(FieldIssue::Missing),
        Some(v) => v,
    };

    let valid = match kind {
        FieldKind::Date => value.as_str().map_or(false, Validator::is_valid_date),
        FieldKind::Tier => value.as_str().and_then(Tier::from_exact).is_some(),
        FieldKind::Text => value.is_string(),
        FieldKind::PositiveNumber => match value {
            Value::Number(_) | Value::String(_) => {
                number_value(Some(value)).map_or(false, Validator::is_positive_odds)
            }
            _ => false,
        },
        FieldKind::List => value.is_array(),
    };

    if valid {
        None
    } else {
        Some(FieldIssue::Invalid)
    }
}
