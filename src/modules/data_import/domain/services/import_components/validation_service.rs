use serde_json::{Map, Value};
use std::sync::Arc;

use super::schema::{
    number_value, FieldSpec, MATCH_FIELDS, PREDICTION_FIELDS, PREDICTION_OPTIONAL_FIELDS,
};
use crate::log_debug;
use crate::modules::prediction::domain::services::OddsCalculator;
use crate::modules::prediction::domain::{Prediction, Tier};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::shared::validation::{ValidationChain, ValidationResult, ValidationRule};

/// Largest gap tolerated between a supplied ticket_odds and the match product
pub const TICKET_ODDS_TOLERANCE: f64 = 0.01;

/// One untrusted record as it came out of a parser, with its batch position
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub value: Value,
}

impl Candidate {
    pub fn new(index: usize, value: Value) -> Self {
        Self { index, value }
    }

    /// `Prediction 1:` style prefix; positions are 1-based
    pub fn prefix(&self) -> String {
        format!("Prediction {}:", self.index + 1)
    }

    fn object(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    fn matches(&self) -> Option<&Vec<Value>> {
        self.object()?.get("matches")?.as_array()
    }
}

fn check_fields(prefix: &str, fields: &[FieldSpec], object: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for field in fields {
        if let Some(issue) = field.check(object) {
            result.push_error(format!("{} {}", prefix, field.message(issue)));
        }
    }
    result
}

struct ObjectShapeRule;

impl ValidationRule<Candidate> for ObjectShapeRule {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        if candidate.object().is_some() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(format!(
                "{} Prediction must be a JSON object",
                candidate.prefix()
            ))
        }
    }

    fn rule_name(&self) -> &'static str {
        "ObjectShape"
    }
}

/// Checks a table of top-level fields
struct FieldTableRule {
    name: &'static str,
    fields: &'static [FieldSpec],
}

impl ValidationRule<Candidate> for FieldTableRule {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        match candidate.object() {
            Some(object) => check_fields(&candidate.prefix(), self.fields, object),
            None => ValidationResult::valid(),
        }
    }

    fn rule_name(&self) -> &'static str {
        self.name
    }

    fn should_skip(&self, candidate: &Candidate) -> bool {
        candidate.object().is_none()
    }
}

/// Non-empty match list, and the exact count for tiers that fix one
struct MatchCountRule;

impl ValidationRule<Candidate> for MatchCountRule {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        let prefix = candidate.prefix();
        let count = candidate.matches().map_or(0, Vec::len);

        let mut result = ValidationResult::valid();
        if count == 0 {
            result.push_error(format!("{} No matches provided", prefix));
        }

        let tier = candidate
            .object()
            .and_then(|o| o.get("tier"))
            .and_then(Value::as_str)
            .and_then(Tier::from_exact);
        if let Some(tier) = tier {
            if let Some(required) = tier.required_match_count() {
                if count != required {
                    result.push_error(format!(
                        "{} {} tier must have exactly {} match{} (found {})",
                        prefix,
                        tier.title(),
                        required,
                        if required == 1 { "" } else { "es" },
                        count
                    ));
                }
            }
        }
        result
    }

    fn rule_name(&self) -> &'static str {
        "MatchCount"
    }

    fn should_skip(&self, candidate: &Candidate) -> bool {
        candidate.matches().is_none()
    }
}

/// Every match entry against the match field table
struct MatchFieldsRule;

impl ValidationRule<Candidate> for MatchFieldsRule {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let Some(matches) = candidate.matches() else {
            return result;
        };

        for (position, entry) in matches.iter().enumerate() {
            let prefix = format!("{} Match {}:", candidate.prefix(), position + 1);
            match entry.as_object() {
                Some(object) => result = result.merge(check_fields(&prefix, MATCH_FIELDS, object)),
                None => result.push_error(format!("{} Match must be a JSON object", prefix)),
            }
        }
        result
    }

    fn rule_name(&self) -> &'static str {
        "MatchFields"
    }

    fn should_skip(&self, candidate: &Candidate) -> bool {
        candidate.matches().is_none()
    }
}

/// Odds of every match, when all of them are usable positive numbers
fn match_odds(matches: &[Value]) -> Option<Vec<f64>> {
    matches
        .iter()
        .map(|m| number_value(m.get("odds")).filter(|odds| Validator::is_positive_odds(*odds)))
        .collect()
}

/// Rejects tickets whose combined odds cannot be represented
struct CombinedOddsRule;

impl ValidationRule<Candidate> for CombinedOddsRule {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        let overflows = candidate
            .matches()
            .and_then(|matches| match_odds(matches))
            .filter(|odds| !odds.is_empty())
            .is_some_and(|odds| OddsCalculator::ticket_odds(odds).is_none());

        if overflows {
            ValidationResult::invalid(format!(
                "{} Combined match odds out of range",
                candidate.prefix()
            ))
        } else {
            ValidationResult::valid()
        }
    }

    fn rule_name(&self) -> &'static str {
        "CombinedOdds"
    }

    fn should_skip(&self, candidate: &Candidate) -> bool {
        candidate.matches().is_none()
    }
}

/// Warns when a supplied ticket_odds disagrees with the product of the match odds
struct TicketOddsConsistencyRule;

impl ValidationRule<Candidate> for TicketOddsConsistencyRule {
    fn validate(&self, candidate: &Candidate) -> ValidationResult {
        let result = ValidationResult::valid();
        let (Some(object), Some(matches)) = (candidate.object(), candidate.matches()) else {
            return result;
        };
        let Some(supplied) = number_value(object.get("ticket_odds")) else {
            return result;
        };

        let Some(computed) = match_odds(matches).and_then(OddsCalculator::ticket_odds) else {
            return result;
        };

        if (supplied - computed).abs() > TICKET_ODDS_TOLERANCE {
            result.with_warning(format!(
                "{} ticket_odds {:.2} differs from combined match odds {:.2}",
                candidate.prefix(),
                supplied,
                computed
            ))
        } else {
            result
        }
    }

    fn rule_name(&self) -> &'static str {
        "TicketOddsConsistency"
    }
}

/// Checks candidates against the prediction schema and turns valid ones into
/// typed records. Checking never changes the candidate; filling in derived
/// values happens only in [`PredictionValidator::normalize`].
#[derive(Clone)]
pub struct PredictionValidator {
    chain: ValidationChain<Candidate>,
}

impl PredictionValidator {
    pub fn new() -> Self {
        let chain = ValidationChain::new()
            .add_rule(Arc::new(ObjectShapeRule))
            .add_rule(Arc::new(FieldTableRule {
                name: "PredictionFields",
                fields: PREDICTION_FIELDS,
            }))
            .add_rule(Arc::new(MatchCountRule))
            .add_rule(Arc::new(MatchFieldsRule))
            .add_rule(Arc::new(CombinedOddsRule))
            .add_rule(Arc::new(FieldTableRule {
                name: "PredictionOptionalFields",
                fields: PREDICTION_OPTIONAL_FIELDS,
            }))
            .add_rule(Arc::new(TicketOddsConsistencyRule));
        Self { chain }
    }

    /// Every finding for one record, in check order
    pub fn validate(&self, candidate: &Candidate) -> ValidationResult {
        self.chain.validate(candidate)
    }

    /// Build the typed record; a missing ticket_odds becomes the rounded
    /// product of the match odds. Already-set values are left alone.
    pub fn normalize(&self, candidate: &Candidate) -> AppResult<Prediction> {
        let prediction: Prediction = serde_json::from_value(candidate.value.clone())?;
        Ok(Self::fill_ticket_odds(prediction))
    }

    pub fn fill_ticket_odds(mut prediction: Prediction) -> Prediction {
        if prediction.ticket_odds.is_none() {
            prediction.ticket_odds = prediction.computed_ticket_odds();
        }
        prediction
    }

    /// Validate every candidate, then normalise the batch only if none failed
    pub fn validate_batch(
        &self,
        candidates: &[Candidate],
    ) -> Result<(Vec<Prediction>, Vec<String>), Vec<String>> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut rejected = 0;

        for candidate in candidates {
            let result = self.validate(candidate);
            if !result.is_valid() {
                rejected += 1;
            }
            errors.extend(result.errors);
            warnings.extend(result.warnings);
        }

        if !errors.is_empty() {
            log_debug!(
                "{} of {} candidate(s) rejected with {} error(s)",
                rejected,
                candidates.len(),
                errors.len()
            );
            return Err(errors);
        }

        let mut predictions = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.normalize(candidate) {
                Ok(prediction) => predictions.push(prediction),
                Err(e) => errors.push(format!("{} {}", candidate.prefix(), normalize_detail(&e))),
            }
        }

        if errors.is_empty() {
            Ok((predictions, warnings))
        } else {
            Err(errors)
        }
    }
}

impl Default for PredictionValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_detail(error: &AppError) -> String {
    match error {
        AppError::SerializationError(detail) => detail.clone(),
        other => other.to_string(),
    }
}
