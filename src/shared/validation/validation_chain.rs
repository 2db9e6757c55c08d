use std::sync::Arc;

/// Result of a validation rule check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn invalid(error: String) -> Self {
        Self {
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn with_warning(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.errors.push(error);
        self
    }

    pub fn push_error(&mut self, error: String) {
        self.errors.push(error);
    }

    /// Merge two validation results, keeping order
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

/// A single check in a validation chain. Rules are pure: they read the
/// context and report, never modify it.
pub trait ValidationRule<C: ?Sized>: Send + Sync {
    fn validate(&self, context: &C) -> ValidationResult;

    /// Name of this rule for logging
    fn rule_name(&self) -> &'static str;

    /// Check if this rule should be skipped based on context
    fn should_skip(&self, _context: &C) -> bool {
        false
    }
}

/// Ordered list of rules; by default every rule runs and all findings are kept
pub struct ValidationChain<C: ?Sized> {
    rules: Vec<Arc<dyn ValidationRule<C>>>,
    stop_on_first_error: bool,
}

impl<C: ?Sized> Clone for ValidationChain<C> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            stop_on_first_error: self.stop_on_first_error,
        }
    }
}

impl<C: ?Sized> ValidationChain<C> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            stop_on_first_error: false,
        }
    }

    /// Add a validation rule to the chain
    pub fn add_rule(mut self, rule: Arc<dyn ValidationRule<C>>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set whether to stop validation on first error
    pub fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    pub fn validate(&self, context: &C) -> ValidationResult {
        let mut combined = ValidationResult::valid();

        for rule in &self.rules {
            if rule.should_skip(context) {
                continue;
            }

            let rule_result = rule.validate(context);
            if !rule_result.is_valid() {
                log::debug!(
                    "Validation rule '{}' reported {} error(s)",
                    rule.rule_name(),
                    rule_result.errors.len()
                );
            }

            combined = combined.merge(rule_result);

            if self.stop_on_first_error && !combined.is_valid() {
                break;
            }
        }

        combined
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl<C: ?Sized> Default for ValidationChain<C> {
    fn default() -> Self {
        Self::new()
    }
}
