pub mod validation_chain;

pub use validation_chain::{ValidationChain, ValidationResult, ValidationRule};
