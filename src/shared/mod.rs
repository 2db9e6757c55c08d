// Shared kernel used by every module

pub mod config;
pub mod errors;
pub mod utils;
pub mod validation;

pub use config::BackendConfig;
