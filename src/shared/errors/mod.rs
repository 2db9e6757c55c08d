pub mod app_error;
pub mod import_error;

pub use app_error::{AppError, AppResult};
pub use import_error::ImportError;
