pub mod result_status;
pub mod tier;

pub use result_status::ResultStatus;
pub use tier::Tier;
