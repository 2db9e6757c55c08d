pub mod service;

pub use service::ImportService;
