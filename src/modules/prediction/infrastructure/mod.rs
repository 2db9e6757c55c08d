pub mod memory;
pub mod rest;

pub use memory::InMemoryPredictionRepository;
pub use rest::RestPredictionRepository;
