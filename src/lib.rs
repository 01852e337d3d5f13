pub mod catalog;
pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod publisher;
pub mod repository;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use generator::workflow::{GenerationOutcome, GenerationRequest, launch};
