// src/repositories/postgres/mod.rs

pub mod automation_config;
pub mod clients;
pub mod interactions;

pub use automation_config::PostgresAutomationConfigRepository;
pub use clients::PostgresClientRepository;
pub use interactions::{PostgresAiAnalysisRepository, PostgresInteractionRepository};
