// File: src/services/mod.rs

pub mod client_service;
pub mod config_service;
pub mod seed_service;

pub use client_service::{ClientService, StatusCounts};
pub use config_service::ConfigService;
pub use seed_service::SeedService;
