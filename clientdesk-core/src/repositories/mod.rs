// src/repositories/mod.rs

pub mod memory;
pub mod postgres;

pub use clientdesk_common::traits::repository_traits::{
    AiAnalysisRepository, AutomationConfigRepository, ClientRepository, InteractionRepository,
};

pub use memory::{InMemoryAutomationConfigRepository, InMemoryClientStore};
pub use postgres::automation_config::PostgresAutomationConfigRepository;
pub use postgres::clients::PostgresClientRepository;
pub use postgres::interactions::{PostgresAiAnalysisRepository, PostgresInteractionRepository};

use std::sync::Arc;

use sqlx::{Pool, Postgres};

/// The four repository handles the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn ClientRepository>,
    pub interactions: Arc<dyn InteractionRepository>,
    pub analyses: Arc<dyn AiAnalysisRepository>,
    pub config: Arc<dyn AutomationConfigRepository>,
}

impl Repositories {
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            clients: Arc::new(PostgresClientRepository::new(pool.clone())),
            interactions: Arc::new(PostgresInteractionRepository::new(pool.clone())),
            analyses: Arc::new(PostgresAiAnalysisRepository::new(pool.clone())),
            config: Arc::new(PostgresAutomationConfigRepository::new(pool)),
        }
    }

    /// One shared client store backs the three client-side traits.
    pub fn in_memory() -> Self {
        let store = InMemoryClientStore::new();
        Self {
            clients: Arc::new(store.clone()),
            interactions: Arc::new(store.clone()),
            analyses: Arc::new(store),
            config: Arc::new(InMemoryAutomationConfigRepository::new()),
        }
    }
}
