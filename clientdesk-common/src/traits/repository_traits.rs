use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Error;
use crate::models::{AiAnalysis, Client, ClientUpdate, ConfigEntry, Interaction};

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create_client(&self, client: &Client) -> Result<(), Error>;
    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, Error>;

    /// Every client row, newest first. No pagination; callers that page do it in memory.
    async fn list_clients(&self) -> Result<Vec<Client>, Error>;
    async fn count_clients(&self) -> Result<i64, Error>;

    /// Returns false when no client has that id.
    async fn update_client(&self, client_id: Uuid, update: &ClientUpdate) -> Result<bool, Error>;

    /// Sets status to Inactivo only if the stored status is something else and the
    /// stored last interaction is still older than `cutoff_ms`.
    /// Returns whether this call changed the row.
    async fn mark_inactive(&self, client_id: Uuid, cutoff_ms: i64) -> Result<bool, Error>;

    /// Removes every client along with its interactions and analyses.
    async fn delete_all_clients(&self) -> Result<u64, Error>;
}

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn insert_interaction(&self, interaction: &Interaction) -> Result<(), Error>;

    /// Newest first.
    async fn list_for_client(&self, client_id: Uuid) -> Result<Vec<Interaction>, Error>;
}

#[async_trait]
pub trait AiAnalysisRepository: Send + Sync {
    async fn insert_analysis(&self, client_id: Uuid, analysis: &AiAnalysis) -> Result<(), Error>;

    /// Newest first.
    async fn list_analyses(&self, client_id: Uuid) -> Result<Vec<AiAnalysis>, Error>;
}

#[async_trait]
pub trait AutomationConfigRepository: Send + Sync {
    async fn get_entry(&self, key: &str) -> Result<Option<ConfigEntry>, Error>;
    async fn list_entries(&self) -> Result<Vec<ConfigEntry>, Error>;

    /// Patch the row for `entry.key` if present, else insert it.
    async fn upsert_entry(&self, entry: &ConfigEntry) -> Result<(), Error>;

    /// Insert only when the key is absent. Returns whether a row was written.
    async fn insert_if_absent(&self, entry: &ConfigEntry) -> Result<bool, Error>;
}
