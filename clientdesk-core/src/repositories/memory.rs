// src/repositories/memory.rs
//
// In-process repositories for `--in-memory` runs and tests. Same contracts as the
// Postgres ones; nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use clientdesk_common::models::{AiAnalysis, Client, ClientStatus, ClientUpdate, ConfigEntry, Interaction};
use clientdesk_common::traits::repository_traits::{
    AiAnalysisRepository, AutomationConfigRepository, ClientRepository, InteractionRepository,
};

use crate::Error;

/// Client rows plus their interaction and analysis logs, shared by the three
/// client-side repository traits so `delete_all_clients` can clear everything.
#[derive(Clone, Default)]
pub struct InMemoryClientStore {
    clients: Arc<RwLock<Vec<Client>>>,
    interactions: Arc<DashMap<Uuid, Vec<Interaction>>>,
    analyses: Arc<DashMap<Uuid, Vec<AiAnalysis>>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientStore {
    async fn create_client(&self, client: &Client) -> Result<(), Error> {
        let mut clients = self.clients.write().await;
        if clients.iter().any(|c| c.id == client.id) {
            return Err(Error::Parse(format!("Client {} already exists", client.id)));
        }
        clients.push(client.clone());
        Ok(())
    }

    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, Error> {
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|c| c.id == client_id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        let clients = self.clients.read().await;
        let mut out = clients.clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn count_clients(&self) -> Result<i64, Error> {
        Ok(self.clients.read().await.len() as i64)
    }

    async fn update_client(&self, client_id: Uuid, update: &ClientUpdate) -> Result<bool, Error> {
        let mut clients = self.clients.write().await;
        match clients.iter_mut().find(|c| c.id == client_id) {
            Some(client) => {
                update.apply_to(client);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_inactive(&self, client_id: Uuid, cutoff_ms: i64) -> Result<bool, Error> {
        let mut clients = self.clients.write().await;
        match clients.iter_mut().find(|c| c.id == client_id) {
            Some(client)
                if client.status != ClientStatus::Inactive
                    && client.last_interaction_at < cutoff_ms =>
            {
                client.status = ClientStatus::Inactive;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_all_clients(&self) -> Result<u64, Error> {
        let mut clients = self.clients.write().await;
        let removed = clients.len() as u64;
        clients.clear();
        self.interactions.clear();
        self.analyses.clear();
        Ok(removed)
    }
}

#[async_trait]
impl InteractionRepository for InMemoryClientStore {
    async fn insert_interaction(&self, interaction: &Interaction) -> Result<(), Error> {
        self.interactions
            .entry(interaction.client_id)
            .or_default()
            .push(interaction.clone());
        Ok(())
    }

    async fn list_for_client(&self, client_id: Uuid) -> Result<Vec<Interaction>, Error> {
        let mut out = self
            .interactions
            .get(&client_id)
            .map(|v| v.clone())
            .unwrap_or_default();
        out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Ok(out)
    }
}

#[async_trait]
impl AiAnalysisRepository for InMemoryClientStore {
    async fn insert_analysis(&self, client_id: Uuid, analysis: &AiAnalysis) -> Result<(), Error> {
        self.analyses
            .entry(client_id)
            .or_default()
            .push(analysis.clone());
        Ok(())
    }

    async fn list_analyses(&self, client_id: Uuid) -> Result<Vec<AiAnalysis>, Error> {
        let mut out = self
            .analyses
            .get(&client_id)
            .map(|v| v.clone())
            .unwrap_or_default();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAutomationConfigRepository {
    entries: Arc<DashMap<String, ConfigEntry>>,
}

impl InMemoryAutomationConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AutomationConfigRepository for InMemoryAutomationConfigRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<ConfigEntry>, Error> {
        Ok(self.entries.get(key).map(|e| e.clone()))
    }

    async fn list_entries(&self) -> Result<Vec<ConfigEntry>, Error> {
        Ok(self.entries.iter().map(|e| e.value().clone()).collect())
    }

    async fn upsert_entry(&self, entry: &ConfigEntry) -> Result<(), Error> {
        let mut stored = entry.clone();
        if stored.description.is_none() {
            if let Some(existing) = self.entries.get(&entry.key) {
                stored.description = existing.description.clone();
            }
        }
        self.entries.insert(entry.key.clone(), stored);
        Ok(())
    }

    async fn insert_if_absent(&self, entry: &ConfigEntry) -> Result<bool, Error> {
        match self.entries.entry(entry.key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Ok(false),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(entry.clone());
                Ok(true)
            }
        }
    }
}
