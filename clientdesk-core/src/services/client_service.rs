// File: clientdesk-core/src/services/client_service.rs

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use clientdesk_common::models::{
    AiAnalysis, Client, ClientPage, ClientPriority, ClientQuery, ClientRecord, ClientStatus,
    ClientUpdate, Interaction, NewClient,
};
use clientdesk_common::traits::repository_traits::{
    AiAnalysisRepository, ClientRepository, InteractionRepository,
};

use crate::utils::time::now_ms;
use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub potential: usize,
    pub inactive: usize,
}

/// Client records with their histories. Status changes here are manual edits only;
/// the inactivity sweep lives in `tasks::inactivity_sweep`.
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    interactions: Arc<dyn InteractionRepository>,
    analyses: Arc<dyn AiAnalysisRepository>,
}

impl ClientService {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        interactions: Arc<dyn InteractionRepository>,
        analyses: Arc<dyn AiAnalysisRepository>,
    ) -> Self {
        Self { clients, interactions, analyses }
    }

    pub async fn create_client(&self, new_client: NewClient) -> Result<Client, Error> {
        if new_client.name.trim().is_empty() {
            return Err(Error::Parse("Client name must not be empty".into()));
        }
        let now = now_ms();
        let client = Client {
            id: Uuid::new_v4(),
            name: new_client.name.trim().to_string(),
            phone: new_client.phone.trim().to_string(),
            status: new_client.status,
            priority: ClientPriority::Medium,
            last_interaction_at: now,
            created_at: now,
        };
        self.clients.create_client(&client).await?;
        info!("Created client {} ({})", client.id, client.name);
        Ok(client)
    }

    async fn with_history(&self, client: Client) -> Result<ClientRecord, Error> {
        let interactions = self.interactions.list_for_client(client.id).await?;
        let ai_analyses = self.analyses.list_analyses(client.id).await?;
        Ok(ClientRecord { client, interactions, ai_analyses })
    }

    pub async fn get_client(&self, client_id: Uuid) -> Result<ClientRecord, Error> {
        let client = self
            .clients
            .get_client(client_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Client {} not found", client_id)))?;
        self.with_history(client).await
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientRecord>, Error> {
        let clients = self.clients.list_clients().await?;
        let mut out = Vec::with_capacity(clients.len());
        for client in clients {
            out.push(self.with_history(client).await?);
        }
        Ok(out)
    }

    pub async fn query_clients(&self, query: &ClientQuery) -> Result<ClientPage, Error> {
        let all = self.list_clients().await?;
        Ok(query.apply(all))
    }

    pub async fn count_clients(&self) -> Result<i64, Error> {
        self.clients.count_clients().await
    }

    pub async fn status_counts(&self) -> Result<StatusCounts, Error> {
        let clients = self.clients.list_clients().await?;
        let mut counts = StatusCounts { total: clients.len(), ..Default::default() };
        for c in &clients {
            match c.status {
                ClientStatus::Active => counts.active += 1,
                ClientStatus::Potential => counts.potential += 1,
                ClientStatus::Inactive => counts.inactive += 1,
            }
        }
        Ok(counts)
    }

    pub async fn update_client(&self, client_id: Uuid, update: ClientUpdate) -> Result<ClientRecord, Error> {
        if !update.is_empty() && !self.clients.update_client(client_id, &update).await? {
            return Err(Error::NotFound(format!("Client {} not found", client_id)));
        }
        self.get_client(client_id).await
    }

    /// Appends an interaction and moves `lastInteractionAt` to now. Status is left alone,
    /// so an inactive client stays inactive until someone edits it.
    pub async fn add_interaction(
        &self,
        client_id: Uuid,
        description: &str,
        kind: &str,
    ) -> Result<Interaction, Error> {
        if self.clients.get_client(client_id).await?.is_none() {
            return Err(Error::NotFound(format!("Client {} not found", client_id)));
        }
        let now = now_ms();
        let interaction = Interaction {
            id: Uuid::new_v4(),
            client_id,
            occurred_at: now,
            description: description.to_string(),
            kind: kind.to_string(),
        };
        self.interactions.insert_interaction(&interaction).await?;
        let touch = ClientUpdate { last_interaction_at: Some(now), ..Default::default() };
        self.clients.update_client(client_id, &touch).await?;
        Ok(interaction)
    }

    pub async fn add_ai_analysis(
        &self,
        client_id: Uuid,
        analysis: &str,
        priority: Option<ClientPriority>,
    ) -> Result<AiAnalysis, Error> {
        if self.clients.get_client(client_id).await?.is_none() {
            return Err(Error::NotFound(format!("Client {} not found", client_id)));
        }
        let entry = AiAnalysis {
            id: Uuid::new_v4(),
            created_at: now_ms(),
            analysis: analysis.to_string(),
            priority,
        };
        self.analyses.insert_analysis(client_id, &entry).await?;
        Ok(entry)
    }
}
