// File: clientdesk-core/src/services/seed_service.rs
//
// Demo data for local runs. Timestamps are back-dated from "now" so the
// inactivity sweep has something to do right away.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use clientdesk_common::models::client::MILLIS_PER_DAY;
use clientdesk_common::models::{Client, ClientPriority, ClientStatus, Interaction};
use clientdesk_common::traits::repository_traits::{ClientRepository, InteractionRepository};

use crate::utils::time::now_ms;
use crate::Error;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub message: String,
    pub clients_created: usize,
    pub interactions_created: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSummary {
    pub message: String,
    pub clients_deleted: u64,
}

struct SeedClient {
    name: &'static str,
    phone: &'static str,
    status: ClientStatus,
    priority: ClientPriority,
    days_ago: i64,
}

struct SeedInteraction {
    client_index: usize,
    days_ago: i64,
    description: &'static str,
    kind: &'static str,
}

const SEED_CLIENTS: &[SeedClient] = &[
    SeedClient { name: "María González", phone: "+54 11 1234-5678", status: ClientStatus::Active, priority: ClientPriority::High, days_ago: 2 },
    SeedClient { name: "Carlos Rodríguez", phone: "+54 11 2345-6789", status: ClientStatus::Potential, priority: ClientPriority::Medium, days_ago: 15 },
    SeedClient { name: "Ana Martínez", phone: "+54 11 3456-7890", status: ClientStatus::Inactive, priority: ClientPriority::Low, days_ago: 45 },
    SeedClient { name: "Luis Fernández", phone: "+54 11 4567-8901", status: ClientStatus::Active, priority: ClientPriority::Medium, days_ago: 5 },
    SeedClient { name: "Sofia López", phone: "+54 11 5678-9012", status: ClientStatus::Potential, priority: ClientPriority::High, days_ago: 8 },
    SeedClient { name: "Diego Pérez", phone: "+54 11 6789-0123", status: ClientStatus::Active, priority: ClientPriority::High, days_ago: 1 },
    SeedClient { name: "Valentina García", phone: "+54 11 7890-1234", status: ClientStatus::Inactive, priority: ClientPriority::Low, days_ago: 60 },
    SeedClient { name: "Roberto Silva", phone: "+54 11 8901-2345", status: ClientStatus::Potential, priority: ClientPriority::Medium, days_ago: 20 },
];

const SEED_INTERACTIONS: &[SeedInteraction] = &[
    SeedInteraction { client_index: 0, days_ago: 2, description: "Llamada inicial para presentar el producto. Cliente muy interesado.", kind: "Llamada" },
    SeedInteraction { client_index: 0, days_ago: 1, description: "Envío de propuesta comercial por email. Esperando respuesta.", kind: "Email" },
    SeedInteraction { client_index: 1, days_ago: 15, description: "Reunión presencial. Cliente evaluando opciones.", kind: "Reunión" },
    SeedInteraction { client_index: 3, days_ago: 5, description: "Seguimiento post-venta. Cliente satisfecho con el servicio.", kind: "Llamada" },
    SeedInteraction { client_index: 3, days_ago: 3, description: "Propuesta de servicio adicional enviada.", kind: "Email" },
    SeedInteraction { client_index: 4, days_ago: 8, description: "Primera llamada de prospección. Cliente potencial interesado.", kind: "Llamada" },
    SeedInteraction { client_index: 5, days_ago: 1, description: "Cliente muy activo. Interesado en ampliar el contrato.", kind: "WhatsApp" },
    SeedInteraction { client_index: 5, days_ago: 3, description: "Reunión de seguimiento. Excelente relación comercial.", kind: "Reunión" },
];

#[derive(Clone)]
pub struct SeedService {
    clients: Arc<dyn ClientRepository>,
    interactions: Arc<dyn InteractionRepository>,
}

impl SeedService {
    pub fn new(clients: Arc<dyn ClientRepository>, interactions: Arc<dyn InteractionRepository>) -> Self {
        Self { clients, interactions }
    }

    pub async fn seed(&self) -> Result<SeedSummary, Error> {
        let now = now_ms();
        let mut ids = Vec::with_capacity(SEED_CLIENTS.len());

        for (i, seed) in SEED_CLIENTS.iter().enumerate() {
            let client = Client {
                id: Uuid::new_v4(),
                name: seed.name.to_string(),
                phone: seed.phone.to_string(),
                status: seed.status,
                priority: seed.priority,
                last_interaction_at: now - seed.days_ago * MILLIS_PER_DAY,
                // keep insertion order visible in newest-first listings
                created_at: now - (SEED_CLIENTS.len() - i) as i64,
            };
            self.clients.create_client(&client).await?;
            ids.push(client.id);
        }

        for seed in SEED_INTERACTIONS {
            let interaction = Interaction {
                id: Uuid::new_v4(),
                client_id: ids[seed.client_index],
                occurred_at: now - seed.days_ago * MILLIS_PER_DAY,
                description: seed.description.to_string(),
                kind: seed.kind.to_string(),
            };
            self.interactions.insert_interaction(&interaction).await?;
        }

        info!(
            "Seeded {} clients and {} interactions",
            SEED_CLIENTS.len(),
            SEED_INTERACTIONS.len()
        );
        Ok(SeedSummary {
            message: "Datos de prueba creados exitosamente".to_string(),
            clients_created: SEED_CLIENTS.len(),
            interactions_created: SEED_INTERACTIONS.len(),
        })
    }

    pub async fn clear(&self) -> Result<ClearSummary, Error> {
        let deleted = self.clients.delete_all_clients().await?;
        info!("Cleared {} clients", deleted);
        Ok(ClearSummary {
            message: "Todos los datos han sido eliminados".to_string(),
            clients_deleted: deleted,
        })
    }
}
