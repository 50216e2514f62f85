// File: clientdesk-common/src/models/client.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Milliseconds in one day; all record timestamps are epoch milliseconds.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Relationship status of a client. Wire labels are the Spanish ones the
/// front-end and the advisor prompts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    #[serde(rename = "Activo")]
    Active,
    #[serde(rename = "Potencial")]
    Potential,
    #[serde(rename = "Inactivo")]
    Inactive,
}

impl ClientStatus {
    pub const ALL: [ClientStatus; 3] = [
        ClientStatus::Active,
        ClientStatus::Potential,
        ClientStatus::Inactive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Activo",
            ClientStatus::Potential => "Potencial",
            ClientStatus::Inactive => "Inactivo",
        }
    }

    /// Case-insensitive label lookup.
    pub fn from_label_ignore_case(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| Error::Parse(format!("Unknown client status: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientPriority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Baja")]
    Low,
}

impl ClientPriority {
    pub fn label(&self) -> &'static str {
        match self {
            ClientPriority::High => "Alta",
            ClientPriority::Medium => "Media",
            ClientPriority::Low => "Baja",
        }
    }

    /// Ordering weight used when sorting lists (Alta > Media > Baja).
    pub fn rank(&self) -> u8 {
        match self {
            ClientPriority::High => 3,
            ClientPriority::Medium => 2,
            ClientPriority::Low => 1,
        }
    }
}

impl Default for ClientPriority {
    fn default() -> Self {
        ClientPriority::Medium
    }
}

impl fmt::Display for ClientPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Alta" => Ok(ClientPriority::High),
            "Media" => Ok(ClientPriority::Medium),
            "Baja" => Ok(ClientPriority::Low),
            other => Err(Error::Parse(format!("Unknown client priority: {}", other))),
        }
    }
}

/// A client row as stored. Histories live in their own tables; see [`ClientRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub status: ClientStatus,
    #[serde(default)]
    pub priority: ClientPriority,
    pub last_interaction_at: i64,
    pub created_at: i64,
}

/// Elapsed days between two epoch-millisecond timestamps, rounded up.
/// Saturates instead of overflowing on out-of-range inputs.
pub fn days_between(from_ms: i64, to_ms: i64) -> i64 {
    let elapsed = to_ms.saturating_sub(from_ms).max(0);
    elapsed / MILLIS_PER_DAY + i64::from(elapsed % MILLIS_PER_DAY != 0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: Uuid,
    pub client_id: Uuid,
    pub occurred_at: i64,
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Suggested interaction tags. Any other string is accepted as a custom tag.
pub const DEFAULT_INTERACTION_TYPES: &[&str] = &[
    "Llamada",
    "Email",
    "Reunión",
    "WhatsApp",
    "Visita",
    "Nota",
];

/// One entry of a client's append-only AI analysis log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub id: Uuid,
    pub created_at: i64,
    pub analysis: String,
    /// Priority the client had when the analysis was saved.
    pub priority: Option<ClientPriority>,
}

/// A client together with its interactions and analyses, newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(flatten)]
    pub client: Client,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default)]
    pub ai_analyses: Vec<AiAnalysis>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub status: ClientStatus,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub status: Option<ClientStatus>,
    pub priority: Option<ClientPriority>,
    pub last_interaction_at: Option<i64>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.last_interaction_at.is_none()
    }

    pub fn apply_to(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            client.phone = phone.clone();
        }
        if let Some(status) = self.status {
            client.status = status;
        }
        if let Some(priority) = self.priority {
            client.priority = priority;
        }
        if let Some(at) = self.last_interaction_at {
            client.last_interaction_at = at;
        }
    }
}

/// What the advisor routes receive: a client as the front-end holds it.
/// Accepts the legacy Spanish field names as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSnapshot {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "telefono")]
    pub phone: String,
    #[serde(alias = "estado")]
    pub status: ClientStatus,
    #[serde(default)]
    pub priority: ClientPriority,
    #[serde(alias = "ultimaInteraccion")]
    pub last_interaction_at: i64,
    #[serde(default, alias = "interacciones")]
    pub interactions: Vec<InteractionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSnapshot {
    #[serde(alias = "fecha")]
    pub occurred_at: i64,
    #[serde(alias = "descripcion")]
    pub description: String,
}

impl ClientSnapshot {
    /// Up to `limit` interactions, most recent first.
    pub fn recent_interactions(&self, limit: usize) -> Vec<&InteractionSnapshot> {
        let mut sorted: Vec<&InteractionSnapshot> = self.interactions.iter().collect();
        sorted.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        sorted.truncate(limit);
        sorted
    }
}

impl From<&ClientRecord> for ClientSnapshot {
    fn from(record: &ClientRecord) -> Self {
        Self {
            name: record.client.name.clone(),
            phone: record.client.phone.clone(),
            status: record.client.status,
            priority: record.client.priority,
            last_interaction_at: record.client.last_interaction_at,
            interactions: record
                .interactions
                .iter()
                .map(|i| InteractionSnapshot {
                    occurred_at: i.occurred_at,
                    description: i.description.clone(),
                })
                .collect(),
        }
    }
}
