// File: clientdesk-common/src/models/mod.rs
pub mod automation;
pub mod client;
pub mod client_query;

pub use automation::{
    AutomationSetting, AutomationSettings, CheckFrequency, ConfigEntry, ConfigKey,
};
pub use client::{
    AiAnalysis, Client, ClientPriority, ClientRecord, ClientSnapshot, ClientStatus, ClientUpdate,
    Interaction, InteractionSnapshot, NewClient,
};
pub use client_query::{ClientPage, ClientQuery, SortDirection, SortField};
