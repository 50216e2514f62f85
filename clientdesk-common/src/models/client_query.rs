// File: clientdesk-common/src/models/client_query.rs
//
// Filtering, sorting and pagination over a loaded client list.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use super::client::{ClientRecord, ClientStatus};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Name,
    #[default]
    LastInteractionAt,
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    pub search: Option<String>,
    /// `None` means every status; the list UI sends "Todos" for that.
    #[serde(default, deserialize_with = "status_filter")]
    pub status: Option<ClientStatus>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub sort_direction: SortDirection,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

fn status_filter<'de, D>(deserializer: D) -> Result<Option<ClientStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("Todos") => Ok(None),
        Some(label) => label
            .parse::<ClientStatus>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPage {
    pub clients: Vec<ClientRecord>,
    pub total_count: usize,
    pub is_done: bool,
}

impl ClientQuery {
    pub fn matches(&self, record: &ClientRecord) -> bool {
        if let Some(status) = self.status {
            if record.client.status != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                record
                    .client
                    .name
                    .to_lowercase()
                    .contains(&term.to_lowercase())
                    || record.client.phone.contains(term)
            }
        }
    }

    /// Ascending comparison for the selected field; direction is applied by [`ClientQuery::apply`].
    fn compare(&self, a: &ClientRecord, b: &ClientRecord) -> Ordering {
        match self.sort_by {
            SortField::Name => a.client.name.to_lowercase().cmp(&b.client.name.to_lowercase()),
            SortField::LastInteractionAt => a
                .client
                .last_interaction_at
                .cmp(&b.client.last_interaction_at),
            SortField::Priority => a.client.priority.rank().cmp(&b.client.priority.rank()),
        }
    }

    /// Filters, sorts and slices `records` into one page.
    /// `total_count` counts the filtered set, not the page.
    pub fn apply(&self, records: Vec<ClientRecord>) -> ClientPage {
        let mut filtered: Vec<ClientRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();

        filtered.sort_by(|a, b| {
            let ord = self.compare(a, b);
            match self.sort_direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let total_count = filtered.len();
        let offset = self.offset.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let end = offset.saturating_add(limit);

        let clients: Vec<ClientRecord> = filtered.into_iter().skip(offset).take(limit).collect();

        ClientPage {
            clients,
            total_count,
            is_done: end >= total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::client::{Client, ClientPriority};
    use uuid::Uuid;

    fn record(name: &str, phone: &str, status: ClientStatus, priority: ClientPriority, last: i64) -> ClientRecord {
        ClientRecord {
            client: Client {
                id: Uuid::new_v4(),
                name: name.to_string(),
                phone: phone.to_string(),
                status,
                priority,
                last_interaction_at: last,
                created_at: 0,
            },
            interactions: vec![],
            ai_analyses: vec![],
        }
    }

    fn sample() -> Vec<ClientRecord> {
        vec![
            record("María González", "+54 11 1234", ClientStatus::Active, ClientPriority::High, 300),
            record("Carlos Rodríguez", "+54 11 2345", ClientStatus::Potential, ClientPriority::Medium, 200),
            record("Ana Martínez", "+54 11 3456", ClientStatus::Inactive, ClientPriority::Low, 100),
            record("Luis Fernández", "+54 11 4567", ClientStatus::Active, ClientPriority::Medium, 400),
        ]
    }

    #[test]
    fn default_query_sorts_by_most_recent_interaction() {
        let page = ClientQuery::default().apply(sample());
        let names: Vec<_> = page.clients.iter().map(|r| r.client.name.as_str()).collect();
        assert_eq!(names, vec!["Luis Fernández", "María González", "Carlos Rodríguez", "Ana Martínez"]);
        assert_eq!(page.total_count, 4);
        assert!(page.is_done);
    }

    #[test]
    fn filters_by_search_term_and_status() {
        let query = ClientQuery {
            search: Some("MAR".into()),
            ..Default::default()
        };
        let page = query.apply(sample());
        assert_eq!(page.total_count, 2);

        let query = ClientQuery {
            search: Some("3456".into()),
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        };
        let page = query.apply(sample());
        assert_eq!(page.total_count, 1);
        assert_eq!(page.clients[0].client.name, "Ana Martínez");
    }

    #[test]
    fn todos_means_no_status_filter() {
        let query: ClientQuery = serde_json::from_str(r#"{"status":"Todos"}"#).unwrap();
        assert_eq!(query.status, None);
        let query: ClientQuery = serde_json::from_str(r#"{"status":"Inactivo"}"#).unwrap();
        assert_eq!(query.status, Some(ClientStatus::Inactive));
    }

    #[test]
    fn priority_sort_puts_alta_first_when_descending() {
        let query = ClientQuery {
            sort_by: SortField::Priority,
            ..Default::default()
        };
        let page = query.apply(sample());
        assert_eq!(page.clients[0].client.priority, ClientPriority::High);
        assert_eq!(page.clients[3].client.priority, ClientPriority::Low);
    }

    #[test]
    fn paginates_and_reports_is_done() {
        let query = ClientQuery {
            sort_by: SortField::Name,
            sort_direction: SortDirection::Asc,
            limit: Some(3),
            offset: Some(0),
            ..Default::default()
        };
        let first = query.apply(sample());
        assert_eq!(first.clients.len(), 3);
        assert!(!first.is_done);
        assert_eq!(first.clients[0].client.name, "Ana Martínez");

        let second = ClientQuery { offset: Some(3), ..query }.apply(sample());
        assert_eq!(second.clients.len(), 1);
        assert!(second.is_done);
    }
}
