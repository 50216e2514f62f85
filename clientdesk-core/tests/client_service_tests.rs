// File: clientdesk-core/tests/client_service_tests.rs

use std::sync::Arc;

use clientdesk_common::models::{
    ClientPriority, ClientQuery, ClientStatus, ClientUpdate, NewClient, SortDirection, SortField,
};
use clientdesk_core::repositories::InMemoryClientStore;
use clientdesk_core::services::{ClientService, SeedService};
use clientdesk_core::Error;

fn services() -> (ClientService, SeedService) {
    let store = Arc::new(InMemoryClientStore::new());
    (
        ClientService::new(store.clone(), store.clone(), store.clone()),
        SeedService::new(store.clone(), store),
    )
}

#[tokio::test]
async fn create_defaults_priority_and_timestamps() -> Result<(), Error> {
    let (clients, _) = services();
    let created = clients
        .create_client(NewClient {
            name: "  Nuevo Cliente ".into(),
            phone: "+54 11 0000-0000".into(),
            status: ClientStatus::Potential,
        })
        .await?;

    assert_eq!(created.name, "Nuevo Cliente");
    assert_eq!(created.priority, ClientPriority::Medium);
    assert_eq!(created.last_interaction_at, created.created_at);

    let record = clients.get_client(created.id).await?;
    assert!(record.interactions.is_empty());
    assert!(record.ai_analyses.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let (clients, _) = services();
    let err = clients
        .create_client(NewClient { name: " ".into(), phone: String::new(), status: ClientStatus::Active })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn unknown_client_is_not_found() {
    let (clients, _) = services();
    let id = uuid::Uuid::new_v4();
    assert!(matches!(clients.get_client(id).await, Err(Error::NotFound(_))));
    assert!(matches!(
        clients.update_client(id, ClientUpdate { name: Some("x".into()), ..Default::default() }).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        clients.add_interaction(id, "x", "Nota").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn manual_update_can_reactivate() -> Result<(), Error> {
    let (clients, _) = services();
    let c = clients
        .create_client(NewClient { name: "Ana".into(), phone: String::new(), status: ClientStatus::Inactive })
        .await?;
    let updated = clients
        .update_client(
            c.id,
            ClientUpdate {
                status: Some(ClientStatus::Active),
                priority: Some(ClientPriority::High),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.client.status, ClientStatus::Active);
    assert_eq!(updated.client.priority, ClientPriority::High);
    assert_eq!(updated.client.name, "Ana");
    Ok(())
}

#[tokio::test]
async fn analyses_are_listed_newest_first() -> Result<(), Error> {
    let (clients, _) = services();
    let c = clients
        .create_client(NewClient { name: "Luis".into(), phone: String::new(), status: ClientStatus::Active })
        .await?;
    clients.add_ai_analysis(c.id, "primero", None).await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    clients.add_ai_analysis(c.id, "segundo", Some(ClientPriority::Low)).await?;

    let record = clients.get_client(c.id).await?;
    assert_eq!(record.ai_analyses.len(), 2);
    assert_eq!(record.ai_analyses[0].analysis, "segundo");
    assert_eq!(record.ai_analyses[0].priority, Some(ClientPriority::Low));
    Ok(())
}

#[tokio::test]
async fn seed_then_query_filters_sorts_and_paginates() -> Result<(), Error> {
    let (clients, seed) = services();
    let summary = seed.seed().await?;
    assert_eq!(summary.clients_created, 8);
    assert_eq!(summary.interactions_created, 8);

    let counts = clients.status_counts().await?;
    assert_eq!((counts.total, counts.active, counts.potential, counts.inactive), (8, 3, 3, 2));

    // status filter
    let page = clients
        .query_clients(&ClientQuery { status: Some(ClientStatus::Potential), ..Default::default() })
        .await?;
    assert_eq!(page.total_count, 3);
    assert!(page.is_done);

    // priority sort, Alta first, then paginate
    let query = ClientQuery {
        sort_by: SortField::Priority,
        sort_direction: SortDirection::Desc,
        limit: Some(3),
        offset: Some(0),
        ..Default::default()
    };
    let page = clients.query_clients(&query).await?;
    assert_eq!(page.total_count, 8);
    assert!(!page.is_done);
    assert!(page.clients.iter().all(|r| r.client.priority == ClientPriority::High));

    let last = clients
        .query_clients(&ClientQuery { offset: Some(6), ..query })
        .await?;
    assert_eq!(last.clients.len(), 2);
    assert!(last.is_done);
    assert!(last.clients.iter().all(|r| r.client.priority == ClientPriority::Low));

    // search by name, case-insensitive
    let page = clients
        .query_clients(&ClientQuery { search: Some("gonzález".into()), ..Default::default() })
        .await?;
    assert_eq!(page.clients.len(), 1);
    assert_eq!(page.clients[0].interactions.len(), 2);
    Ok(())
}

#[tokio::test]
async fn clear_removes_everything() -> Result<(), Error> {
    let (clients, seed) = services();
    seed.seed().await?;
    let cleared = seed.clear().await?;
    assert_eq!(cleared.clients_deleted, 8);
    assert_eq!(clients.count_clients().await?, 0);
    Ok(())
}
