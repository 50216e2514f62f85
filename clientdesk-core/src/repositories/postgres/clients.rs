// src/repositories/postgres/clients.rs

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use clientdesk_common::models::{Client, ClientPriority, ClientStatus, ClientUpdate};
pub use clientdesk_common::traits::repository_traits::ClientRepository;

use crate::Error;

#[derive(Clone)]
pub struct PostgresClientRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresClientRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn client_from_row(r: &PgRow) -> Result<Client, Error> {
    let status: String = r.try_get("status")?;
    let priority: String = r.try_get("priority")?;
    Ok(Client {
        id: r.try_get("client_id")?,
        name: r.try_get("name")?,
        phone: r.try_get("phone")?,
        status: status.parse::<ClientStatus>()?,
        priority: priority.parse::<ClientPriority>()?,
        last_interaction_at: r.try_get("last_interaction_at")?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create_client(&self, client: &Client) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                client_id, name, phone, status, priority, last_interaction_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
            .bind(client.id)
            .bind(&client.name)
            .bind(&client.phone)
            .bind(client.status.label())
            .bind(client.priority.label())
            .bind(client.last_interaction_at)
            .bind(client.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_client(&self, client_id: Uuid) -> Result<Option<Client>, Error> {
        let row = sqlx::query(
            r#"
            SELECT client_id, name, phone, status, priority, last_interaction_at, created_at
            FROM clients
            WHERE client_id = $1
            "#,
        )
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(client_from_row).transpose()
    }

    async fn list_clients(&self) -> Result<Vec<Client>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT client_id, name, phone, status, priority, last_interaction_at, created_at
            FROM clients
            ORDER BY created_at DESC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(client_from_row).collect()
    }

    async fn count_clients(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM clients")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn update_client(&self, client_id: Uuid, update: &ClientUpdate) -> Result<bool, Error> {
        // COALESCE keeps the stored column when the patch leaves it out.
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                last_interaction_at = COALESCE($6, last_interaction_at)
            WHERE client_id = $1
            "#,
        )
            .bind(client_id)
            .bind(update.name.as_deref())
            .bind(update.phone.as_deref())
            .bind(update.status.map(|s| s.label()))
            .bind(update.priority.map(|p| p.label()))
            .bind(update.last_interaction_at)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_inactive(&self, client_id: Uuid, cutoff_ms: i64) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET status = 'Inactivo'
            WHERE client_id = $1
              AND status <> 'Inactivo'
              AND last_interaction_at < $2
            "#,
        )
            .bind(client_id)
            .bind(cutoff_ms)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_all_clients(&self) -> Result<u64, Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM interactions").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM ai_analyses").execute(&mut *tx).await?;
        let result = sqlx::query("DELETE FROM clients").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
