use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

use clientdesk_common::models::ConfigEntry;
pub use clientdesk_common::traits::repository_traits::AutomationConfigRepository;

use crate::Error;

#[derive(Clone)]
pub struct PostgresAutomationConfigRepository {
    pool: Pool<Postgres>,
}

impl PostgresAutomationConfigRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn entry_from_row(r: &PgRow) -> Result<ConfigEntry, Error> {
    Ok(ConfigEntry {
        key: r.try_get("config_key")?,
        value: r.try_get::<JsonValue, _>("config_value")?,
        description: r.try_get("description")?,
        updated_at: r.try_get("updated_at")?,
    })
}

#[async_trait]
impl AutomationConfigRepository for PostgresAutomationConfigRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<ConfigEntry>, Error> {
        let row = sqlx::query(
            r#"
            SELECT config_key, config_value, description, updated_at
            FROM automation_config
            WHERE config_key = $1
            "#,
        )
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn list_entries(&self) -> Result<Vec<ConfigEntry>, Error> {
        let rows = sqlx::query(
            r#"SELECT config_key, config_value, description, updated_at FROM automation_config"#,
        )
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(entry_from_row).collect()
    }

    async fn upsert_entry(&self, entry: &ConfigEntry) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO automation_config (config_key, config_value, description, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (config_key)
            DO UPDATE SET
               config_value = EXCLUDED.config_value,
               description  = COALESCE(EXCLUDED.description, automation_config.description),
               updated_at   = EXCLUDED.updated_at
            "#,
        )
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(entry.description.as_deref())
            .bind(entry.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_if_absent(&self, entry: &ConfigEntry) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO automation_config (config_key, config_value, description, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (config_key) DO NOTHING
            "#,
        )
            .bind(&entry.key)
            .bind(&entry.value)
            .bind(entry.description.as_deref())
            .bind(entry.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
