// src/repositories/postgres/interactions.rs

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use clientdesk_common::models::{AiAnalysis, ClientPriority, Interaction};
pub use clientdesk_common::traits::repository_traits::{AiAnalysisRepository, InteractionRepository};

use crate::Error;

#[derive(Clone)]
pub struct PostgresInteractionRepository {
    pool: Pool<Postgres>,
}

impl PostgresInteractionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for PostgresInteractionRepository {
    async fn insert_interaction(&self, interaction: &Interaction) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO interactions (interaction_id, client_id, occurred_at, description, kind)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
            .bind(interaction.id)
            .bind(interaction.client_id)
            .bind(interaction.occurred_at)
            .bind(&interaction.description)
            .bind(&interaction.kind)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_for_client(&self, client_id: Uuid) -> Result<Vec<Interaction>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT interaction_id, client_id, occurred_at, description, kind
            FROM interactions
            WHERE client_id = $1
            ORDER BY occurred_at DESC
            "#,
        )
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            out.push(Interaction {
                id: r.try_get("interaction_id")?,
                client_id: r.try_get("client_id")?,
                occurred_at: r.try_get("occurred_at")?,
                description: r.try_get("description")?,
                kind: r.try_get("kind")?,
            });
        }
        Ok(out)
    }
}

#[derive(Clone)]
pub struct PostgresAiAnalysisRepository {
    pool: Pool<Postgres>,
}

impl PostgresAiAnalysisRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AiAnalysisRepository for PostgresAiAnalysisRepository {
    async fn insert_analysis(&self, client_id: Uuid, analysis: &AiAnalysis) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO ai_analyses (analysis_id, client_id, created_at, analysis, priority)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
            .bind(analysis.id)
            .bind(client_id)
            .bind(analysis.created_at)
            .bind(&analysis.analysis)
            .bind(analysis.priority.map(|p| p.label()))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_analyses(&self, client_id: Uuid) -> Result<Vec<AiAnalysis>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT analysis_id, created_at, analysis, priority
            FROM ai_analyses
            WHERE client_id = $1
            ORDER BY created_at DESC
            "#,
        )
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            let priority: Option<String> = r.try_get("priority")?;
            out.push(AiAnalysis {
                id: r.try_get("analysis_id")?,
                created_at: r.try_get("created_at")?,
                analysis: r.try_get("analysis")?,
                priority: priority.map(|p| p.parse::<ClientPriority>()).transpose()?,
            });
        }
        Ok(out)
    }
}
