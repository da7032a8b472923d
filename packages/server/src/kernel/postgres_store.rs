//! PostgreSQL job store. Each job is one JSONB document keyed by id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use super::traits::{validate_job_id, BaseJobStore, StoreResult};
use crate::domains::jobs::{RawJobRecord, StoredJob};

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: String,
    document: Json<RawJobRecord>,
    updated_at: DateTime<Utc>,
}

impl From<JobRow> for StoredJob {
    fn from(row: JobRow) -> Self {
        StoredJob::new(row.id, row.document.0, row.updated_at)
    }
}

#[derive(Clone)]
pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseJobStore for PostgresJobStore {
    async fn get_job(&self, id: &str) -> StoreResult<Option<StoredJob>> {
        let row = sqlx::query_as::<_, JobRow>(
            "SELECT id, document, updated_at FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(StoredJob::from))
    }

    async fn list_jobs(&self) -> StoreResult<Vec<StoredJob>> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT id, document, updated_at FROM jobs ORDER BY updated_at DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(StoredJob::from).collect())
    }

    async fn upsert_job(&self, id: &str, document: RawJobRecord) -> StoreResult<StoredJob> {
        validate_job_id(id)?;
        let row = sqlx::query_as::<_, JobRow>(
            "INSERT INTO jobs (id, document, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (id) DO UPDATE
             SET document = EXCLUDED.document, updated_at = NOW()
             RETURNING id, document, updated_at",
        )
        .bind(id)
        .bind(Json(&document))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
