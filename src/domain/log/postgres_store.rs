//! PostgreSQL-backed delivery log.
//!
//! Table structure:
//!
//! ```sql
//! CREATE TABLE delivery_log (
//!     id                  UUID PRIMARY KEY,
//!     link_id             TEXT,
//!     template_id         UUID,
//!     recipient           TEXT NOT NULL,
//!     recipient_name      TEXT,
//!     channel             TEXT NOT NULL,
//!     provider            TEXT NOT NULL,
//!     content             TEXT NOT NULL,
//!     cost                DOUBLE PRECISION NOT NULL,
//!     status              TEXT NOT NULL,
//!     provider_message_id TEXT,
//!     error               TEXT,
//!     sent_at             TIMESTAMPTZ,
//!     created_at          TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::channel::ChannelClass;
use crate::domain::store::StoreError;

use super::store::DeliveryLog;
use super::types::{DeliveryLogEntry, DeliveryStatus, NewLogEntry};

pub struct PostgresDeliveryLog {
    pool: PgPool,
}

impl PostgresDeliveryLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    link_id: Option<String>,
    template_id: Option<Uuid>,
    recipient: String,
    recipient_name: Option<String>,
    channel: String,
    provider: String,
    content: String,
    cost: f64,
    status: String,
    provider_message_id: Option<String>,
    error: Option<String>,
    sent_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LogRow> for DeliveryLogEntry {
    type Error = StoreError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        let channel: ChannelClass = row.channel.parse().map_err(StoreError::InvalidRecord)?;
        let status: DeliveryStatus = row.status.parse().map_err(StoreError::InvalidRecord)?;

        Ok(DeliveryLogEntry {
            id: row.id,
            link_id: row.link_id,
            template_id: row.template_id,
            recipient: row.recipient,
            recipient_name: row.recipient_name,
            channel,
            provider: row.provider,
            content: row.content,
            cost: row.cost,
            status,
            provider_message_id: row.provider_message_id,
            error: row.error,
            sent_at: row.sent_at,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl DeliveryLog for PostgresDeliveryLog {
    async fn append(&self, new: NewLogEntry) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO delivery_log
                (id, link_id, template_id, recipient, recipient_name,
                 channel, provider, content, cost, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending', NOW())
            "#,
        )
        .bind(id)
        .bind(&new.link_id)
        .bind(new.template_id)
        .bind(&new.recipient)
        .bind(&new.recipient_name)
        .bind(new.channel.as_str())
        .bind(&new.provider)
        .bind(&new.content)
        .bind(new.cost)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn mark_sent(&self, id: Uuid, provider_message_id: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE delivery_log
            SET status = 'sent', provider_message_id = $2, error = NULL, sent_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(provider_message_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowMissing(id));
        }
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE delivery_log
            SET status = 'failed', error = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowMissing(id));
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<DeliveryLogEntry>, StoreError> {
        let row: Option<LogRow> = sqlx::query_as(
            r#"
            SELECT id, link_id, template_id, recipient, recipient_name,
                   channel, provider, content, cost, status,
                   provider_message_id, error, sent_at, created_at
            FROM delivery_log
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DeliveryLogEntry::try_from).transpose()
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<DeliveryLogEntry>, StoreError> {
        let rows: Vec<LogRow> = sqlx::query_as(
            r#"
            SELECT id, link_id, template_id, recipient, recipient_name,
                   channel, provider, content, cost, status,
                   provider_message_id, error, sent_at, created_at
            FROM delivery_log
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DeliveryLogEntry::try_from).collect()
    }
}
