//! PostgreSQL-backed template store.
//!
//! Table structure:
//!
//! ```sql
//! CREATE TABLE notification_template (
//!     id             UUID PRIMARY KEY,
//!     group_name     TEXT NOT NULL,
//!     kind           TEXT NOT NULL,
//!     body           TEXT NOT NULL,
//!     declared_class TEXT NOT NULL,
//!     active         BOOLEAN NOT NULL DEFAULT TRUE,
//!     created_at     TIMESTAMPTZ NOT NULL,
//!     updated_at     TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::channel::ChannelClass;
use crate::domain::store::StoreError;

use super::store::TemplateStore;
use super::types::Template;

pub struct PostgresTemplateStore {
    pool: PgPool,
}

impl PostgresTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TemplateRow {
    id: Uuid,
    group_name: String,
    kind: String,
    body: String,
    declared_class: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TemplateRow> for Template {
    type Error = StoreError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        let declared_class: ChannelClass = row
            .declared_class
            .parse()
            .map_err(StoreError::InvalidRecord)?;

        Ok(Template {
            id: row.id,
            group: row.group_name,
            kind: row.kind,
            body: row.body,
            declared_class,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TemplateStore for PostgresTemplateStore {
    async fn find_active(&self, group: &str, kind: &str) -> Result<Option<Template>, StoreError> {
        let row: Option<TemplateRow> = sqlx::query_as(
            r#"
            SELECT id, group_name, kind, body, declared_class, active, created_at, updated_at
            FROM notification_template
            WHERE group_name = $1 AND kind = $2 AND active
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(group)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Template::try_from).transpose()
    }
}
