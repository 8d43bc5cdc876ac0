use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Inbound enquiry. Only `status` is mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Enquiry {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait EnquiryStore: Send + Sync {
    /// `Ok(None)` when no enquiry has this id.
    async fn update_status(&self, id: i64, status: &str) -> anyhow::Result<Option<Enquiry>>;
    async fn list(&self) -> anyhow::Result<Vec<Enquiry>>;
}

#[derive(Clone)]
pub struct PgEnquiryStore {
    db: PgPool,
}

impl PgEnquiryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EnquiryStore for PgEnquiryStore {
    async fn update_status(&self, id: i64, status: &str) -> anyhow::Result<Option<Enquiry>> {
        let row = sqlx::query_as::<_, Enquiry>(
            r#"
            UPDATE enquiries
               SET status = $2
             WHERE id = $1
         RETURNING id, name, email, phone, message, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await
        .with_context(|| format!("update status of enquiry {id}"))?;
        Ok(row)
    }

    async fn list(&self) -> anyhow::Result<Vec<Enquiry>> {
        let rows = sqlx::query_as::<_, Enquiry>(
            r#"
            SELECT id, name, email, phone, message, status, created_at
              FROM enquiries
             ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list enquiries")?;
        Ok(rows)
    }
}
