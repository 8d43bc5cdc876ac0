use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

/// One page view, as captured from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub ip_address: String,
    pub user_agent: String,
    pub referer: String,
    pub visited_at: OffsetDateTime,
}

/// Data access for the append-only `visitors` table.
#[async_trait]
pub trait VisitorStore: Send + Sync {
    async fn record(&self, visit: &NewVisit) -> anyhow::Result<()>;
    /// Number of visits at or after `since`; all visits when `since` is `None`.
    async fn count_since(&self, since: Option<OffsetDateTime>) -> anyhow::Result<i64>;
}

#[derive(Clone)]
pub struct PgVisitorStore {
    db: PgPool,
}

impl PgVisitorStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VisitorStore for PgVisitorStore {
    async fn record(&self, visit: &NewVisit) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO visitors (ip_address, user_agent, referer, visited_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&visit.ip_address)
        .bind(&visit.user_agent)
        .bind(&visit.referer)
        .bind(visit.visited_at)
        .execute(&self.db)
        .await
        .context("insert visitor")?;
        Ok(())
    }

    async fn count_since(&self, since: Option<OffsetDateTime>) -> anyhow::Result<i64> {
        let count: i64 = match since {
            Some(since) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE visited_at >= $1")
                    .bind(since)
                    .fetch_one(&self.db)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM visitors")
                    .fetch_one(&self.db)
                    .await
            }
        }
        .context("count visitors")?;
        Ok(count)
    }
}
