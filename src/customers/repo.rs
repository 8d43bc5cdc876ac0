use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::repo_types::{Customer, CustomerChanges, NewCustomer, SortOrder};

const COLUMNS: &str = "id, name, spouse_name, phone, email, birthday, anniversary, \
                       location, city, notes, created_at";

/// Data access for the `customers` table.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn insert(&self, new: &NewCustomer) -> anyhow::Result<Customer>;
    /// `Ok(None)` when no row has this id.
    async fn update(&self, id: i64, changes: &CustomerChanges) -> anyhow::Result<Option<Customer>>;
    /// `Ok(false)` when no row has this id.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn find(&self, id: i64) -> anyhow::Result<Option<Customer>>;
    async fn list(&self, order: SortOrder) -> anyhow::Result<Vec<Customer>>;
}

#[derive(Clone)]
pub struct PgCustomerStore {
    db: PgPool,
}

impl PgCustomerStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn insert(&self, new: &NewCustomer) -> anyhow::Result<Customer> {
        let sql = format!(
            r#"
            INSERT INTO customers
                (name, spouse_name, phone, email, birthday, anniversary, location, city, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(&new.name)
            .bind(&new.spouse_name)
            .bind(&new.phone)
            .bind(&new.email)
            .bind(new.birthday)
            .bind(new.anniversary)
            .bind(&new.location)
            .bind(&new.city)
            .bind(&new.notes)
            .fetch_one(&self.db)
            .await
            .context("insert customer")?;
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &CustomerChanges) -> anyhow::Result<Option<Customer>> {
        if changes.is_empty() {
            return self.find(id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE customers SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(v) = &changes.name {
                set.push("name = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = &changes.phone {
                set.push("phone = ").push_bind_unseparated(v.as_str());
            }
            if let Some(v) = &changes.spouse_name {
                set.push("spouse_name = ").push_bind_unseparated(v.as_deref());
            }
            if let Some(v) = &changes.email {
                set.push("email = ").push_bind_unseparated(v.as_deref());
            }
            if let Some(v) = changes.birthday {
                set.push("birthday = ").push_bind_unseparated(v);
            }
            if let Some(v) = changes.anniversary {
                set.push("anniversary = ").push_bind_unseparated(v);
            }
            if let Some(v) = &changes.location {
                set.push("location = ").push_bind_unseparated(v.as_deref());
            }
            if let Some(v) = &changes.city {
                set.push("city = ").push_bind_unseparated(v.as_deref());
            }
            if let Some(v) = &changes.notes {
                set.push("notes = ").push_bind_unseparated(v.as_deref());
            }
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING ")
            .push(COLUMNS);

        let row = qb
            .build_query_as::<Customer>()
            .fetch_optional(&self.db)
            .await
            .with_context(|| format!("update customer {id}"))?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .with_context(|| format!("delete customer {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        let sql = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .with_context(|| format!("find customer {id}"))?;
        Ok(row)
    }

    async fn list(&self, order: SortOrder) -> anyhow::Result<Vec<Customer>> {
        let direction = match order {
            SortOrder::Newest => "DESC",
            SortOrder::Oldest => "ASC",
        };
        let sql = format!("SELECT {COLUMNS} FROM customers ORDER BY id {direction}");
        let rows = sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.db)
            .await
            .context("list customers")?;
        Ok(rows)
    }
}
