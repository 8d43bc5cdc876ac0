use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

use crate::payload::iso_date;

/// Customer record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub spouse_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    #[serde(with = "iso_date::option")]
    pub birthday: Option<Date>,
    #[serde(with = "iso_date::option")]
    pub anniversary: Option<Date>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated insert payload. `name` and `phone` are non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub spouse_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub birthday: Option<Date>,
    pub anniversary: Option<Date>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub notes: Option<String>,
}

/// Validated partial update. Outer `None` leaves a column untouched,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub spouse_name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub birthday: Option<Option<Date>>,
    pub anniversary: Option<Option<Date>>,
    pub location: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl CustomerChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}
