use serde::{Deserialize, Serialize};

use super::repo_types::Customer;
use crate::payload::{deserialize_some, IdInput};

/// Request body for `POST /api/customers/add`. Required fields are optional here so
/// that a missing name/phone becomes a 400 rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spouse_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub anniversary: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for `POST /api/customers/update`. Absent fields are left untouched,
/// explicit nulls clear the column.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub id: Option<IdInput>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub spouse_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub birthday: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub anniversary: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteCustomerRequest {
    #[serde(default)]
    pub id: Option<IdInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub order: Option<String>,
}

/// Entry of the "special occasions" panel.
#[derive(Debug, Serialize)]
pub struct OccasionEntry {
    #[serde(flatten)]
    pub customer: Customer,
    pub birthday_today: bool,
    pub anniversary_today: bool,
}

#[derive(Debug, Serialize)]
pub struct OccasionsResponse {
    pub date: String,
    pub customers: Vec<OccasionEntry>,
}
