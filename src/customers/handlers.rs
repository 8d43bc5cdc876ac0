use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use super::{
    dto::{
        AddCustomerRequest, DeleteCustomerRequest, ListQuery, OccasionEntry, OccasionsResponse,
        UpdateCustomerRequest,
    },
    repo_types::{Customer, SortOrder},
    services::{self, ID_REQUIRED},
};
use crate::{
    error::AppError,
    greetings::services::MonthDay,
    payload::{require_id, Ack, AppJson, Envelope},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/occasions", get(todays_occasions))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/add", post(add_customer))
        .route("/customers/update", post(update_customer))
        .route("/customers/delete", post(delete_customer))
}

#[instrument(skip(state, payload))]
pub async fn add_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddCustomerRequest>,
) -> Result<Json<Envelope<Customer>>, AppError> {
    let new = services::validate_new(payload).map_err(|e| {
        warn!(error = %e, "add customer rejected");
        e
    })?;

    let customer = state.customers.insert(&new).await.map_err(|e| {
        error!(error = %e, "insert customer failed");
        AppError::store(e)
    })?;

    info!(customer_id = customer.id, "customer added");
    Ok(Json(Envelope::ok(customer)))
}

#[instrument(skip(state, payload))]
pub async fn update_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateCustomerRequest>,
) -> Result<Json<Envelope<Customer>>, AppError> {
    let (id, changes) = services::validate_changes(payload).map_err(|e| {
        warn!(error = %e, "update customer rejected");
        e
    })?;

    let customer = match state.customers.update(id, &changes).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            warn!(customer_id = id, "update of unknown customer");
            return Err(AppError::not_found("Customer not found"));
        }
        Err(e) => {
            error!(error = %e, customer_id = id, "update customer failed");
            return Err(AppError::store(e));
        }
    };

    info!(customer_id = id, "customer updated");
    Ok(Json(Envelope::ok(customer)))
}

#[instrument(skip(state, payload))]
pub async fn delete_customer(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DeleteCustomerRequest>,
) -> Result<Json<Ack>, AppError> {
    let id = require_id(payload.id.as_ref(), ID_REQUIRED)?;

    match state.customers.delete(id).await {
        Ok(true) => {
            info!(customer_id = id, "customer deleted");
            Ok(Json(Ack::ok()))
        }
        Ok(false) => Err(AppError::not_found("Customer not found")),
        Err(e) => {
            error!(error = %e, customer_id = id, "delete customer failed");
            Err(AppError::store(e))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let order = services::sort_order(q.order.as_deref());
    let rows = state.customers.list(order).await.map_err(AppError::store)?;
    Ok(Json(rows))
}

/// Customers whose birthday or anniversary falls on today's studio date.
#[instrument(skip(state))]
pub async fn todays_occasions(
    State(state): State<AppState>,
) -> Result<Json<OccasionsResponse>, AppError> {
    let today = MonthDay::today(OffsetDateTime::now_utc());
    let rows = state
        .customers
        .list(SortOrder::Oldest)
        .await
        .map_err(AppError::store)?;

    let customers = rows
        .into_iter()
        .filter_map(|customer| {
            let birthday_today = today.matches(customer.birthday);
            let anniversary_today = today.matches(customer.anniversary);
            (birthday_today || anniversary_today).then_some(OccasionEntry {
                customer,
                birthday_today,
                anniversary_today,
            })
        })
        .collect();

    Ok(Json(OccasionsResponse {
        date: today.to_string(),
        customers,
    }))
}
