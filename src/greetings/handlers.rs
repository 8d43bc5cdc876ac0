use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, instrument, warn, Instrument};
use uuid::Uuid;

use super::services::{self, GreetingsReport, MonthDay};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/cron/send-greetings", get(send_greetings))
}

/// Proof that the request carried `Authorization: Bearer <CRON_SECRET>`.
pub struct CronAuth;

#[async_trait]
impl FromRequestParts<AppState> for CronAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(secret) = state.config.cron_secret.as_deref() else {
            warn!("CRON_SECRET not configured; rejecting cron request");
            return Err(AppError::Unauthorized);
        };

        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        match token {
            Some(t) if t == secret => Ok(CronAuth),
            _ => {
                warn!("cron request with missing or wrong secret");
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[instrument(skip(state, _auth))]
pub async fn send_greetings(
    _auth: CronAuth,
    State(state): State<AppState>,
) -> Result<Json<GreetingsReport>, AppError> {
    let run_id = Uuid::new_v4();
    let today = MonthDay::today(OffsetDateTime::now_utc());

    let report = services::send_greetings(state.customers.as_ref(), state.notifier.as_ref(), today)
        .instrument(tracing::info_span!("greetings_run", %run_id))
        .await
        .map_err(|e| {
            error!(error = %e, %run_id, "fetching customers failed");
            AppError::backend("Database error")
        })?;

    Ok(Json(report))
}
