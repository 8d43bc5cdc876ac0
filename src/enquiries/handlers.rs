use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

use super::repo::Enquiry;
use crate::{
    error::AppError,
    payload::{non_blank, require_id, AppJson, Envelope, IdInput},
    state::AppState,
};

const ID_AND_STATUS_REQUIRED: &str = "Enquiry ID and status are required";

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub id: Option<IdInput>,
    #[serde(default)]
    pub status: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enquiries", get(list_enquiries))
        .route("/enquiries/update-status", post(update_status))
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> Result<Json<Envelope<Enquiry>>, AppError> {
    let id = require_id(payload.id.as_ref(), ID_AND_STATUS_REQUIRED)?;
    let Some(status) = non_blank(payload.status) else {
        warn!(enquiry_id = id, "status missing");
        return Err(AppError::validation(ID_AND_STATUS_REQUIRED));
    };

    match state.enquiries.update_status(id, &status).await {
        Ok(Some(enquiry)) => {
            info!(enquiry_id = id, %status, "enquiry status updated");
            Ok(Json(Envelope::ok(enquiry)))
        }
        Ok(None) => Err(AppError::not_found("Enquiry not found")),
        Err(e) => {
            error!(error = %e, enquiry_id = id, "update enquiry status failed");
            Err(AppError::store(e))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_enquiries(State(state): State<AppState>) -> Result<Json<Vec<Enquiry>>, AppError> {
    let rows = state.enquiries.list().await.map_err(AppError::store)?;
    Ok(Json(rows))
}
