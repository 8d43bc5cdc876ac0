use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{debug, error, instrument};

use super::services::{self, VisitorStats};
use crate::{error::AppError, payload::Ack, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visitors/track", post(track_visit))
        .route("/visitors/stats", get(visitor_stats))
}

#[instrument(skip(state, headers, peer))]
pub async fn track_visit(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Json<Ack>, AppError> {
    let peer_ip = peer.map(|ConnectInfo(addr)| addr.ip().to_string());
    let visit = services::visit_from_request(&headers, peer_ip, OffsetDateTime::now_utc());

    state.visitors.record(&visit).await.map_err(|e| {
        error!(error = %e, "tracking visitor failed");
        AppError::backend("Failed to track visitor")
    })?;

    debug!(ip = %visit.ip_address, "visit recorded");
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn visitor_stats(State(state): State<AppState>) -> Result<Json<VisitorStats>, AppError> {
    let stats = services::collect_stats(state.visitors.as_ref(), OffsetDateTime::now_utc())
        .await
        .map_err(|e| {
            error!(error = %e, "fetching visitor stats failed");
            AppError::backend("Failed to fetch visitor statistics")
        })?;
    Ok(Json(stats))
}
