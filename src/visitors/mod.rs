pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgVisitorStore, VisitorStore};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
