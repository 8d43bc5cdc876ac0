pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use repo::{EnquiryStore, PgEnquiryStore};

pub fn router() -> Router<AppState> {
    handlers::routes()
}
