use crate::config::AppConfig;
use crate::customers::{CustomerStore, PgCustomerStore};
use crate::enquiries::{EnquiryStore, PgEnquiryStore};
use crate::notify::{self, Notifier};
use crate::visitors::{PgVisitorStore, VisitorStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub customers: Arc<dyn CustomerStore>,
    pub enquiries: Arc<dyn EnquiryStore>,
    pub visitors: Arc<dyn VisitorStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let notifier = notify::from_config(&config, reqwest::Client::new());
        Self {
            config: Arc::new(config),
            customers: Arc::new(PgCustomerStore::new(db.clone())),
            enquiries: Arc::new(PgEnquiryStore::new(db.clone())),
            visitors: Arc::new(PgVisitorStore::new(db)),
            notifier,
        }
    }
}
