mod app;
mod config;
mod customers;
mod db;
mod enquiries;
mod error;
mod greetings;
mod notify;
mod payload;
mod state;
#[cfg(test)]
mod testing;
mod visitors;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "studio_admin=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::info!(
        channel = %config.channel,
        cron_secret_set = config.cron_secret.is_some(),
        "configuration loaded"
    );

    let pool = db::connect(&config).await?;
    db::migrate(&pool).await;

    let app = app::build_app(AppState::new(pool, config));
    app::serve(app).await
}
