use serde::Deserialize;

use crate::notify::Channel;

pub const DEFAULT_EMAIL_FROM: &str = "Ram Photo Studio <noreply@ramdigitalphotostudio.com>";

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from: Option<String>, // e.g. "whatsapp:+14155238886"
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub cron_secret: Option<String>,
    pub channel: Channel,
    pub email: EmailConfig,
    pub whatsapp: WhatsAppConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let channel = match optional_var("GREETINGS_CHANNEL") {
            Some(raw) => raw.parse::<Channel>()?,
            None => Channel::WhatsApp,
        };
        let email = EmailConfig {
            api_key: optional_var("RESEND_API_KEY"),
            from: optional_var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.into()),
        };
        let whatsapp = WhatsAppConfig {
            account_sid: optional_var("TWILIO_ACCOUNT_SID"),
            auth_token: optional_var("TWILIO_AUTH_TOKEN"),
            from: optional_var("TWILIO_WHATSAPP_FROM"),
        };
        Ok(Self {
            database_url,
            max_connections,
            cron_secret: optional_var("CRON_SECRET"),
            channel,
            email,
            whatsapp,
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
