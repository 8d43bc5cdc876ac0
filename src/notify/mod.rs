pub mod email;
pub mod whatsapp;

use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::AppConfig;

pub use email::EmailNotifier;
pub use whatsapp::WhatsAppNotifier;

/// Delivery mechanism for greetings. One is active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    #[serde(alias = "messaging")]
    WhatsApp,
}

impl Channel {
    /// Noun used in report lines, e.g. "Birthday email to ...".
    pub fn noun(self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::WhatsApp => "message",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Email => f.write_str("email"),
            Channel::WhatsApp => f.write_str("whatsapp"),
        }
    }
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "whatsapp" | "messaging" => Ok(Channel::WhatsApp),
            other => anyhow::bail!("unknown greetings channel {other:?} (expected email or whatsapp)"),
        }
    }
}

/// A greeting ready to hand to a channel. `subject` is only used by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: Option<String>,
    pub body: String,
}

/// Provider-side identifier of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub provider_id: String,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    Provider(String),

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Error for a non-2xx provider response. Uses the provider's `message` field when the
/// body carries one, else `"<provider> provider returned <status>"`.
pub(crate) async fn provider_error(response: Response, provider: &str) -> NotifyError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ProviderErrorBody>(&text)
        .map(|e| e.message)
        .unwrap_or_else(|_| format!("{provider} provider returned {status}"));
    NotifyError::Provider(reason)
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> Channel;

    /// Send `message` to `recipient` (an email address or a free-form phone number).
    async fn send(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> Result<DeliveryReceipt, NotifyError>;
}

/// Builds the notifier for the configured channel. Missing credentials only warn here;
/// the send itself reports `NotConfigured`.
pub fn from_config(config: &AppConfig, http: reqwest::Client) -> Arc<dyn Notifier> {
    match config.channel {
        Channel::Email => {
            if config.email.api_key.is_none() {
                warn!("RESEND_API_KEY not set; greeting emails will not be sent");
            }
            Arc::new(EmailNotifier::new(http, config.email.clone()))
        }
        Channel::WhatsApp => {
            let wa = &config.whatsapp;
            if wa.account_sid.is_none() || wa.auth_token.is_none() || wa.from.is_none() {
                warn!("Twilio credentials not configured; WhatsApp greetings will not be sent");
            }
            Arc::new(WhatsAppNotifier::new(http, wa.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_parses_from_config_values() {
        assert_eq!("email".parse::<Channel>().unwrap(), Channel::Email);
        assert_eq!(" WhatsApp ".parse::<Channel>().unwrap(), Channel::WhatsApp);
        assert_eq!("messaging".parse::<Channel>().unwrap(), Channel::WhatsApp);
        assert!("sms".parse::<Channel>().is_err());
    }
}
