use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::{provider_error, Channel, DeliveryReceipt, Notifier, NotifyError, RenderedMessage};
use crate::config::WhatsAppConfig;

const TWILIO_API_URL: &str = "https://api.twilio.com/2010-04-01";
const WHATSAPP_SCHEME: &str = "whatsapp:";
const INDIA_CALLING_CODE: &str = "91";

#[derive(Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Normalise a free-form phone number to E.164, assuming India for bare local numbers.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.strip_prefix('0').unwrap_or(&digits);
    if digits.len() == 10 {
        format!("+{INDIA_CALLING_CODE}{digits}")
    } else {
        format!("+{digits}")
    }
}

fn with_scheme(address: &str) -> String {
    if address.starts_with(WHATSAPP_SCHEME) {
        address.to_string()
    } else {
        format!("{WHATSAPP_SCHEME}{address}")
    }
}

/// Greeting sender backed by Twilio's WhatsApp messaging API.
#[derive(Clone)]
pub struct WhatsAppNotifier {
    client: Client,
    config: WhatsAppConfig,
    base_url: String,
}

impl WhatsAppNotifier {
    pub fn new(client: Client, config: WhatsAppConfig) -> Self {
        Self {
            client,
            config,
            base_url: TWILIO_API_URL.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    fn channel(&self) -> Channel {
        Channel::WhatsApp
    }

    async fn send(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> Result<DeliveryReceipt, NotifyError> {
        let (Some(sid), Some(token), Some(from)) = (
            self.config.account_sid.as_deref(),
            self.config.auth_token.as_deref(),
            self.config.from.as_deref(),
        ) else {
            return Err(NotifyError::NotConfigured(
                "Twilio is not configured. Please add TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, \
                 and TWILIO_WHATSAPP_FROM to your environment variables."
                    .into(),
            ));
        };

        let to = normalize_phone(recipient);
        let from = with_scheme(from);
        let to_address = with_scheme(&to);
        let form = [
            ("From", from.as_str()),
            ("To", to_address.as_str()),
            ("Body", message.body.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}/Accounts/{}/Messages.json", self.base_url, sid))
            .basic_auth(sid, Some(token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = provider_error(response, "messaging").await;
            error!(%status, %to, error = %err, "whatsapp send failed");
            return Err(err);
        }

        let body: MessageResponse = response.json().await?;
        info!(%to, sid = %body.sid, "whatsapp message sent");
        Ok(DeliveryReceipt { provider_id: body.sid })
    }
}
