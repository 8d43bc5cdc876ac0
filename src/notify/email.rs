use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{provider_error, Channel, DeliveryReceipt, Notifier, NotifyError, RenderedMessage};
use crate::config::EmailConfig;

const RESEND_API_URL: &str = "https://api.resend.com";

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Greeting sender backed by the Resend email API.
#[derive(Clone)]
pub struct EmailNotifier {
    client: Client,
    config: EmailConfig,
    base_url: String,
}

impl EmailNotifier {
    pub fn new(client: Client, config: EmailConfig) -> Self {
        Self {
            client,
            config,
            base_url: RESEND_API_URL.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(
        &self,
        recipient: &str,
        message: &RenderedMessage,
    ) -> Result<DeliveryReceipt, NotifyError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            NotifyError::NotConfigured(
                "Email is not configured. Please add RESEND_API_KEY to your environment variables."
                    .into(),
            )
        })?;

        let request = SendEmailRequest {
            from: &self.config.from,
            to: [recipient],
            subject: message.subject.as_deref().unwrap_or_default(),
            html: &message.body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = provider_error(response, "email").await;
            error!(%status, to = %recipient, error = %err, "resend send failed");
            return Err(err);
        }

        let body: SendEmailResponse = response.json().await?;
        info!(to = %recipient, id = %body.id, "email sent");
        Ok(DeliveryReceipt { provider_id: body.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_server;
    use axum::{
        http::{header, HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn notifier(base_url: String) -> EmailNotifier {
        EmailNotifier {
            base_url,
            ..EmailNotifier::new(
                Client::new(),
                EmailConfig {
                    api_key: Some("re_test".into()),
                    from: "Studio <noreply@example.com>".into(),
                },
            )
        }
    }

    fn birthday() -> RenderedMessage {
        RenderedMessage {
            subject: Some("Happy Birthday Asha!".into()),
            body: "<p>Happy Birthday</p>".into(),
        }
    }

    async fn provider_replying(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/emails",
            post(move || async move { (status, body).into_response() }),
        );
        spawn_server(app).await
    }

    #[tokio::test]
    async fn accepted_email_returns_provider_id() {
        let seen: Arc<Mutex<Option<(HeaderMap, Value)>>> = Arc::default();
        let sink = seen.clone();
        let app = Router::new().route(
            "/emails",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().await = Some((headers, body));
                    Json(json!({ "id": "em_123" }))
                }
            }),
        );
        let base = spawn_server(app).await;

        let receipt = notifier(base).send("asha@example.com", &birthday()).await.unwrap();
        assert_eq!(receipt.provider_id, "em_123");

        let (headers, body) = seen.lock().await.take().unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer re_test");
        assert_eq!(body["from"], "Studio <noreply@example.com>");
        assert_eq!(body["to"], json!(["asha@example.com"]));
        assert_eq!(body["subject"], "Happy Birthday Asha!");
        assert_eq!(body["html"], "<p>Happy Birthday</p>");
    }

    #[tokio::test]
    async fn rejected_email_surfaces_provider_message() {
        let base = provider_replying(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"statusCode":422,"name":"validation_error","message":"invalid To"}"#,
        )
        .await;

        let err = notifier(base).send("nope", &birthday()).await.unwrap_err();
        assert!(matches!(&err, NotifyError::Provider(m) if m == "invalid To"), "{err}");
    }

    #[tokio::test]
    async fn unreadable_error_body_falls_back_to_status() {
        let base = provider_replying(StatusCode::BAD_GATEWAY, "upstream down").await;

        let err = notifier(base).send("asha@example.com", &birthday()).await.unwrap_err();
        assert_eq!(err.to_string(), "email provider returned 502 Bad Gateway");
    }

    #[tokio::test]
    async fn send_without_api_key_is_not_configured() {
        let notifier = EmailNotifier::new(
            Client::new(),
            EmailConfig { api_key: None, from: "Studio <noreply@example.com>".into() },
        );
        let msg = RenderedMessage { subject: Some("Hi".into()), body: "<p>Hi</p>".into() };

        let err = notifier.send("someone@example.com", &msg).await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConfigured(_)));
        assert!(err.to_string().contains("RESEND_API_KEY"));
    }

    #[test]
    fn request_body_matches_provider_shape() {
        let req = SendEmailRequest {
            from: "Studio <noreply@example.com>",
            to: ["a@example.com"],
            subject: "Hello",
            html: "<b>x</b>",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["to"][0], "a@example.com");
        assert_eq!(json["subject"], "Hello");
        assert_eq!(json["html"], "<b>x</b>");
    }
}
