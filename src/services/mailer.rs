use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::environment::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Outbound email. Only verification codes are sent today.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError>;
}

#[derive(Debug, Serialize)]
struct SendEmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Client for a transactional-mail HTTP API that accepts
/// `{from, to, subject, html}` with a bearer key.
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError> {
        let payload = SendEmailPayload {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailerError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Api(format!(
                "API returned status: {} {}",
                status, body
            )));
        }

        tracing::debug!("Mail '{}' accepted for {}", subject, to);
        Ok(())
    }
}

/// Writes messages to the log instead of sending them. Used when no mail
/// API is configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailerError> {
        tracing::info!("Mail delivery disabled; to={} subject='{}' body={}", to, subject, html);
        Ok(())
    }
}
