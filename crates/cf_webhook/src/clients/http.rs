use async_trait::async_trait;
use cf_core::{Error, ProcessingResult, Result, SubmitPayload, WebhookClient};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use crate::config::WebhookConfig;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Posts batches to the workflow's webhook over HTTP.
pub struct HttpWebhook {
    client: Client,
    url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpWebhook {
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout(self.timeout.as_secs())
        } else {
            Error::Http(error)
        }
    }
}

impl fmt::Debug for HttpWebhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpWebhook")
            .field("client", &"<reqwest::Client>")
            .field("url", &self.url.as_str())
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl WebhookClient for HttpWebhook {
    fn name(&self) -> &str {
        "http"
    }

    async fn submit(&self, payload: &SubmitPayload) -> Result<ProcessingResult> {
        info!("🚀 Sending {} article(s) to the workflow", payload.articles.len());

        let mut request = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(payload);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        debug!("Workflow answered {} with {} bytes", status, body.len());

        if status != StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        ProcessingResult::from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_key() {
        let config = WebhookConfig::new(Some("http://localhost/hook"), Some("k-123".into())).unwrap();
        let client = HttpWebhook::new(&config).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("k-123"));
        assert!(debug.contains("localhost"));
    }
}
