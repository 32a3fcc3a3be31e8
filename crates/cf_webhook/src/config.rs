use cf_core::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const WEBHOOK_URL_VAR: &str = "N8N_WEBHOOK_URL";
pub const API_KEY_VAR: &str = "API_KEY";
pub const TIMEOUT_VAR: &str = "CF_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const MAX_TIMEOUT_SECS: u64 = 600;
const LABEL_URL_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientKind {
    #[default]
    Http,
    /// Answers locally without contacting the workflow.
    Dummy,
}

impl FromStr for ClientKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ClientKind::Http),
            "dummy" | "dry-run" => Ok(ClientKind::Dummy),
            other => Err(Error::Config(format!("unknown webhook client: {}", other))),
        }
    }
}

#[derive(Clone)]
pub struct WebhookConfig {
    pub url: Url,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub client: ClientKind,
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("client", &self.client)
            .finish()
    }
}

impl WebhookConfig {
    /// The webhook URL is required; a blank API key counts as none.
    pub fn new(url: Option<&str>, api_key: Option<String>) -> Result<Self> {
        let raw = url.map(str::trim).filter(|u| !u.is_empty()).ok_or_else(|| {
            Error::Config(format!("please set {}", WEBHOOK_URL_VAR))
        })?;
        let url = Url::parse(raw)
            .map_err(|e| Error::Config(format!("{} is not a valid URL: {}", WEBHOOK_URL_VAR, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "{} must be an http(s) URL, got scheme '{}'",
                WEBHOOK_URL_VAR,
                url.scheme()
            )));
        }
        Ok(Self {
            url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: ClientKind::default(),
        })
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            return Err(Error::Config(format!(
                "timeout must be between 1 and {} seconds, got {}",
                MAX_TIMEOUT_SECS, secs
            )));
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    pub fn with_client(mut self, client: ClientKind) -> Self {
        self.client = client;
        self
    }

    /// Resolves the configuration through `lookup`, keyed by variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::new(lookup(WEBHOOK_URL_VAR).as_deref(), lookup(API_KEY_VAR))?;
        match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    Error::Config(format!("{} must be a number of seconds: {}", TIMEOUT_VAR, e))
                })?;
                config.with_timeout_secs(secs)
            }
            None => Ok(config),
        }
    }

    /// Shortened endpoint shown to the user, e.g. `https://flows.example/webhook/abc...`.
    pub fn connection_label(&self) -> String {
        let shown: String = self.url.as_str().chars().take(LABEL_URL_CHARS).collect();
        format!("{}...", shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let err = WebhookConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.to_string(), "Configuration Error: please set N8N_WEBHOOK_URL");

        assert!(WebhookConfig::new(Some("   "), None).is_err());
    }

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(WebhookConfig::new(Some("not a url"), None).is_err());
        assert!(WebhookConfig::new(Some("ftp://flows.example/hook"), None).is_err());
    }

    #[test]
    fn test_full_lookup() {
        let config = WebhookConfig::from_lookup(lookup(&[
            (WEBHOOK_URL_VAR, "https://flows.example/webhook/upsc"),
            (API_KEY_VAR, "secret"),
            (TIMEOUT_VAR, "600"),
        ]))
        .unwrap();
        assert_eq!(config.url.as_str(), "https://flows.example/webhook/upsc");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(600));
        assert_eq!(config.client, ClientKind::Http);
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = WebhookConfig::new(Some("http://localhost:5678/webhook"), Some(" ".into())).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_timeout_bounds() {
        let config = WebhookConfig::new(Some("http://localhost/hook"), None).unwrap();
        assert!(config.clone().with_timeout_secs(0).is_err());
        assert!(config.clone().with_timeout_secs(601).is_err());
        assert!(config.with_timeout_secs(450).is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = WebhookConfig::new(Some("http://localhost/hook"), Some("topsecret".into())).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_connection_label_truncates() {
        let long = format!("https://flows.example/webhook/{}", "a".repeat(80));
        let config = WebhookConfig::new(Some(&long), None).unwrap();
        let label = config.connection_label();
        assert_eq!(label.chars().count(), 53);
        assert!(label.ends_with("..."));
    }
}
