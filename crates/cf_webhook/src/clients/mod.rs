use std::sync::Arc;
use cf_core::{Result, WebhookClient};
use tracing::info;
use crate::config::{ClientKind, WebhookConfig};

pub mod dummy;
pub mod http;

pub use dummy::DummyWebhook;
pub use http::HttpWebhook;

pub fn create_client(config: &WebhookConfig) -> Result<Arc<dyn WebhookClient>> {
    let client: Arc<dyn WebhookClient> = match config.client {
        ClientKind::Http => Arc::new(HttpWebhook::new(config)?),
        ClientKind::Dummy => Arc::new(DummyWebhook::new()),
    };
    info!("🔗 Webhook client ready: {} ({})", client.name(), config.connection_label());
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_by_kind() {
        let config = WebhookConfig::new(Some("http://localhost:5678/webhook/upsc"), None).unwrap();
        assert_eq!(create_client(&config).unwrap().name(), "http");

        let config = config.with_client(ClientKind::Dummy);
        assert_eq!(create_client(&config).unwrap().name(), "dummy");
    }
}
