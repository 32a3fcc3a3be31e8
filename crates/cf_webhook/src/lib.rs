pub mod clients;
pub mod config;

pub use clients::create_client;
pub use clients::dummy::DummyWebhook;
pub use clients::http::HttpWebhook;
pub use config::{ClientKind, WebhookConfig};
