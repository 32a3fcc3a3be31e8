use cf_core::{Session, WebhookClient};
use cf_render::ThemeSet;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// Sessions untouched for this long are dropped when a new one is created.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

pub struct AppState {
    pub webhook: Arc<dyn WebhookClient>,
    pub themes: ThemeSet,
    /// Shortened webhook URL shown in the settings panel.
    pub connection_label: String,
    session_ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl AppState {
    pub fn new(webhook: Arc<dyn WebhookClient>, themes: ThemeSet, connection_label: String) -> Self {
        Self {
            webhook,
            themes,
            connection_label,
            session_ttl: DEFAULT_SESSION_TTL,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Runs `f` against the session, creating it on first use. Creating a
    /// session also evicts the idle ones.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        if !sessions.contains_key(&id) {
            let before = sessions.len();
            let ttl = self.session_ttl;
            // A running submission keeps its session alive.
            sessions.retain(|_, entry| {
                entry.session.in_flight || now.duration_since(entry.last_seen) < ttl
            });
            if sessions.len() < before {
                debug!("Evicted {} idle session(s)", before - sessions.len());
            }
        }
        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            session: Session::default(),
            last_seen: now,
        });
        entry.last_seen = now;
        f(&mut entry.session)
    }

    /// Runs `f` against the session if it exists. Read-only routes use this
    /// so visitors without state do not allocate any.
    pub async fn with_existing_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(f(&mut entry.session))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
