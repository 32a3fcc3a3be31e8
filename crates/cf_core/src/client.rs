use async_trait::async_trait;
use std::fmt;
use crate::result::ProcessingResult;
use crate::types::SubmitPayload;
use crate::Result;

/// The external workflow that turns queued articles into study material.
#[async_trait]
pub trait WebhookClient: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Sends the whole batch in one request. All-or-nothing: no retries.
    async fn submit(&self, payload: &SubmitPayload) -> Result<ProcessingResult>;
}
