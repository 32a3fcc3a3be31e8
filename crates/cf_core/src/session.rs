use serde::Serialize;
use tracing::{info, warn};
use crate::form::ArticleForm;
use crate::queue::ArticleQueue;
use crate::result::ProcessingResult;
use crate::types::{QueuedArticle, SubmitPayload};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// A failed submission, kept so the raw response can be inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl From<&Error> for SubmitError {
    fn from(error: &Error) -> Self {
        Self {
            message: error.to_string(),
            status: error.status(),
            body: error.body().map(str::to_string),
        }
    }
}

/// Everything one user works with between page renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub queue: ArticleQueue,
    pub result: Option<ProcessingResult>,
    pub last_error: Option<SubmitError>,
    pub custom_css: Option<String>,
    /// A submission has been handed to the webhook and not yet completed.
    pub in_flight: bool,
    #[serde(skip)]
    notice: Option<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_article(&mut self, form: ArticleForm) -> Result<()> {
        self.record_article(form.into_article())
    }

    /// Queues an already validated form, or reports why validation failed.
    pub fn record_article(&mut self, article: Result<QueuedArticle>) -> Result<()> {
        match article {
            Ok(article) => {
                info!("➕ Queued article: {} ({})", article.title, article.input_kind());
                self.notice = Some(Notice::success(format!("Added: {}", article.title)));
                self.queue.append(article);
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn remove_article(&mut self, index: usize) -> Result<()> {
        let removed = self.queue.remove(index)?;
        info!("🗑️ Removed article: {}", removed.title);
        self.last_error = None;
        Ok(())
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.last_error = None;
    }

    /// Payload for the next submission, or `None` when the queue is empty or
    /// a submission is already running. Sets `in_flight` until
    /// [`Session::complete_submission`].
    pub fn prepare_submission(&mut self) -> Option<SubmitPayload> {
        if self.in_flight {
            self.notice = Some(Notice::info("This batch is already being processed"));
            return None;
        }
        if self.queue.is_empty() {
            self.notice = Some(Notice::info("Add articles to get started"));
            return None;
        }
        self.in_flight = true;
        Some(SubmitPayload::new(self.queue.to_vec(), self.custom_css.clone()))
    }

    /// Records the outcome of a submission. Failures leave the queue and any
    /// earlier result untouched so the batch can be retried.
    pub fn complete_submission(&mut self, outcome: Result<ProcessingResult>) {
        self.in_flight = false;
        match outcome {
            Ok(result) => {
                info!("✨ Processing complete: {} article(s)", result.processed_count());
                self.result = Some(result);
                self.last_error = None;
                self.notice = Some(Notice::success("Processing complete!"));
            }
            Err(e) => {
                warn!("❌ Submission failed: {}", e);
                self.last_error = Some(SubmitError::from(&e));
                self.notice = None;
            }
        }
    }

    pub fn new_batch(&mut self) {
        self.queue.clear();
        self.result = None;
        self.last_error = None;
    }

    pub fn set_custom_css(&mut self, css: &str) {
        let css = css.trim();
        self.custom_css = if css.is_empty() { None } else { Some(css.to_string()) };
        self.notice = Some(Notice::info(if self.custom_css.is_some() {
            "Custom CSS saved"
        } else {
            "Custom CSS cleared"
        }));
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InputMethod;

    fn url_form(title: &str) -> ArticleForm {
        ArticleForm {
            title: title.to_string(),
            method: InputMethod::Url,
            url: format!("http://news.example/{}", title),
            ..Default::default()
        }
    }

    fn queued(titles: &[&str]) -> Session {
        let mut session = Session::new();
        for title in titles {
            session.add_article(url_form(title)).unwrap();
        }
        session
    }

    #[test]
    fn test_empty_queue_cannot_be_submitted() {
        let mut session = Session::new();
        assert!(session.prepare_submission().is_none());
        assert!(!session.in_flight);
        assert_eq!(session.take_notice().unwrap().message, "Add articles to get started");
    }

    #[test]
    fn test_second_submission_refused_while_in_flight() {
        let mut session = queued(&["A"]);
        assert!(session.prepare_submission().is_some());
        assert!(session.in_flight);
        assert!(session.prepare_submission().is_none());
        assert_eq!(
            session.take_notice().unwrap().message,
            "This batch is already being processed"
        );

        session.complete_submission(Err(Error::Timeout(1)));
        assert!(!session.in_flight);
        assert!(session.prepare_submission().is_some());
    }

    #[test]
    fn test_queue_changes_dismiss_last_error() {
        let mut session = queued(&["A", "B"]);
        let failure = || Err(Error::Status { status: 502, body: String::new() });

        session.complete_submission(failure());
        session.add_article(url_form("C")).unwrap();
        assert!(session.last_error.is_none());

        session.complete_submission(failure());
        session.remove_article(0).unwrap();
        assert!(session.last_error.is_none());

        session.complete_submission(failure());
        session.clear_queue();
        assert!(session.last_error.is_none());
    }

    #[test]
    fn test_failed_validation_keeps_last_error() {
        let mut session = queued(&["A"]);
        session.complete_submission(Err(Error::Timeout(5)));
        let err = session.record_article(Err(Error::Validation("Please enter a URL".to_string())));
        assert!(err.is_err());
        assert_eq!(session.queue.len(), 1);
        assert!(session.last_error.is_some());
    }

    #[test]
    fn test_prepare_submission_snapshots_queue() {
        let mut session = queued(&["A", "B"]);
        let payload = session.prepare_submission().unwrap();
        assert_eq!(payload.articles.len(), 2);
        assert!(payload.options.is_none());
        session.complete_submission(Ok(ProcessingResult::default()));

        session.set_custom_css("h1 { color: red; }");
        let payload = session.prepare_submission().unwrap();
        assert_eq!(payload.options.unwrap().css, "h1 { color: red; }");
    }

    #[test]
    fn test_failed_submission_preserves_state() {
        let mut session = queued(&["A", "B"]);
        let earlier = ProcessingResult {
            url: Some("https://docs.example/old".to_string()),
            ..Default::default()
        };
        session.complete_submission(Ok(earlier.clone()));
        session.take_notice();

        session.complete_submission(Err(Error::Status {
            status: 500,
            body: "workflow exploded".to_string(),
        }));

        assert_eq!(session.queue.len(), 2);
        assert_eq!(session.result, Some(earlier));
        let error = session.last_error.clone().unwrap();
        assert_eq!(error.status, Some(500));
        assert_eq!(error.body.as_deref(), Some("workflow exploded"));
        assert_eq!(error.message, "Error: 500");
    }

    #[test]
    fn test_successful_submission_replaces_result() {
        let mut session = queued(&["A"]);
        session.complete_submission(Err(Error::Timeout(300)));
        assert!(session.last_error.is_some());

        let result = ProcessingResult {
            total_processed: Some(1),
            ..Default::default()
        };
        session.complete_submission(Ok(result.clone()));
        assert_eq!(session.result, Some(result));
        assert!(session.last_error.is_none());
        assert_eq!(session.take_notice().unwrap().message, "Processing complete!");
        assert!(session.take_notice().is_none());
    }

    #[test]
    fn test_new_batch_discards_everything() {
        let mut session = queued(&["A"]);
        session.complete_submission(Ok(ProcessingResult::default()));
        session.new_batch();
        assert!(session.queue.is_empty());
        assert!(session.result.is_none());
        assert!(session.last_error.is_none());
    }

    #[test]
    fn test_invalid_form_sets_error_notice() {
        let mut session = Session::new();
        let err = session.add_article(ArticleForm::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(session.queue.is_empty());
        let notice = session.take_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Please enter an article title");
    }

    #[test]
    fn test_blank_css_clears_custom_css() {
        let mut session = Session::new();
        session.set_custom_css("body {}");
        assert!(session.custom_css.is_some());
        session.set_custom_css("   ");
        assert!(session.custom_css.is_none());
    }
}
