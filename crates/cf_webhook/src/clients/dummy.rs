use async_trait::async_trait;
use cf_core::{ArticleOutput, ProcessingResult, QueuedArticle, Result, SubmitPayload, WebhookClient};
use chrono::Local;

/// Offline stand-in for the workflow: echoes each article back as a
/// skeleton study note.
#[derive(Debug, Default)]
pub struct DummyWebhook;

impl DummyWebhook {
    pub fn new() -> Self {
        Self
    }

    fn render(article: &QueuedArticle) -> ArticleOutput {
        let markdown = format!(
            "# {}\n\n**Subject:** {}\n\n**Focus:** {}\n\n_Source: {}_\n",
            article.title,
            article.subject,
            article.focus_keyword,
            article.input_kind()
        );
        let html = format!(
            "<h1>{}</h1>\n<p><strong>Subject:</strong> {}</p>\n<p><strong>Focus:</strong> {}</p>\n<p><em>Source: {}</em></p>",
            article.title,
            article.subject,
            article.focus_keyword,
            article.input_kind()
        );
        ArticleOutput {
            title: Some(article.title.clone()),
            exam_type: Some(article.exam_type.to_string()),
            markdown: Some(markdown),
            html: Some(html),
        }
    }
}

#[async_trait]
impl WebhookClient for DummyWebhook {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn submit(&self, payload: &SubmitPayload) -> Result<ProcessingResult> {
        let now = Local::now();
        tracing::info!("🧪 Dry run: echoing {} article(s)", payload.articles.len());
        Ok(ProcessingResult {
            url: None,
            document_url: None,
            total_processed: Some(payload.articles.len() as u64),
            document_id: Some(format!("dry-run-{}", now.format("%Y%m%d%H%M%S"))),
            timestamp: Some(now.to_rfc3339()),
            articles: payload.articles.iter().map(Self::render).collect(),
        })
    }
}
