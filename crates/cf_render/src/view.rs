use cf_core::ProcessingResult;
use serde::Serialize;
use crate::document::normalize_fragment;
use crate::downloads::DownloadKind;
use crate::themes::ThemeSet;

pub const MISSING_LINK: &str = "Document URL not found in response.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub label: String,
    /// Path segment for `/downloads/:article/:kind`.
    pub kind: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    pub index: usize,
    pub tab_label: String,
    pub title: String,
    pub exam_type: String,
    pub downloads: Vec<DownloadLink>,
    pub preview_html: String,
}

/// Display-ready projection of a processing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub document_link: Option<String>,
    pub processed: u64,
    pub document_id: String,
    pub timestamp: String,
    pub articles: Vec<ArticleView>,
}

impl ResultView {
    pub fn new(result: &ProcessingResult, themes: &ThemeSet) -> Self {
        let articles = result
            .articles
            .iter()
            .enumerate()
            .map(|(index, article)| {
                let n = index + 1;
                let downloads = DownloadKind::all(themes)
                    .into_iter()
                    .map(|kind| {
                        let label = match &kind {
                            DownloadKind::Markdown => "Download Markdown".to_string(),
                            DownloadKind::Html => "Download HTML".to_string(),
                            DownloadKind::Styled(name) => format!(
                                "Download {} HTML",
                                themes.get(name).map(|t| t.label()).unwrap_or_default()
                            ),
                        };
                        DownloadLink {
                            label,
                            kind: kind.segment().to_string(),
                            file_name: kind.file_name(index),
                        }
                    })
                    .collect();
                ArticleView {
                    index,
                    tab_label: format!("Article {}", n),
                    title: article.title_or(index),
                    exam_type: article.exam_type_display().to_string(),
                    downloads,
                    preview_html: normalize_fragment(article.html()),
                }
            })
            .collect();

        Self {
            document_link: result.document_link().map(str::to_string),
            processed: result.processed_count(),
            document_id: result.document_id_display(),
            timestamp: result.timestamp_display().to_string(),
            articles,
        }
    }
}
