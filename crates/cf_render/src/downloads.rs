use cf_core::{ArticleOutput, Error, ProcessingResult, Result};
use crate::document::styled_document;
use crate::themes::ThemeSet;

pub const MARKDOWN_MIME: &str = "text/markdown";
pub const HTML_MIME: &str = "text/html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadKind {
    Markdown,
    Html,
    Styled(String),
}

impl DownloadKind {
    /// Parses a URL path segment: `markdown`, `html` or a theme name.
    pub fn parse(segment: &str, themes: &ThemeSet) -> Option<Self> {
        match segment {
            "markdown" | "md" => Some(DownloadKind::Markdown),
            "html" => Some(DownloadKind::Html),
            name => themes.get(name).map(|t| DownloadKind::Styled(t.name.clone())),
        }
    }

    /// One-based file name for the article at zero-based `index`.
    pub fn file_name(&self, index: usize) -> String {
        let n = index + 1;
        match self {
            DownloadKind::Markdown => format!("article_{}.md", n),
            DownloadKind::Html => format!("article_{}.html", n),
            DownloadKind::Styled(theme) => format!("article_{}_{}.html", n, theme),
        }
    }

    pub fn segment(&self) -> &str {
        match self {
            DownloadKind::Markdown => "markdown",
            DownloadKind::Html => "html",
            DownloadKind::Styled(theme) => theme,
        }
    }

    /// All kinds offered for an article, styled ones in theme order.
    pub fn all(themes: &ThemeSet) -> Vec<Self> {
        let mut kinds = vec![DownloadKind::Markdown, DownloadKind::Html];
        kinds.extend(themes.iter().map(|t| DownloadKind::Styled(t.name.clone())));
        kinds
    }
}

/// A file handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub body: String,
}

impl Download {
    /// Builds one download for the article at `index` (zero-based); file
    /// names are one-based.
    pub fn for_article(
        article: &ArticleOutput,
        index: usize,
        kind: &DownloadKind,
        themes: &ThemeSet,
    ) -> Result<Self> {
        let file_name = kind.file_name(index);
        let download = match kind {
            DownloadKind::Markdown => Download {
                file_name,
                mime: MARKDOWN_MIME,
                body: article.markdown().to_string(),
            },
            DownloadKind::Html => Download {
                file_name,
                mime: HTML_MIME,
                body: article.html().to_string(),
            },
            DownloadKind::Styled(name) => {
                let theme = themes
                    .get(name)
                    .ok_or_else(|| Error::NotFound(format!("theme '{}'", name)))?;
                Download {
                    file_name,
                    mime: HTML_MIME,
                    body: styled_document(&article.title_or(index), article.html(), &theme.css),
                }
            }
        };
        Ok(download)
    }

    pub fn from_result(
        result: &ProcessingResult,
        index: usize,
        kind: &DownloadKind,
        themes: &ThemeSet,
    ) -> Result<Self> {
        let article = result
            .article(index)
            .ok_or_else(|| Error::NotFound(format!("article {}", index + 1)))?;
        Self::for_article(article, index, kind, themes)
    }

    /// Every download for every article in the result.
    pub fn all(result: &ProcessingResult, themes: &ThemeSet) -> Result<Vec<Self>> {
        let kinds = DownloadKind::all(themes);
        let mut downloads = Vec::with_capacity(result.articles.len() * kinds.len());
        for (index, article) in result.articles.iter().enumerate() {
            for kind in &kinds {
                downloads.push(Self::for_article(article, index, kind, themes)?);
            }
        }
        Ok(downloads)
    }

    /// `Content-Disposition` value for serving this file as an attachment.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> ProcessingResult {
        ProcessingResult::from_body(
            r#"{"url": "https://docs.example/doc1", "articles": [{"title":"A","html":"<p>hi</p>","markdown":"hi"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_themed_download_wraps_html() {
        let themes = ThemeSet::builtin();
        let kind = DownloadKind::Styled("classic".to_string());
        let download = Download::from_result(&result(), 0, &kind, &themes).unwrap();

        assert_eq!(download.file_name, "article_1_classic.html");
        assert_eq!(download.mime, "text/html");
        assert!(download.body.starts_with("<!DOCTYPE html>"));
        assert!(download.body.contains(&themes.get("classic").unwrap().css));
        assert!(download.body.contains("<p>hi</p>"));
    }

    #[test]
    fn test_raw_downloads() {
        let themes = ThemeSet::builtin();
        let md = Download::from_result(&result(), 0, &DownloadKind::Markdown, &themes).unwrap();
        assert_eq!((md.file_name.as_str(), md.mime, md.body.as_str()), ("article_1.md", "text/markdown", "hi"));

        let html = Download::from_result(&result(), 0, &DownloadKind::Html, &themes).unwrap();
        assert_eq!(html.file_name, "article_1.html");
        assert_eq!(html.body, "<p>hi</p>");
        assert_eq!(html.content_disposition(), "attachment; filename=\"article_1.html\"");
    }

    #[test]
    fn test_missing_article_or_theme_is_not_found() {
        let themes = ThemeSet::builtin();
        assert!(matches!(
            Download::from_result(&result(), 5, &DownloadKind::Html, &themes),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            Download::from_result(&result(), 0, &DownloadKind::Styled("neon".into()), &themes),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_all_downloads_per_article() {
        let themes = ThemeSet::builtin();
        let downloads = Download::all(&result(), &themes).unwrap();
        let names: Vec<&str> = downloads.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "article_1.md",
                "article_1.html",
                "article_1_classic.html",
                "article_1_modern.html",
                "article_1_print.html"
            ]
        );
    }

    #[test]
    fn test_parse_kind() {
        let themes = ThemeSet::builtin().with_custom(Some("p{}"));
        assert_eq!(DownloadKind::parse("markdown", &themes), Some(DownloadKind::Markdown));
        assert_eq!(DownloadKind::parse("html", &themes), Some(DownloadKind::Html));
        assert_eq!(
            DownloadKind::parse("custom", &themes),
            Some(DownloadKind::Styled("custom".to_string()))
        );
        assert_eq!(DownloadKind::parse("../etc", &themes), None);
    }
}
