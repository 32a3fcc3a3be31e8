use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SUBJECT: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExamType {
    #[default]
    Prelims,
    Mains,
}

impl ExamType {
    pub const ALL: [ExamType; 2] = [ExamType::Prelims, ExamType::Mains];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::Prelims => "Prelims",
            ExamType::Mains => "Mains",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prelims" => Ok(ExamType::Prelims),
            "mains" => Ok(ExamType::Mains),
            other => Err(crate::Error::Validation(format!("Unknown exam type: {}", other))),
        }
    }
}

/// How the user supplies an article on the add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Url,
    RawText,
    Image,
}

impl InputMethod {
    pub const ALL: [InputMethod; 3] = [InputMethod::Url, InputMethod::RawText, InputMethod::Image];

    pub fn label(&self) -> &'static str {
        match self {
            InputMethod::Url => "URL",
            InputMethod::RawText => "Raw Text",
            InputMethod::Image => "Image Upload",
        }
    }

    /// Form value used by the radio buttons.
    pub fn key(&self) -> &'static str {
        match self {
            InputMethod::Url => "url",
            InputMethod::RawText => "text",
            InputMethod::Image => "image",
        }
    }
}

impl FromStr for InputMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "url" => Ok(InputMethod::Url),
            "text" | "raw text" | "raw_text" => Ok(InputMethod::RawText),
            "image" | "image upload" | "image_data" => Ok(InputMethod::Image),
            other => Err(crate::Error::Validation(format!("Unknown input method: {}", other))),
        }
    }
}

/// The single source of an article's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleInput {
    Url(String),
    Text(String),
    /// Base64-encoded JPEG.
    Image(String),
}

impl ArticleInput {
    pub fn method(&self) -> InputMethod {
        match self {
            ArticleInput::Url(_) => InputMethod::Url,
            ArticleInput::Text(_) => InputMethod::RawText,
            ArticleInput::Image(_) => InputMethod::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireArticle", try_from = "WireArticle")]
pub struct QueuedArticle {
    pub title: String,
    pub input: ArticleInput,
    pub exam_type: ExamType,
    pub subject: String,
    pub focus_keyword: String,
}

impl QueuedArticle {
    /// Builds a record, applying the subject and focus keyword defaults.
    pub fn new(
        title: impl Into<String>,
        input: ArticleInput,
        exam_type: ExamType,
        subject: Option<String>,
        focus_keyword: Option<String>,
    ) -> Self {
        let title = title.into();
        let subject = subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        let focus_keyword = focus_keyword
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| title.clone());
        Self {
            title,
            input,
            exam_type,
            subject,
            focus_keyword,
        }
    }

    pub fn input_kind(&self) -> &'static str {
        match self.input {
            ArticleInput::Url(_) => "URL",
            ArticleInput::Text(_) => "Text",
            ArticleInput::Image(_) => "Image",
        }
    }

    pub fn url(&self) -> &str {
        match &self.input {
            ArticleInput::Url(u) => u,
            _ => "",
        }
    }

    pub fn raw_text(&self) -> &str {
        match &self.input {
            ArticleInput::Text(t) => t,
            _ => "",
        }
    }

    pub fn image_data(&self) -> &str {
        match &self.input {
            ArticleInput::Image(i) => i,
            _ => "",
        }
    }
}

/// Flat record the workflow expects: exactly one of the three inputs is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireArticle {
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    raw_text: String,
    #[serde(default)]
    image_data: String,
    exam_type: ExamType,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    focus_keyword: String,
}

impl From<QueuedArticle> for WireArticle {
    fn from(article: QueuedArticle) -> Self {
        let (url, raw_text, image_data) = match article.input {
            ArticleInput::Url(u) => (u, String::new(), String::new()),
            ArticleInput::Text(t) => (String::new(), t, String::new()),
            ArticleInput::Image(i) => (String::new(), String::new(), i),
        };
        Self {
            title: article.title,
            url,
            raw_text,
            image_data,
            exam_type: article.exam_type,
            subject: article.subject,
            focus_keyword: article.focus_keyword,
        }
    }
}

impl TryFrom<WireArticle> for QueuedArticle {
    type Error = String;

    fn try_from(wire: WireArticle) -> std::result::Result<Self, Self::Error> {
        let input = match (
            wire.url.is_empty(),
            wire.raw_text.is_empty(),
            wire.image_data.is_empty(),
        ) {
            (false, true, true) => ArticleInput::Url(wire.url),
            (true, false, true) => ArticleInput::Text(wire.raw_text),
            (true, true, false) => ArticleInput::Image(wire.image_data),
            _ => {
                return Err(format!(
                    "article '{}' must have exactly one of url, raw_text or image_data",
                    wire.title
                ))
            }
        };
        Ok(QueuedArticle::new(
            wire.title,
            input,
            wire.exam_type,
            Some(wire.subject),
            Some(wire.focus_keyword),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOptions {
    pub css: String,
}

/// Request body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub articles: Vec<QueuedArticle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SubmitOptions>,
}

impl SubmitPayload {
    pub fn new(articles: Vec<QueuedArticle>, css: Option<String>) -> Self {
        Self {
            articles,
            options: css.map(|css| SubmitOptions { css }),
        }
    }
}
