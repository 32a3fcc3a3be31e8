use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::{Error, Result};

pub const MISSING_ID: &str = "N/A";
pub const MISSING_TIMESTAMP: &str = "Unknown";
pub const MISSING_EXAM_TYPE: &str = "N/A";
const ID_DISPLAY_CHARS: usize = 15;

/// Strings stay strings, numbers and booleans are stringified, anything
/// else (null, arrays, objects) counts as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts `3`, `3.0` and `"3"`.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Keeps the object entries of an array and drops everything else.
fn lenient_articles<'de, D>(deserializer: D) -> std::result::Result<Vec<ArticleOutput>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// What the workflow returned for a processed batch. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingResult {
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub document_url: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub total_processed: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient_articles")]
    pub articles: Vec<ArticleOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleOutput {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub exam_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub markdown: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub html: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl ProcessingResult {
    /// Decodes a webhook response body. Only a body that is not a JSON object
    /// fails; mistyped fields are coerced or dropped.
    pub fn from_body(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| Error::Decode(format!("response is not JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Decode("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
    }

    pub fn document_link(&self) -> Option<&str> {
        non_empty(&self.url).or_else(|| non_empty(&self.document_url))
    }

    pub fn processed_count(&self) -> u64 {
        self.total_processed.unwrap_or(self.articles.len() as u64)
    }

    pub fn document_id_display(&self) -> String {
        match non_empty(&self.document_id) {
            Some(id) if id.chars().count() > ID_DISPLAY_CHARS => {
                let head: String = id.chars().take(ID_DISPLAY_CHARS).collect();
                format!("{}...", head)
            }
            Some(id) => id.to_string(),
            None => MISSING_ID.to_string(),
        }
    }

    pub fn timestamp_display(&self) -> &str {
        non_empty(&self.timestamp).unwrap_or(MISSING_TIMESTAMP)
    }

    pub fn article(&self, index: usize) -> Option<&ArticleOutput> {
        self.articles.get(index)
    }
}

impl ArticleOutput {
    pub fn title_or(&self, index: usize) -> String {
        non_empty(&self.title)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Article {}", index + 1))
    }

    pub fn exam_type_display(&self) -> &str {
        non_empty(&self.exam_type).unwrap_or(MISSING_EXAM_TYPE)
    }

    pub fn markdown(&self) -> &str {
        self.markdown.as_deref().unwrap_or_default()
    }

    pub fn html(&self) -> &str {
        self.html.as_deref().unwrap_or_default()
    }
}
