use cf_core::{ArticleForm, Error, ExamType, ImageUpload, InputMethod, QueuedArticle, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One article in a batch file. Exactly one of `url`, `text` or `image`
/// must be set; `image` paths are relative to the batch file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchEntry {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub exam_type: ExamType,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
}

impl BatchEntry {
    fn into_form(self, base_dir: &Path) -> Result<ArticleForm> {
        let mut form = ArticleForm {
            title: self.title,
            exam_type: self.exam_type,
            subject: self.subject.unwrap_or_default(),
            focus_keyword: self.focus_keyword.unwrap_or_default(),
            ..Default::default()
        };
        match (self.url, self.text, self.image) {
            (Some(url), None, None) => {
                form.method = InputMethod::Url;
                form.url = url;
            }
            (None, Some(text), None) => {
                form.method = InputMethod::RawText;
                form.raw_text = text;
            }
            (None, None, Some(path)) => {
                let path = base_dir.join(path);
                form.method = InputMethod::Image;
                form.image = Some(ImageUpload {
                    file_name: path.display().to_string(),
                    bytes: fs::read(&path)?,
                });
            }
            _ => {
                return Err(Error::Validation(
                    "give exactly one of url, text or image".to_string(),
                ))
            }
        }
        Ok(form)
    }
}

/// Parses and validates a batch file's JSON contents.
pub fn parse_batch(json: &str, base_dir: &Path) -> Result<Vec<QueuedArticle>> {
    let entries: Vec<BatchEntry> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .into_form(base_dir)
                .and_then(ArticleForm::into_article)
                .map_err(|e| Error::Validation(format!("batch entry {}: {}", i + 1, e)))
        })
        .collect()
}

pub fn load_batch(path: &Path) -> Result<Vec<QueuedArticle>> {
    let json = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_batch(&json, base_dir)
}
