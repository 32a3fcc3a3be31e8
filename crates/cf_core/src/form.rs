use crate::types::{ArticleInput, ExamType, InputMethod, QueuedArticle};
use crate::{upload, Error, Result};

#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw fields of the "Add Article" form, before validation.
#[derive(Debug, Clone, Default)]
pub struct ArticleForm {
    pub title: String,
    pub method: InputMethod,
    pub url: String,
    pub raw_text: String,
    pub image: Option<ImageUpload>,
    pub exam_type: ExamType,
    pub subject: String,
    pub focus_keyword: String,
}

fn invalid(message: &str) -> Error {
    Error::Validation(message.to_string())
}

impl ArticleForm {
    /// Validates the form and keeps only the input of the selected method.
    pub fn into_article(self) -> Result<QueuedArticle> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(invalid("Please enter an article title"));
        }

        let input = match self.method {
            InputMethod::Url => {
                let url = self.url.trim();
                if url.is_empty() {
                    return Err(invalid("Please enter a URL"));
                }
                ArticleInput::Url(url.to_string())
            }
            InputMethod::RawText => {
                if self.raw_text.trim().is_empty() {
                    return Err(invalid("Please paste article text"));
                }
                ArticleInput::Text(self.raw_text.trim().to_string())
            }
            InputMethod::Image => match self.image {
                Some(upload) if !upload.bytes.is_empty() => {
                    ArticleInput::Image(upload::encode_upload(&upload.file_name, &upload.bytes)?)
                }
                _ => return Err(invalid("Please upload an image")),
            },
        };

        Ok(QueuedArticle::new(
            title,
            input,
            self.exam_type,
            Some(self.subject.trim().to_string()),
            Some(self.focus_keyword.trim().to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(method: InputMethod) -> ArticleForm {
        ArticleForm {
            title: "Monetary Policy".to_string(),
            method,
            url: "http://x".to_string(),
            raw_text: "RBI kept the repo rate unchanged.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_mode_keeps_only_url() {
        let article = form(InputMethod::Url).into_article().unwrap();
        assert_eq!(article.url(), "http://x");
        assert_eq!(article.raw_text(), "");
        assert_eq!(article.image_data(), "");
        assert_eq!(article.input_kind(), "URL");
    }

    #[test]
    fn test_text_mode_keeps_only_text() {
        let article = form(InputMethod::RawText).into_article().unwrap();
        assert_eq!(article.url(), "");
        assert_eq!(article.raw_text(), "RBI kept the repo rate unchanged.");
        assert_eq!(article.image_data(), "");
    }

    #[test]
    fn test_defaults_for_subject_and_keyword() {
        let article = form(InputMethod::Url).into_article().unwrap();
        assert_eq!(article.subject, "General");
        assert_eq!(article.focus_keyword, "Monetary Policy");
        assert_eq!(article.exam_type, ExamType::Prelims);
    }

    #[test]
    fn test_validation_messages() {
        let mut missing_title = form(InputMethod::Url);
        missing_title.title = "   ".to_string();
        assert_eq!(
            missing_title.into_article().unwrap_err().to_string(),
            "Please enter an article title"
        );

        let mut missing_url = form(InputMethod::Url);
        missing_url.url.clear();
        assert_eq!(missing_url.into_article().unwrap_err().to_string(), "Please enter a URL");

        let mut missing_text = form(InputMethod::RawText);
        missing_text.raw_text = "\n".to_string();
        assert_eq!(
            missing_text.into_article().unwrap_err().to_string(),
            "Please paste article text"
        );

        assert_eq!(
            form(InputMethod::Image).into_article().unwrap_err().to_string(),
            "Please upload an image"
        );
    }

    #[test]
    fn test_other_mode_fields_ignored_on_validation() {
        // URL left blank while text is filled: URL mode still requires a URL.
        let mut f = form(InputMethod::Url);
        f.url.clear();
        assert!(f.into_article().is_err());
    }
}
