use axum::extract::Multipart;
use cf_core::{ArticleForm, Error, ImageUpload, Result};

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Error {
    Error::Validation(format!("Could not read the submitted form: {}", e))
}

/// Collects the add-article form fields. Unknown fields are ignored; the
/// selected input method decides which content field is used later.
pub async fn read_article_form(mut multipart: Multipart) -> Result<ArticleForm> {
    let mut form = ArticleForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() && !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {
                let value = field.text().await.map_err(multipart_error)?;
                match name.as_str() {
                    "title" => form.title = value,
                    "input_method" => form.method = value.parse()?,
                    "url" => form.url = value,
                    "raw_text" => form.raw_text = value,
                    "exam_type" => form.exam_type = value.parse()?,
                    "subject" => form.subject = value,
                    "focus_keyword" => form.focus_keyword = value,
                    _ => {}
                }
            }
        }
    }
    Ok(form)
}
