use cf_core::{Error, ProcessingResult, Result, SubmitPayload, WebhookClient};
use cf_render::{Download, ThemeSet, ThemeSource};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// Sends the payload while a spinner runs, like the page's "Processing..." indicator.
pub async fn submit_with_spinner(
    client: &dyn WebhookClient,
    payload: &SubmitPayload,
) -> Result<ProcessingResult> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!(
        "Processing {} article(s)... This may take a few minutes...",
        payload.articles.len()
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = client.submit(payload).await;
    match &outcome {
        Ok(result) => spinner.finish_with_message(format!(
            "Processing complete! {} article(s)",
            result.processed_count()
        )),
        Err(e) => spinner.abandon_with_message(format!("Processing failed: {}", e)),
    }
    outcome
}

/// Writes every download of every article, plus the raw result as
/// `result.json`, into `out_dir`.
pub fn write_outputs(
    result: &ProcessingResult,
    themes: &ThemeSet,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    for download in Download::all(result, themes)? {
        let path = out_dir.join(&download.file_name);
        fs::write(&path, download.body.as_bytes())?;
        written.push(path);
    }

    let path = out_dir.join("result.json");
    fs::write(&path, serde_json::to_string_pretty(result)?)?;
    written.push(path);

    Ok(written)
}

pub fn report_result(result: &ProcessingResult) {
    match result.document_link() {
        Some(link) => info!("📄 Study material created: {}", link),
        None => warn!("Document URL not found in response."),
    }
    info!(
        "📊 Articles processed: {} | Document ID: {} | Created at: {}",
        result.processed_count(),
        result.document_id_display(),
        result.timestamp_display()
    );
}

pub fn report_error(e: &Error) {
    error!("❌ {}", e);
    if let Some(body) = e.body() {
        error!("Response body:\n{}", body);
    }
}

pub fn list_themes(themes: &ThemeSet) {
    for theme in themes.iter() {
        let source = match &theme.source {
            ThemeSource::File(path) => path.display().to_string(),
            ThemeSource::Builtin => "built-in".to_string(),
            ThemeSource::Custom => "custom".to_string(),
        };
        println!("{:<10} {}", theme.name, source);
    }
}
