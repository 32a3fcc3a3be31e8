//! Server-side rendering of the single application page.

use cf_core::{ExamType, InputMethod, Notice, NoticeLevel, Session, SubmitError};
use cf_render::view::MISSING_LINK;
use cf_render::{escape_html, ResultView, ThemeSet};
use std::fmt::Write;

const PAGE_TITLE: &str = "UPSC Content Factory";

const PAGE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; background: #fafafa; }
header, main, footer { max-width: 1200px; margin: 0 auto; padding: 0 24px; }
.layout { display: grid; grid-template-columns: 2fr 1fr; gap: 24px; }
.panel { background: #fff; border: 1px solid #e3e3e3; border-radius: 8px; padding: 16px 20px; margin-bottom: 16px; }
label { display: block; font-weight: 600; margin-top: 10px; }
input[type=text], input[type=url], textarea, select { width: 100%; box-sizing: border-box; padding: 6px; }
.inline label { display: inline; font-weight: normal; margin-right: 12px; }
.notice { padding: 10px 14px; border-radius: 6px; margin: 12px 0; }
.notice.success { background: #e6f4ea; } .notice.info { background: #e8f0fe; }
.notice.warning { background: #fef7e0; } .notice.error { background: #fce8e6; }
button { padding: 8px 14px; cursor: pointer; }
button.primary { background: #ff4b4b; color: #fff; border: none; border-radius: 6px; }
.metrics { display: flex; gap: 40px; } .metric strong { display: block; font-size: 1.6em; }
.downloads a { display: inline-block; margin: 4px 8px 4px 0; }
iframe { width: 100%; height: 400px; border: 1px solid #ddd; }
#spinner { font-style: italic; }
footer { text-align: center; color: #666; padding: 24px; }
"#;

/// Renders the whole page for one session.
pub fn render(
    connection_label: &str,
    themes: &ThemeSet,
    session: &Session,
    notice: Option<&Notice>,
) -> String {
    let mut body = String::new();

    if let Some(notice) = notice {
        body.push_str(&render_notice(notice.level, &notice.message));
    }

    let _ = write!(
        body,
        r#"<div class="layout"><section>{form}</section><aside>{settings}{queue}</aside></div>"#,
        form = render_form(),
        settings = render_settings(connection_label, session.custom_css.as_deref()),
        queue = render_queue(session),
    );
    body.push_str("<hr>");
    body.push_str(&render_process(session));
    if let Some(error) = &session.last_error {
        body.push_str(&render_error(error));
    }
    if let Some(result) = &session.result {
        let themes = themes.with_custom(session.custom_css.as_deref());
        body.push_str(&render_results(&ResultView::new(result, &themes)));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
<header><h1>📚 {title}</h1><p>Generate high-quality study material for UPSC preparation</p></header>
<main>
{body}
</main>
<footer><hr><p>Built for UPSC aspirants | Powered by your content workflow</p></footer>
</body>
</html>
"#,
        title = PAGE_TITLE,
        css = PAGE_CSS,
        body = body,
    )
}

fn render_notice(level: NoticeLevel, message: &str) -> String {
    let (class, icon) = match level {
        NoticeLevel::Success => ("success", "✅"),
        NoticeLevel::Info => ("info", "ℹ️"),
        NoticeLevel::Error => ("error", "❌"),
    };
    format!(
        r#"<div class="notice {}">{} {}</div>"#,
        class,
        icon,
        escape_html(message)
    )
}

fn render_settings(connection_label: &str, custom_css: Option<&str>) -> String {
    format!(
        r#"<div class="panel"><h2>⚙️ Settings</h2>
<div class="notice info">🔗 Connected to: {label}</div>
<form method="post" action="/settings">
<label for="css">Custom CSS (optional)</label>
<textarea id="css" name="css" rows="8" placeholder="body {{ font-family: Georgia, serif; }}">{css}</textarea>
<button type="submit">Save CSS</button>
</form></div>"#,
        label = escape_html(connection_label),
        css = escape_html(custom_css.unwrap_or_default()),
    )
}

fn render_form() -> String {
    let mut methods = String::new();
    for (i, method) in InputMethod::ALL.iter().enumerate() {
        let _ = write!(
            methods,
            r#"<label><input type="radio" name="input_method" value="{}"{}> {}</label>"#,
            method.key(),
            if i == 0 { " checked" } else { "" },
            method.label()
        );
    }
    let exam_types: String = ExamType::ALL
        .iter()
        .map(|e| format!(r#"<option value="{0}">{0}</option>"#, e))
        .collect();

    format!(
        r#"<div class="panel"><h2>📝 Add Articles</h2>
<form method="post" action="/articles" enctype="multipart/form-data">
<label for="title">Article Title*</label>
<input type="text" id="title" name="title" placeholder="Enter a descriptive title">
<label>Choose Input Method:</label>
<div class="inline">{methods}</div>
<label for="url">Article URL</label>
<input type="url" id="url" name="url" placeholder="https://example.com/article">
<label for="raw_text">Paste Article Text</label>
<textarea id="raw_text" name="raw_text" rows="8" placeholder="Paste your article content here..."></textarea>
<label for="image">Upload Article Image</label>
<input type="file" id="image" name="image" accept=".png,.jpg,.jpeg">
<label for="exam_type">Exam Type*</label>
<select id="exam_type" name="exam_type">{exam_types}</select>
<label for="subject">Subject</label>
<input type="text" id="subject" name="subject" placeholder="e.g., Polity, Economy">
<label for="focus_keyword">Focus Keyword (optional)</label>
<input type="text" id="focus_keyword" name="focus_keyword" placeholder="Main concept to focus on">
<p><button type="submit">➕ Add Article</button></p>
</form></div>"#,
        methods = methods,
        exam_types = exam_types,
    )
}

fn render_queue(session: &Session) -> String {
    let queue = &session.queue;
    let mut html = format!(
        r#"<div class="panel"><h2>📋 Queue</h2><p><strong>Total Articles:</strong> {}</p>"#,
        queue.len()
    );

    if queue.is_empty() {
        html.push_str(&render_notice(NoticeLevel::Info, "No articles added yet"));
    } else {
        for (index, article) in queue.iter().enumerate() {
            let label = queue.display_label(index).unwrap_or_default();
            let _ = write!(
                html,
                r#"<details><summary>{label}</summary>
<p><strong>Type:</strong> {exam}<br><strong>Subject:</strong> {subject}<br><strong>Input:</strong> {input}</p>
<form method="post" action="/articles/{index}/remove"><button type="submit">🗑️ Remove</button></form>
</details>"#,
                label = escape_html(&label),
                exam = article.exam_type,
                subject = escape_html(&article.subject),
                input = article.input_kind(),
                index = index,
            );
        }
    }

    html.push_str(
        r#"<form method="post" action="/articles/clear"><button type="submit">🧹 Clear All</button></form></div>"#,
    );
    html
}

fn render_process(session: &Session) -> String {
    let count = session.queue.len();
    let status = if session.in_flight {
        render_notice(
            NoticeLevel::Info,
            "🔄 Processing articles... This may take a few minutes...",
        )
    } else if count > 0 {
        render_notice(
            NoticeLevel::Info,
            &format!("Ready to process {} article(s)", count),
        )
    } else {
        r#"<div class="notice warning">⚠️ Add articles to get started</div>"#.to_string()
    };
    format!(
        r#"<div class="panel">
<form method="post" action="/process" onsubmit="document.getElementById('spinner').hidden = false;">
<button type="submit" class="primary"{disabled}>🚀 Process Articles</button>
<span id="spinner" hidden>🔄 Processing articles... This may take a few minutes...</span>
</form>
{status}
</div>"#,
        disabled = if count == 0 || session.in_flight { " disabled" } else { "" },
        status = status,
    )
}

fn render_error(error: &SubmitError) -> String {
    let mut html = render_notice(NoticeLevel::Error, &error.message);
    if let Some(body) = &error.body {
        let _ = write!(
            html,
            r#"<details><summary>See error details</summary><pre><code>{}</code></pre></details>"#,
            escape_html(body)
        );
    }
    html
}

fn render_results(view: &ResultView) -> String {
    let mut html = String::from(r#"<hr><section class="panel"><h2>✨ Results</h2>"#);
    html.push_str(&render_notice(NoticeLevel::Success, "Study Material Created!"));

    match &view.document_link {
        Some(link) => {
            let _ = write!(
                html,
                r#"<h3><a href="{}" target="_blank" rel="noopener">🔗 Open Google Doc</a></h3>"#,
                escape_html(link)
            );
        }
        None => html.push_str(&render_notice(NoticeLevel::Error, MISSING_LINK)),
    }

    let _ = write!(
        html,
        r#"<div class="metrics"><div class="metric">Articles Processed<strong>{}</strong></div><div class="metric">Document ID<strong>{}</strong></div></div>
<p><small>Created at: {}</small></p><hr><h3>📥 Downloads</h3>"#,
        view.processed,
        escape_html(&view.document_id),
        escape_html(&view.timestamp),
    );

    for article in &view.articles {
        let links: String = article
            .downloads
            .iter()
            .map(|d| {
                format!(
                    r#"<a href="/downloads/{}/{}" download="{}">{}</a>"#,
                    article.index,
                    escape_html(&d.kind),
                    escape_html(&d.file_name),
                    escape_html(&d.label)
                )
            })
            .collect();
        let _ = write!(
            html,
            r#"<details{open}><summary>{tab}</summary>
<h3>{title}</h3><p><strong>Type:</strong> {exam}</p>
<div class="downloads">{links}</div>
<details><summary>👁️ Preview HTML</summary><iframe sandbox srcdoc="{preview}"></iframe></details>
</details>"#,
            open = if article.index == 0 { " open" } else { "" },
            tab = escape_html(&article.tab_label),
            title = escape_html(&article.title),
            exam = escape_html(&article.exam_type),
            links = links,
            preview = escape_html(&article.preview_html),
        );
    }

    html.push_str(
        r#"<hr><form method="post" action="/batch/new"><button type="submit" class="primary">🔄 Start New Batch</button></form></section>"#,
    );
    html
}
