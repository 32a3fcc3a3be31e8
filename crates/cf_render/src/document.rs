use scraper::Html;

/// Escapes text for use inside HTML elements and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps returned article HTML in a standalone document styled with `css`.
/// The article HTML is embedded as-is.
pub fn styled_document(title: &str, html: &str, css: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
</body>
</html>
"#,
        title = escape_html(title),
        css = css,
        html = html,
    )
}

/// Parses an HTML fragment and serializes it back, closing any tags the
/// workflow left open.
pub fn normalize_fragment(html: &str) -> String {
    Html::parse_fragment(html).root_element().inner_html()
}
