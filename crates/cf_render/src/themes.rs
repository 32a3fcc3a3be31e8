use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CUSTOM_THEME: &str = "custom";

const CLASSIC_CSS: &str = r#"
body {
    font-family: 'Georgia', serif;
    line-height: 1.8;
    color: #333;
    max-width: 900px;
    margin: 0 auto;
    padding: 20px;
}
h1 {
    color: #2c3e50;
    border-bottom: 3px solid #3498db;
    padding-bottom: 10px;
    margin-top: 30px;
}
h3 {
    color: #34495e;
    margin-top: 25px;
    margin-bottom: 10px;
}
strong {
    color: #e74c3c;
    font-weight: 600;
}
ul {
    margin-left: 25px;
    margin-top: 10px;
}
li {
    margin-bottom: 8px;
}
"#;

const MODERN_CSS: &str = r#"
body {
    font-family: -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    line-height: 1.7;
    color: #1f2933;
    background: #f5f7fa;
    max-width: 860px;
    margin: 0 auto;
    padding: 32px 24px;
}
h1, h2, h3 {
    color: #102a43;
    line-height: 1.3;
}
h1 {
    font-size: 2rem;
    padding: 16px 20px;
    background: #ffffff;
    border-left: 6px solid #4c63b6;
    border-radius: 6px;
}
h3 {
    margin-top: 28px;
    color: #334e68;
}
p, ul, ol {
    background: #ffffff;
    padding: 12px 20px;
    border-radius: 6px;
}
strong {
    color: #4c63b6;
}
li {
    margin-bottom: 6px;
}
"#;

const PRINT_CSS: &str = r#"
body {
    font-family: 'Times New Roman', Times, serif;
    font-size: 12pt;
    line-height: 1.5;
    color: #000;
    max-width: 180mm;
    margin: 0 auto;
    padding: 10mm;
}
h1 {
    font-size: 18pt;
    border-bottom: 1px solid #000;
}
h3 {
    font-size: 13pt;
    page-break-after: avoid;
}
strong {
    font-weight: bold;
}
ul {
    margin-left: 18px;
}
@media print {
    body { padding: 0; }
    a { color: #000; text-decoration: none; }
}
"#;

/// Themes every installation offers, with their built-in CSS.
pub const THEME_TABLE: [(&str, &str); 3] = [
    ("classic", CLASSIC_CSS),
    ("modern", MODERN_CSS),
    ("print", PRINT_CSS),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum ThemeSource {
    File(PathBuf),
    Builtin,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub css: String,
    pub source: ThemeSource,
}

impl Theme {
    /// Title-cased name for button labels.
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSet {
    themes: Vec<Theme>,
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeSet {
    pub fn builtin() -> Self {
        Self {
            themes: THEME_TABLE
                .iter()
                .map(|(name, css)| Theme {
                    name: name.to_string(),
                    css: css.trim().to_string(),
                    source: ThemeSource::Builtin,
                })
                .collect(),
        }
    }

    /// Reads `<dir>/<name>.css` for every table entry, falling back to the
    /// built-in CSS when a file is missing, unreadable or empty.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let themes = THEME_TABLE
            .iter()
            .map(|(name, fallback)| {
                let path = dir.join(format!("{}.css", name));
                match fs::read_to_string(&path) {
                    Ok(css) if !css.trim().is_empty() => Theme {
                        name: name.to_string(),
                        css: css.trim().to_string(),
                        source: ThemeSource::File(path),
                    },
                    Ok(_) => {
                        warn!("🎨 Theme file {} is empty, using built-in {} theme", path.display(), name);
                        Self::fallback(name, fallback)
                    }
                    Err(e) => {
                        warn!("🎨 Could not read {} ({}), using built-in {} theme", path.display(), e, name);
                        Self::fallback(name, fallback)
                    }
                }
            })
            .collect::<Vec<_>>();

        let from_files = themes
            .iter()
            .filter(|t| matches!(t.source, ThemeSource::File(_)))
            .count();
        info!("🎨 Loaded {} theme(s), {} from {}", themes.len(), from_files, dir.display());
        Self { themes }
    }

    fn fallback(name: &str, css: &str) -> Theme {
        Theme {
            name: name.to_string(),
            css: css.trim().to_string(),
            source: ThemeSource::Builtin,
        }
    }

    /// This set plus the user's own CSS as the `custom` theme, if given.
    pub fn with_custom(&self, css: Option<&str>) -> Self {
        let mut themes = self.themes.clone();
        if let Some(css) = css.map(str::trim).filter(|c| !c.is_empty()) {
            themes.push(Theme {
                name: CUSTOM_THEME.to_string(),
                css: css.to_string(),
                source: ThemeSource::Custom,
            });
        }
        Self { themes }
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
