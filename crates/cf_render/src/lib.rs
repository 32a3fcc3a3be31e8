pub mod document;
pub mod downloads;
pub mod themes;
pub mod view;

pub use document::{escape_html, normalize_fragment, styled_document};
pub use downloads::{Download, DownloadKind};
pub use themes::{Theme, ThemeSet, ThemeSource};
pub use view::{ArticleView, DownloadLink, ResultView};

