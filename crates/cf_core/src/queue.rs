use serde::{Deserialize, Serialize};
use crate::types::QueuedArticle;
use crate::{Error, Result};

const LABEL_TITLE_CHARS: usize = 30;

/// Articles waiting to be submitted, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleQueue {
    articles: Vec<QueuedArticle>,
}

impl ArticleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, article: QueuedArticle) {
        self.articles.push(article);
    }

    /// Removes the article at `index`; later articles shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<QueuedArticle> {
        if index >= self.articles.len() {
            return Err(Error::NotFound(format!(
                "queue position {} (queue has {} articles)",
                index + 1,
                self.articles.len()
            )));
        }
        Ok(self.articles.remove(index))
    }

    pub fn clear(&mut self) {
        self.articles.clear();
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedArticle> {
        self.articles.iter()
    }

    pub fn to_vec(&self) -> Vec<QueuedArticle> {
        self.articles.clone()
    }

    /// One-indexed heading shown for each queued article, e.g. `2. Union Budget...`.
    pub fn display_label(&self, index: usize) -> Option<String> {
        self.articles.get(index).map(|article| {
            let title: String = article.title.chars().take(LABEL_TITLE_CHARS).collect();
            format!("{}. {}...", index + 1, title)
        })
    }
}

impl FromIterator<QueuedArticle> for ArticleQueue {
    fn from_iter<I: IntoIterator<Item = QueuedArticle>>(iter: I) -> Self {
        Self {
            articles: iter.into_iter().collect(),
        }
    }
}
