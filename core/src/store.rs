use crate::article::{now_millis, Article, ArticleId, NewArticle};
use crate::persist::{load_articles, save_articles, set_aside};
use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use std::path::Path;

#[derive(Debug)]
struct StoreState {
    articles: Vec<Article>,
    next_id: ArticleId,
}

impl Default for StoreState {
    fn default() -> Self {
        Self { articles: Vec::new(), next_id: 1 }
    }
}

/// Append-only in-memory article collection and its id sequence.
///
/// Every method takes the lock for its own duration only; callers that need
/// to filter or sort work on a [`ArticleStore::snapshot`].
#[derive(Debug, Default)]
pub struct ArticleStore {
    state: RwLock<StoreState>,
}

impl ArticleStore {
    pub fn new() -> Self { Self::default() }

    /// Load the collection persisted at `path`. A missing, unreadable or
    /// malformed file yields an empty store rather than an error; a file that
    /// exists but cannot be loaded is renamed aside so a later flush cannot
    /// overwrite it.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let store = Self::new();
        let loaded = load_articles(path).and_then(|articles| {
            let count = articles.len();
            store.replace_all(articles)?;
            Ok(count)
        });
        match loaded {
            Ok(count) => tracing::info!(path = %path.display(), count, "loaded articles"),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "failed to load articles; starting empty");
                if path.exists() {
                    match set_aside(path) {
                        Ok(aside) => tracing::warn!(path = %path.display(), moved_to = %aside.display(), "unloadable article file moved aside"),
                        Err(e) => tracing::error!(path = %path.display(), "failed to move unloadable article file aside: {:#}", e),
                    }
                }
            }
        }
        store
    }

    pub fn insert(&self, new: NewArticle) -> Article {
        let mut state = self.state.write();
        let article = Article {
            id: state.next_id,
            title: new.title,
            content: new.content,
            tags: new.tags,
            created_at: now_millis(),
        };
        state.next_id += 1;
        state.articles.push(article.clone());
        tracing::debug!(id = article.id, "article inserted");
        article
    }

    pub fn get(&self, id: ArticleId) -> Option<Article> {
        self.state.read().articles.iter().find(|a| a.id == id).cloned()
    }

    /// Copy of all articles in insertion order.
    pub fn snapshot(&self) -> Vec<Article> {
        self.state.read().articles.clone()
    }

    /// Swap in a whole collection; the id sequence resumes after its largest id.
    /// Fails, leaving the store untouched, when that id leaves no room for new ones.
    pub fn replace_all(&self, articles: Vec<Article>) -> Result<()> {
        let next_id = match articles.iter().map(|a| a.id).max() {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .filter(|next| *next < ArticleId::MAX)
                .ok_or_else(|| anyhow!("article id {max} exhausts the id sequence"))?,
        };
        let mut state = self.state.write();
        state.articles = articles;
        state.next_id = next_id;
        Ok(())
    }

    /// Write the current collection to `path`.
    pub fn flush<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let articles = self.snapshot();
        save_articles(path.as_ref(), &articles)?;
        tracing::info!(path = %path.as_ref().display(), count = articles.len(), "articles flushed");
        Ok(())
    }

    pub fn len(&self) -> usize { self.state.read().articles.len() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
    pub fn next_id(&self) -> ArticleId { self.state.read().next_id }
}
