//! Keyword/tag filtering and result ordering over a store snapshot.
//!
//! Keyword filtering is a case-sensitive substring test, while the relevance
//! score counts case-insensitive occurrences. Both sorts are stable, so ties
//! keep insertion order.

use crate::article::Article;
use crate::error::ArticleError;
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Filtered (insertion) order.
    #[default]
    Insertion,
    Relevance,
    /// Most recent `created_at` first.
    Date,
}

impl SortMode {
    /// Map a raw `sortBy` value. Unknown values fall back to insertion order.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("relevance") => Self::Relevance,
            Some("date") => Self::Date,
            _ => Self::Insertion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: Option<String>,
    tag: Option<String>,
    sort: SortMode,
}

impl SearchQuery {
    /// Empty strings count as absent. At least one of `keyword` or `tag` is required.
    pub fn new(keyword: Option<String>, tag: Option<String>, sort: SortMode) -> Result<Self, ArticleError> {
        let keyword = keyword.filter(|k| !k.is_empty());
        let tag = tag.filter(|t| !t.is_empty());
        if keyword.is_none() && tag.is_none() {
            return Err(ArticleError::MissingCriteria);
        }
        Ok(Self { keyword, tag, sort })
    }

    pub fn keyword(&self) -> Option<&str> { self.keyword.as_deref() }
    pub fn tag(&self) -> Option<&str> { self.tag.as_deref() }
    pub fn sort(&self) -> SortMode { self.sort }

    fn matches(&self, article: &Article) -> bool {
        let keyword_match = self
            .keyword
            .as_deref()
            .map_or(true, |k| article.title.contains(k) || article.content.contains(k));
        let tag_match = self.tag.as_deref().map_or(true, |t| article.tags.iter().any(|x| x == t));
        keyword_match && tag_match
    }
}

/// Filter `articles` by `query` and order the hits per its sort mode.
pub fn search(articles: &[Article], query: &SearchQuery) -> Vec<Article> {
    let mut hits: Vec<Article> = articles.iter().filter(|a| query.matches(a)).cloned().collect();
    match (query.sort, query.keyword()) {
        (SortMode::Relevance, Some(keyword)) => {
            if let Some(pattern) = keyword_pattern(keyword) {
                let mut scored: Vec<(usize, Article)> = hits.into_iter().map(|a| (score_with(&pattern, &a), a)).collect();
                scored.sort_by(|a, b| b.0.cmp(&a.0));
                hits = scored.into_iter().map(|(_, a)| a).collect();
            }
        }
        (SortMode::Date, _) => hits.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        // relevance without a keyword keeps filtered order
        _ => {}
    }
    tracing::debug!(keyword = ?query.keyword(), tag = ?query.tag(), sort = ?query.sort, hits = hits.len(), "search");
    hits
}

/// Case-insensitive count of non-overlapping literal occurrences of `word` in `text`.
pub fn frequency(text: &str, word: &str) -> usize {
    keyword_pattern(word).map_or(0, |re| re.find_iter(text).count())
}

/// `2 * frequency(title) + frequency(content)`.
pub fn relevance_score(article: &Article, keyword: &str) -> usize {
    keyword_pattern(keyword).map_or(0, |re| score_with(&re, article))
}

fn score_with(pattern: &Regex, article: &Article) -> usize {
    2 * pattern.find_iter(&article.title).count() + pattern.find_iter(&article.content).count()
}

fn keyword_pattern(word: &str) -> Option<Regex> {
    if word.is_empty() { return None; }
    match RegexBuilder::new(&regex::escape(word)).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(error = %err, "keyword pattern rejected; skipping relevance scoring");
            None
        }
    }
}
