use crate::error::ArticleError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub type ArticleId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated, not yet stored article. Only constructible through [`NewArticle::new`],
/// so the store never sees an empty title or content.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) tags: Vec<String>,
}

impl NewArticle {
    pub fn new(title: Option<String>, content: Option<String>, tags: Option<Vec<String>>) -> Result<Self, ArticleError> {
        let title = title.filter(|t| !t.is_empty()).ok_or(ArticleError::MissingField("title"))?;
        let content = content.filter(|c| !c.is_empty()).ok_or(ArticleError::MissingField("content"))?;
        Ok(Self { title, content, tags: tags.unwrap_or_default() })
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn content(&self) -> &str { &self.content }
    pub fn tags(&self) -> &[String] { &self.tags }
}

/// Current UTC time at millisecond precision, the resolution timestamps are persisted with.
pub(crate) fn now_millis() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}
