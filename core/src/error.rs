use std::error::Error;
use std::fmt::{Display, Formatter};

/// Client-side errors raised at the creation and query boundaries.
///
/// The `Display` text is what callers hand back to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    /// `title` or `content` was absent or empty.
    MissingField(&'static str),
    /// A search named neither a keyword nor a tag.
    MissingCriteria,
}

impl Display for ArticleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "Title and content are required."),
            Self::MissingCriteria => write!(f, "Keyword or tag is required."),
        }
    }
}

impl Error for ArticleError {}
