pub mod article;
pub mod error;
pub mod persist;
pub mod search;
pub mod store;

pub use article::{Article, ArticleId, NewArticle};
pub use error::ArticleError;
pub use search::{search, SearchQuery, SortMode};
pub use store::ArticleStore;
