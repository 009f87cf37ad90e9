use articles_core::{search, Article, ArticleError, ArticleStore, NewArticle, SearchQuery, SortMode};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;

pub use error::ApiError;

pub const NOT_FOUND_MESSAGE: &str = "Article not found.";
pub const CREATED_MESSAGE: &str = "Article added successfully.";

#[derive(Deserialize)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct CreateArticleResponse {
    pub message: String,
    pub article: Article,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArticleStore>,
}

pub fn build_app(store: Arc<ArticleStore>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/articles", post(create_handler))
        .route("/articles/search", get(search_handler))
        .route("/articles/:id", get(article_handler))
        .with_state(AppState { store })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateArticleResponse>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected article body");
        ApiError::from(ArticleError::MissingField("body"))
    })?;
    let new = NewArticle::new(req.title, req.content, req.tags)?;
    let article = state.store.insert(new);
    tracing::info!(id = article.id, "article created");
    Ok((StatusCode::CREATED, Json(CreateArticleResponse { message: CREATED_MESSAGE.into(), article })))
}

pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let sort = SortMode::from_param(params.sort_by.as_deref());
    let query = SearchQuery::new(params.keyword, params.tag, sort)?;
    // search runs on a copy, outside the store lock
    let snapshot = state.store.snapshot();
    Ok(Json(search(&snapshot, &query)))
}

/// The id must parse as a whole integer; `1abc` or ` 1` are not found rather than id 1.
pub async fn article_handler(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<Article>, ApiError> {
    raw_id
        .parse::<u64>()
        .ok()
        .and_then(|id| state.store.get(id))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_MESSAGE.into()))
}
