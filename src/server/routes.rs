//! HTTP route handlers for the publication API.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::content::{Article, ContentError, IssueArticles};
use crate::images;
use crate::ranking;

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/current_issue_number", get(current_issue_number))
        .route("/api/current_issue", get(current_issue))
        .route("/api/current_connections", get(current_connections))
        .route("/api/current_crossword", get(current_crossword))
        .route("/api/feed", get(feed))
        .route("/api/feed/{section}", get(section_feed))
        .route("/api/search/{terms}", get(search))
        .route("/api/images/{name}", get(resized_image))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "masthead",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Map a content-layer result onto an HTTP error pair.
fn reply<T>(result: Result<T, ContentError>) -> Result<T, (StatusCode, String)> {
    result.map_err(|e| {
        let status = if e.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, e.to_string())
    })
}

/// Serve the current issue number.
async fn current_issue_number(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "currentIssueNumber": state.store.current_issue()
    }))
}

/// Serve the current issue's articles, keyed by section.
async fn current_issue(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IssueArticles>, (StatusCode, String)> {
    Ok(Json(reply(state.store.current_articles())?))
}

/// Serve the current issue's connections puzzle.
async fn current_connections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    Ok(Json(reply(state.store.current_connections())?))
}

/// Serve the current issue's crossword.
async fn current_crossword(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    Ok(Json(reply(state.store.current_crossword())?))
}

/// Serve the recency-weighted feed over the whole archive.
async fn feed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Article>>, (StatusCode, String)> {
    ranked_feed(&state, None)
}

/// Serve the recency-weighted feed for one section.
async fn section_feed(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Result<Json<Vec<Article>>, (StatusCode, String)> {
    ranked_feed(&state, Some(&section))
}

/// Rank the requested collection and truncate to the configured prefix.
fn ranked_feed(
    state: &AppState,
    section: Option<&str>,
) -> Result<Json<Vec<Article>>, (StatusCode, String)> {
    let items = reply(state.store.feed_items(section))?;
    let mut ordered = ranking::rank(&items);
    ordered.truncate(state.store.config().feed_limit);
    Ok(Json(ordered.into_iter().map(|item| item.article).collect()))
}

/// Serve articles matching the search terms.
async fn search(
    State(state): State<Arc<AppState>>,
    Path(terms): Path<String>,
) -> Result<Json<Vec<Article>>, (StatusCode, String)> {
    Ok(Json(reply(state.store.search(&terms))?))
}

/// Width query for the image endpoint.
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    /// Requested output width in pixels.
    pub width: Option<String>,
}

/// Serve an image resized to the requested width.
async fn resized_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<ImageQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let config = state.store.config();
    let width = query
        .width
        .as_deref()
        .and_then(|w| w.parse::<u32>().ok())
        .unwrap_or(config.default_image_width)
        .clamp(1, config.max_image_width);

    let path = reply(state.store.image_path(&name))?;
    let bytes = std::fs::read(&path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("image read error: {e}")))?;
    let resized = reply(images::resize_to_width(&bytes, width))?;

    Ok((
        [(header::CONTENT_TYPE, images::content_type_for(&name))],
        resized,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::ContentConfig;
    use std::fs;
    use tempfile::TempDir;

    fn state_over(dir: &TempDir) -> Arc<AppState> {
        AppState::with_config(ContentConfig::new().with_data_dir(dir.path()))
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("current_issue_number.txt"), "1").unwrap();
        let issue = dir.path().join("issue1");
        fs::create_dir(&issue).unwrap();
        fs::write(
            issue.join("articles.json"),
            serde_json::json!({
                "news": [
                    {
                        "title": { "text": "Bridge Reopens" },
                        "author": "A. Osei",
                        "date": "2024-02-01"
                    },
                    {
                        "title": { "text": "Town Hall Vote" },
                        "author": "B. Ruiz",
                        "date": "2024-01-01"
                    }
                ]
            })
            .to_string(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_reply_maps_not_found_to_404() {
        let err: Result<(), ContentError> = Err(ContentError::NotFound("x".into()));
        let (status, _) = reply(err).unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let err: Result<(), ContentError> =
            Err(ContentError::InvalidIssuePointer("abc".into()));
        let (status, _) = reply(err).unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ranked_feed_is_a_truncated_permutation() {
        let dir = fixture();
        let state = state_over(&dir);

        let Json(articles) = ranked_feed(&state, None).unwrap();
        assert_eq!(articles.len(), 2);

        let mut titles: Vec<&str> =
            articles.iter().map(|a| a.title.text.as_str()).collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["Bridge Reopens", "Town Hall Vote"]);
    }

    #[test]
    fn test_ranked_feed_respects_feed_limit() {
        let dir = fixture();
        let state = AppState::with_config(
            ContentConfig::new()
                .with_data_dir(dir.path())
                .with_feed_limit(1),
        );

        let Json(articles) = ranked_feed(&state, None).unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_ranked_feed_unknown_section_is_404() {
        let dir = fixture();
        let state = state_over(&dir);
        let (status, _) = ranked_feed(&state, Some("opinion")).unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
