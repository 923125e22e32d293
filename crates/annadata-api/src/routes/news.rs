//! # News Ticker API

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use annadata_core::Locale;

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::routes::schemes::LangQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub locale: Locale,
    /// `None` when no headlines are configured.
    pub headline: Option<String>,
    pub index: usize,
    pub total: usize,
    pub rotation_secs: u64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/news", get(current_headline))
}

/// GET /v1/news — The headline currently on the ticker.
async fn current_headline(
    State(state): State<AppState>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> Result<Json<NewsResponse>, AppError> {
    let locale = extract_query(query)?.locale();
    let response = {
        let ticker = state.news.lock();
        NewsResponse {
            locale,
            headline: ticker.current(locale).map(str::to_string),
            index: ticker.index(),
            total: ticker.len(),
            rotation_secs: state.config.news_interval.as_secs(),
        }
    };
    Ok(Json(response))
}
