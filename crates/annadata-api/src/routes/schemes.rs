//! # Scheme Discovery API
//!
//! Browse and search the scheme catalog, fetch a single scheme, and list
//! the filter options the catalog offers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use annadata_core::{Locale, SchemeCategory, SchemeId, SchemeRecord};
use annadata_match::{availability_message, parse_locale, MatchMode, MatchResult, QueryForm};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

// -- DTOs ---------------------------------------------------------------------

/// `?lang=` on endpoints that take nothing else.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn locale(&self) -> Locale {
        parse_locale(self.lang.as_deref())
    }
}

/// A scheme rendered in one locale.
#[derive(Debug, Serialize)]
pub struct SchemeView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub benefits: String,
    pub region: String,
    pub crops: Vec<String>,
    pub category: SchemeCategory,
    pub category_label: &'static str,
    pub eligibility: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl SchemeView {
    /// Render `record` in `locale`. Eligibility tags are listed as written.
    pub fn render(record: &SchemeRecord, locale: Locale) -> Self {
        let crops = if record.crops.is_all() {
            vec![annadata_core::ALL_SENTINEL.to_string()]
        } else {
            record.crops.listed().to_vec()
        };
        Self {
            id: record.id.to_string(),
            name: record.name.get(locale).to_string(),
            description: record.description.get(locale).to_string(),
            benefits: record.benefits.get(locale).to_string(),
            region: record.region.to_string(),
            crops,
            category: record.category,
            category_label: record.category.label(locale),
            eligibility: record
                .eligibility_tags
                .iter()
                .map(|t| t.text.clone())
                .collect(),
            deadline: record.deadline,
        }
    }
}

/// The outcome of a discovery or eligibility evaluation.
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub mode: MatchMode,
    pub locale: Locale,
    pub count: usize,
    /// The sentence a voice client would read out.
    pub announcement: String,
    pub schemes: Vec<SchemeView>,
}

impl MatchResponse {
    pub fn from_result(result: &MatchResult<'_>) -> Self {
        let locale = result.locale();
        Self {
            mode: result.mode(),
            locale,
            count: result.len(),
            announcement: availability_message(result.len(), locale),
            schemes: result
                .iter()
                .map(|r| SchemeView::render(r, locale))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub value: SchemeCategory,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub regions: Vec<String>,
    pub crops: Vec<String>,
    pub categories: Vec<CategoryOption>,
}

// -- Router -------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/schemes", get(list_schemes))
        .route("/v1/schemes/{id}", get(get_scheme))
        .route("/v1/facets", get(facets))
}

/// GET /v1/schemes — Discovery search.
async fn list_schemes(
    State(state): State<AppState>,
    query: Result<Query<QueryForm>, QueryRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let form = extract_query(query)?;
    let locale = form.locale();
    let profile = form.to_profile(MatchMode::Discovery);
    let result = state.engine.discover(&profile, &locale);
    Ok(Json(MatchResponse::from_result(&result)))
}

/// GET /v1/schemes/{id} — One scheme.
async fn get_scheme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> Result<Json<SchemeView>, AppError> {
    let locale = extract_query(query)?.locale();
    let id = SchemeId::new(id)?;
    let record = state
        .engine
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("scheme {id}")))?;
    Ok(Json(SchemeView::render(record, locale)))
}

/// GET /v1/facets — Filter options.
async fn facets(
    State(state): State<AppState>,
    query: Result<Query<LangQuery>, QueryRejection>,
) -> Result<Json<FacetsResponse>, AppError> {
    let locale = extract_query(query)?.locale();
    let facets = state.engine.catalog().facets();
    Ok(Json(FacetsResponse {
        regions: facets.regions,
        crops: facets.crops,
        categories: facets
            .categories
            .into_iter()
            .map(|value| CategoryOption {
                value,
                label: value.label(locale),
            })
            .collect(),
    }))
}
