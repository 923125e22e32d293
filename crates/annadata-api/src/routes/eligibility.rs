//! # Eligibility Check API
//!
//! The self-check form: region, crop and landholding. Income is accepted
//! but does not constrain the result.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use annadata_match::{MatchMode, QueryForm};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::routes::schemes::MatchResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/eligibility", post(check_eligibility))
}

/// POST /v1/eligibility — Schemes the farmer may be eligible for.
async fn check_eligibility(
    State(state): State<AppState>,
    body: Result<Json<QueryForm>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let form = extract_json(body)?;
    let locale = form.locale();
    let profile = form.to_profile(MatchMode::Eligibility);
    let result = state.engine.check_eligibility(&profile, &locale);
    tracing::debug!(
        region = profile.region().unwrap_or("-"),
        landholding_ha = profile.landholding_ha(),
        matched = result.len(),
        "eligibility check"
    );
    Ok(Json(MatchResponse::from_result(&result)))
}
