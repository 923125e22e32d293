//! # Alerts API
//!
//! The alert feed for a region and the SMS opt-in endpoint.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use annadata_core::{Locale, PhoneNumber};
use annadata_match::parse_locale;
use annadata_portal::{Alert, AlertKind, Severity, SmsSubscription};

use crate::error::AppError;
use crate::extractors::{extract_query, extract_validated_json, Validate};
use crate::state::AppState;

// -- DTOs ---------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AlertView {
    pub id: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
    pub region: String,
    pub issued_at: DateTime<Utc>,
}

impl AlertView {
    fn render(alert: &Alert, locale: Locale) -> Self {
        Self {
            id: alert.id.clone(),
            kind: alert.kind,
            severity: alert.severity,
            message: alert.message.get(locale).to_string(),
            region: alert.region.to_string(),
            issued_at: alert.issued_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub locale: Locale,
    pub count: usize,
    pub alerts: Vec<AlertView>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub phone: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

impl Validate for SubscribeRequest {
    fn validate(&self) -> Result<(), String> {
        PhoneNumber::new(self.phone.as_str())
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    /// Last four digits only.
    pub phone: String,
    pub region: Option<String>,
    pub locale: Locale,
    pub subscribed_at: DateTime<Utc>,
    pub created: bool,
}

impl SubscriptionView {
    fn render(subscription: &SmsSubscription, created: bool) -> Self {
        let digits = subscription.phone.as_str();
        let visible = &digits[digits.len().saturating_sub(4)..];
        Self {
            phone: format!("******{visible}"),
            region: subscription.region.clone(),
            locale: subscription.locale,
            subscribed_at: subscription.subscribed_at,
            created,
        }
    }
}

// -- Router -------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/alerts", get(list_alerts))
        .route("/v1/alerts/subscriptions", post(subscribe))
}

/// GET /v1/alerts — Alerts for a region, most urgent first.
async fn list_alerts(
    State(state): State<AppState>,
    query: Result<Query<AlertsQuery>, QueryRejection>,
) -> Result<Json<AlertsResponse>, AppError> {
    let query = extract_query(query)?;
    let locale = parse_locale(query.lang.as_deref());
    let region = query.region.as_deref().map(str::trim).filter(|r| !r.is_empty());
    let feed = state.alert_feed();
    let alerts: Vec<AlertView> = feed
        .for_region(region)
        .into_iter()
        .map(|a| AlertView::render(a, locale))
        .collect();
    Ok(Json(AlertsResponse {
        locale,
        count: alerts.len(),
        alerts,
    }))
}

/// POST /v1/alerts/subscriptions — SMS opt-in. 201 when new, 200 when the
/// number was already subscribed.
async fn subscribe(
    State(state): State<AppState>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscriptionView>), AppError> {
    let req = extract_validated_json(body)?;
    let phone = PhoneNumber::new(req.phone)?;
    let locale = parse_locale(req.lang.as_deref());
    let outcome = state
        .subscriptions
        .subscribe(phone, req.region, locale, Utc::now());
    let status = if outcome.is_new() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(SubscriptionView::render(
            outcome.subscription(),
            outcome.is_new(),
        )),
    ))
}
