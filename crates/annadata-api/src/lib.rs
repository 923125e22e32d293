//! # annadata-api — HTTP Service for the Scheme Portal
//!
//! ## API Surface
//!
//! | Route                            | Module                   | Purpose               |
//! |----------------------------------|--------------------------|-----------------------|
//! | `GET /v1/schemes`                | [`routes::schemes`]      | Discovery search      |
//! | `GET /v1/schemes/{id}`           | [`routes::schemes`]      | One scheme            |
//! | `GET /v1/facets`                 | [`routes::schemes`]      | Filter options        |
//! | `POST /v1/eligibility`           | [`routes::eligibility`]  | Eligibility check     |
//! | `GET /v1/alerts`                 | [`routes::alerts`]       | Alert feed            |
//! | `POST /v1/alerts/subscriptions`  | [`routes::alerts`]       | SMS opt-in            |
//! | `GET /v1/news`                   | [`routes::news`]         | Current headline      |
//!
//! Every endpoint accepts `lang=en|hi`; text comes back in that locale.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::{ApiMetrics, MetricsSnapshot};
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::schemes::router())
        .merge(routes::eligibility::router())
        .merge(routes::alerts::router())
        .merge(routes::news::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(metrics.clone()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/health/metrics", get(metrics_snapshot))
        .layer(Extension(metrics));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the catalog is loaded before the router exists.
async fn readiness() -> &'static str {
    "ready"
}

async fn metrics_snapshot(Extension(metrics): Extension<ApiMetrics>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}
