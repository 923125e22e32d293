//! # Application State
//!
//! Shared state for the Axum application, passed to route handlers via the
//! `State` extractor. Cloning is cheap: every field is an `Arc` or a handle
//! around one.
//!
//! Mutable state (news cursor, subscriptions) sits behind `parking_lot`
//! locks that are never held across an `.await`. Deadline alerts depend on
//! the current day and are derived from the [`Clock`] on every request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use annadata_catalog::{CatalogResult, SchemeCatalog};
use annadata_match::MatchEngine;
use annadata_portal::{AlertFeed, NewsTicker, SubscriptionRegistry, DEADLINE_WINDOW_DAYS};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

// -- Configuration ------------------------------------------------------------

/// Runtime configuration, read from the environment by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Catalog file to serve. `None` serves the builtin catalog.
    pub catalog_path: Option<PathBuf>,
    /// How often the news ticker advances.
    pub news_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            catalog_path: None,
            news_interval: annadata_portal::ROTATION_INTERVAL,
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `ANNADATA_CATALOG` and `ANNADATA_NEWS_INTERVAL_SECS`.
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let catalog_path = lookup("ANNADATA_CATALOG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let news_interval = lookup("ANNADATA_NEWS_INTERVAL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.news_interval);
        Self {
            port,
            catalog_path,
            news_interval,
        }
    }
}

// -- Clock --------------------------------------------------------------------

/// Source of the current time.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>);

impl Clock {
    /// Wall-clock UTC.
    pub fn system() -> Self {
        Self(Arc::new(Utc::now))
    }

    /// Always reports `at`.
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self(Arc::new(move || at))
    }

    pub fn from_fn(now: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self(Arc::new(now))
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.0)()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Clock").field(&self.now()).finish()
    }
}

// -- AppState -----------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: MatchEngine,
    /// Standing advisories. Deadline reminders are added per request.
    pub advisories: Arc<AlertFeed>,
    pub subscriptions: Arc<SubscriptionRegistry>,
    pub news: Arc<Mutex<NewsTicker>>,
    pub clock: Clock,
}

impl AppState {
    /// Build state around `catalog`. Advisories are stamped with the
    /// clock's current time.
    pub fn with_catalog(config: AppConfig, catalog: SchemeCatalog, clock: Clock) -> Self {
        Self {
            config,
            engine: MatchEngine::new(catalog),
            advisories: Arc::new(AlertFeed::builtin(clock.now())),
            subscriptions: Arc::new(SubscriptionRegistry::new()),
            news: Arc::new(Mutex::new(NewsTicker::builtin())),
            clock,
        }
    }

    /// The advisories plus reminders for catalog deadlines within
    /// [`DEADLINE_WINDOW_DAYS`] of the clock's current day.
    pub fn alert_feed(&self) -> AlertFeed {
        let today = self.clock.now().date_naive();
        AlertFeed::clone(&self.advisories).with_deadline_alerts(
            self.engine.catalog(),
            today,
            DEADLINE_WINDOW_DAYS,
        )
    }

    /// Load the configured catalog (or the builtin one) and build state.
    pub fn try_from_config(config: AppConfig) -> CatalogResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => SchemeCatalog::load(path)?,
            None => SchemeCatalog::builtin()?,
        };
        Ok(Self::with_catalog(config, catalog, Clock::system()))
    }

    /// Advance the news ticker every `config.news_interval` until the
    /// runtime shuts down.
    pub fn spawn_news_rotation(&self) -> tokio::task::JoinHandle<()> {
        let news = Arc::clone(&self.news);
        let period = self.config.news_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let index = news.lock().advance();
                tracing::trace!(index, "news ticker advanced");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.news_interval, Duration::from_secs(4));
    }

    #[test]
    fn config_reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("ANNADATA_CATALOG", "/srv/schemes.yaml"),
            ("ANNADATA_NEWS_INTERVAL_SECS", "10"),
        ]));
        assert_eq!(config.port, 9090);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/schemes.yaml")));
        assert_eq!(config.news_interval, Duration::from_secs(10));
    }

    #[test]
    fn config_ignores_garbage() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("ANNADATA_CATALOG", "  "),
            ("ANNADATA_NEWS_INTERVAL_SECS", "0"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_catalog_file_is_error() {
        let config = AppConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/schemes.yaml")),
            ..AppConfig::default()
        };
        assert!(AppState::try_from_config(config).is_err());
    }

    fn alert_ids(state: &AppState) -> Vec<String> {
        state
            .alert_feed()
            .for_region(Some("Maharashtra"))
            .into_iter()
            .map(|a| a.id.clone())
            .collect()
    }

    #[test]
    fn deadline_alerts_follow_the_clock() {
        let day = Arc::new(Mutex::new(Utc.with_ymd_and_hms(2025, 9, 20, 9, 0, 0).unwrap()));
        let clock = {
            let day = Arc::clone(&day);
            Clock::from_fn(move || *day.lock())
        };
        let state = AppState::with_catalog(
            AppConfig::default(),
            SchemeCatalog::builtin().unwrap(),
            clock,
        );

        // Ten days out: outside the window.
        assert!(!alert_ids(&state).contains(&"deadline-namo-shetkari".to_string()));

        *day.lock() = Utc.with_ymd_and_hms(2025, 9, 29, 9, 0, 0).unwrap();
        assert!(alert_ids(&state).contains(&"deadline-namo-shetkari".to_string()));

        // The day after the deadline.
        *day.lock() = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        assert!(!alert_ids(&state).contains(&"deadline-namo-shetkari".to_string()));
        assert_eq!(state.advisories.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn news_rotation_advances_on_interval() {
        let state = AppState::try_from_config(AppConfig::default()).unwrap();
        let handle = state.spawn_news_rotation();

        tokio::time::sleep(Duration::from_millis(4_100)).await;
        assert_eq!(state.news.lock().index(), 1);
        tokio::time::sleep(Duration::from_secs(8)).await;
        assert_eq!(state.news.lock().index(), 0);

        handle.abort();
    }
}
