//! # Alerts and SMS Subscriptions
//!
//! The alert feed combines a fixed set of advisories (weather, scheme
//! reminders) with reminders derived from catalog deadlines. Farmers can
//! opt in to SMS delivery with a mobile number.
//!
//! ## Ordering
//!
//! A feed view is filtered by region scope and sorted by severity (high
//! first), then by issue time (newest first), then by id.

use std::collections::BTreeMap;

use annadata_catalog::SchemeCatalog;
use annadata_core::{Locale, LocalizedText, PhoneNumber, RegionScope, SchemeRecord};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// How far ahead catalog deadlines produce reminders, in days.
pub const DEADLINE_WINDOW_DAYS: i64 = 7;

// ─── Alerts ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Weather,
    Scheme,
}

/// Alert urgency. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub message: LocalizedText,
    pub region: RegionScope,
    pub severity: Severity,
    pub issued_at: DateTime<Utc>,
}

/// A reminder for `record` if its deadline is between `today` and
/// `window_days` ahead, inclusive.
pub fn deadline_alert(record: &SchemeRecord, today: NaiveDate, window_days: i64) -> Option<Alert> {
    let days = record.days_until_deadline(today)?;
    if !(0..=window_days).contains(&days) {
        return None;
    }
    let (en, hi) = match days {
        0 => ("last date today".to_string(), "आज अंतिम तिथि".to_string()),
        1 => ("last date tomorrow".to_string(), "कल अंतिम तिथि".to_string()),
        n => (format!("last date in {n} days"), format!("{n} दिनों में अंतिम तिथि")),
    };
    Some(Alert {
        id: format!("deadline-{}", record.id),
        kind: AlertKind::Scheme,
        message: LocalizedText::new(
            format!("{} {en}", record.name.get(Locale::En)),
            format!("{} की {hi}", record.name.get(Locale::Hi)),
        ),
        region: record.region.clone(),
        severity: if days <= 1 {
            Severity::High
        } else {
            Severity::Medium
        },
        issued_at: Utc.from_utc_datetime(&today.and_time(NaiveTime::MIN)),
    })
}

/// An in-memory set of alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertFeed {
    alerts: Vec<Alert>,
}

impl AlertFeed {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    /// The standing advisories, stamped relative to `now`.
    pub fn builtin(now: DateTime<Utc>) -> Self {
        Self::new(vec![
            Alert {
                id: "weather-heavy-rain".to_string(),
                kind: AlertKind::Weather,
                message: LocalizedText::new(
                    "Heavy rainfall expected in next 3 days",
                    "अगले 3 दिनों में भारी बारिश की संभावना",
                ),
                region: RegionScope::All,
                severity: Severity::High,
                issued_at: now,
            },
            Alert {
                id: "scheme-pm-kisan-deadline".to_string(),
                kind: AlertKind::Scheme,
                message: LocalizedText::new(
                    "PM-KISAN scheme last date tomorrow",
                    "पीएम-किसान योजना का अंतिम दिन कल",
                ),
                region: RegionScope::All,
                severity: Severity::Medium,
                issued_at: now - Duration::hours(2),
            },
        ])
    }

    /// Add reminders for catalog deadlines within `window_days` of `today`.
    pub fn with_deadline_alerts(
        mut self,
        catalog: &SchemeCatalog,
        today: NaiveDate,
        window_days: i64,
    ) -> Self {
        let before = self.alerts.len();
        self.alerts.extend(
            catalog
                .iter()
                .filter_map(|record| deadline_alert(record, today, window_days)),
        );
        tracing::debug!(
            added = self.alerts.len() - before,
            window_days,
            "derived deadline alerts"
        );
        self
    }

    /// Alerts relevant to `region` (all alerts when unset), in feed order.
    pub fn for_region(&self, region: Option<&str>) -> Vec<&Alert> {
        let mut alerts: Vec<&Alert> = self
            .alerts
            .iter()
            .filter(|a| region.map_or(true, |r| a.region.covers(r)))
            .collect();
        alerts.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.issued_at.cmp(&a.issued_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        alerts
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

// ─── SMS Subscriptions ───────────────────────────────────────────────

/// An SMS alert opt-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsSubscription {
    pub phone: PhoneNumber,
    /// Region of interest; `None` receives every alert.
    pub region: Option<String>,
    pub locale: Locale,
    pub subscribed_at: DateTime<Utc>,
}

impl SmsSubscription {
    /// Whether `alert` should be delivered to this subscriber.
    pub fn wants(&self, alert: &Alert) -> bool {
        self.region.as_deref().map_or(true, |r| alert.region.covers(r))
    }
}

/// Outcome of a subscribe call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subscribed {
    /// A new subscription was recorded.
    Created(SmsSubscription),
    /// The number was already subscribed; the stored record is unchanged.
    Existing(SmsSubscription),
}

impl Subscribed {
    pub fn subscription(&self) -> &SmsSubscription {
        match self {
            Self::Created(s) | Self::Existing(s) => s,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Thread-safe registry of SMS subscriptions, keyed by phone number.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    subscriptions: RwLock<BTreeMap<PhoneNumber, SmsSubscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `phone`. Idempotent: a repeat call returns the existing
    /// subscription untouched.
    pub fn subscribe(
        &self,
        phone: PhoneNumber,
        region: Option<String>,
        locale: Locale,
        now: DateTime<Utc>,
    ) -> Subscribed {
        let mut subscriptions = self.subscriptions.write();
        if let Some(existing) = subscriptions.get(&phone) {
            return Subscribed::Existing(existing.clone());
        }
        let subscription = SmsSubscription {
            phone: phone.clone(),
            region: region
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            locale,
            subscribed_at: now,
        };
        subscriptions.insert(phone, subscription.clone());
        tracing::info!(
            subscribers = subscriptions.len(),
            "sms alert subscription created"
        );
        Subscribed::Created(subscription)
    }

    /// Remove a subscription. Returns whether one existed.
    pub fn unsubscribe(&self, phone: &PhoneNumber) -> bool {
        self.subscriptions.write().remove(phone).is_some()
    }

    pub fn get(&self, phone: &PhoneNumber) -> Option<SmsSubscription> {
        self.subscriptions.read().get(phone).cloned()
    }

    /// Subscribers who should receive `alert`.
    pub fn recipients(&self, alert: &Alert) -> Vec<SmsSubscription> {
        self.subscriptions
            .read()
            .values()
            .filter(|s| s.wants(alert))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.read().is_empty()
    }
}
