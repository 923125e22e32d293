//! # annadata-portal — Portal Surroundings
//!
//! Everything around the match engine that the farmer-facing portal needs:
//!
//! - **View** (`view.rs`): hub-and-spoke navigation between portal sections
//!   with validated transitions.
//! - **Preference** (`preference.rs`): the persisted English/Hindi choice.
//! - **Alerts** (`alerts.rs`): weather and scheme alerts, SMS opt-in.
//! - **News** (`news.rs`): the rotating headline ticker.
//! - **Voice** (`voice.rs`): the optional speech capability contract.
//! - **Identity** (`identity.rs`): the external sign-in contract and the
//!   admin gate.
//!
//! ## Crate Policy
//!
//! - Speech and authentication are contracts only. No implementation of
//!   either lives in this crate.
//! - Persistence failures degrade to defaults and are logged.

pub mod alerts;
pub mod identity;
pub mod news;
pub mod preference;
pub mod view;
pub mod voice;

pub use alerts::{
    Alert, AlertFeed, AlertKind, Severity, SmsSubscription, Subscribed, SubscriptionRegistry,
    DEADLINE_WINDOW_DAYS,
};
pub use identity::{
    AdminGate, AdminGrant, AllowListAdminGate, AuthError, Credentials, IdentityProvider, Session,
};
pub use news::{NewsTicker, ROTATION_INTERVAL};
pub use preference::{
    FilePreferenceStore, LanguagePreference, MemoryPreferenceStore, PreferenceError,
    PreferenceStore, LANGUAGE_PREFERENCE_KEY,
};
pub use view::{Navigator, PortalView, ViewError};
pub use voice::{voice_search, VoiceAnnouncer, VoiceCapability};
