//! # Result Announcement
//!
//! After an evaluation the caller may read the outcome aloud. The engine
//! only composes the sentences; delivery goes through an [`AnnounceSink`],
//! which is fire-and-forget. A missing sink (`None`) is a silent no-op.

use annadata_core::{Locale, SchemeRecord};

use crate::engine::MatchResult;

/// Receives locale-tagged text for delivery (speech, log, test capture).
pub trait AnnounceSink {
    fn announce(&self, text: &str, locale: Locale);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl AnnounceSink for SilentSink {
    fn announce(&self, _text: &str, _locale: Locale) {}
}

/// Emits each announcement as an `info` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnnounceSink for TracingSink {
    fn announce(&self, text: &str, locale: Locale) {
        tracing::info!(locale = %locale, text, "announce");
    }
}

impl<S: AnnounceSink> AnnounceSink for Option<S> {
    fn announce(&self, text: &str, locale: Locale) {
        if let Some(sink) = self {
            sink.announce(text, locale);
        }
    }
}

impl<S: AnnounceSink + ?Sized> AnnounceSink for &S {
    fn announce(&self, text: &str, locale: Locale) {
        (**self).announce(text, locale);
    }
}

/// "N schemes are available" in `locale`.
pub fn availability_message(count: usize, locale: Locale) -> String {
    match locale {
        Locale::En => format!("{count} schemes are available for you"),
        Locale::Hi => format!("आपके लिए {count} योजनाएं उपलब्ध हैं"),
    }
}

/// A spoken summary of one scheme: name, description and benefits.
pub fn scheme_summary(record: &SchemeRecord, locale: Locale) -> String {
    let benefits_label = match locale {
        Locale::En => "Benefits",
        Locale::Hi => "लाभ",
    };
    format!(
        "{}. {}. {}: {}",
        record.name.get(locale),
        record.description.get(locale),
        benefits_label,
        record.benefits.get(locale)
    )
}

/// Announce the size of `result` in its evaluation locale. Returns the
/// sentence that was handed to the sink.
pub fn announce_result<S: AnnounceSink + ?Sized>(sink: &S, result: &MatchResult<'_>) -> String {
    let message = availability_message(result.len(), result.locale());
    sink.announce(&message, result.locale());
    message
}

/// Read one scheme aloud.
pub fn announce_scheme<S: AnnounceSink + ?Sized>(sink: &S, record: &SchemeRecord, locale: Locale) {
    sink.announce(&scheme_summary(record, locale), locale);
}
