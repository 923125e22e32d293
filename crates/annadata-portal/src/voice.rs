//! # Voice Capability
//!
//! Speech synthesis and recognition are provided by the host platform.
//! Both are optional: when no capability is present, speaking does nothing
//! and listening yields no transcript.

use annadata_core::Locale;
use annadata_match::{AnnounceSink, QueryProfile};

/// Platform speech services.
pub trait VoiceCapability {
    /// Speak `text` using the voice for `locale`.
    fn speak(&self, text: &str, locale: Locale);

    /// Capture one utterance in `locale`. `None` when nothing was heard.
    fn listen(&self, locale: Locale) -> Option<String>;
}

/// Adapts an optional [`VoiceCapability`] into an [`AnnounceSink`].
#[derive(Debug, Clone, Default)]
pub struct VoiceAnnouncer<V> {
    voice: Option<V>,
}

impl<V: VoiceCapability> VoiceAnnouncer<V> {
    pub fn new(voice: Option<V>) -> Self {
        Self { voice }
    }

    pub fn is_available(&self) -> bool {
        self.voice.is_some()
    }
}

impl<V: VoiceCapability> AnnounceSink for VoiceAnnouncer<V> {
    fn announce(&self, text: &str, locale: Locale) {
        match &self.voice {
            Some(voice) => voice.speak(text, locale),
            None => tracing::trace!(locale = %locale, "no voice capability, announcement dropped"),
        }
    }
}

/// Listen for a spoken search and turn it into a discovery query.
/// Returns `None` without a capability or when the transcript is blank.
pub fn voice_search<V: VoiceCapability + ?Sized>(
    voice: Option<&V>,
    locale: Locale,
) -> Option<QueryProfile> {
    let transcript = voice?.listen(locale)?;
    let text = transcript.trim();
    if text.is_empty() {
        return None;
    }
    tracing::debug!(locale = %locale, "voice search transcript received");
    Some(QueryProfile::discovery().with_text(text))
}
