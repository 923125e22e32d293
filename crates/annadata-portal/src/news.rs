//! # News Ticker
//!
//! A fixed list of bilingual headlines shown one at a time. The ticker
//! itself is a plain cursor; whoever owns it calls [`NewsTicker::advance`]
//! every [`ROTATION_INTERVAL`].

use std::time::Duration;

use annadata_core::{Locale, LocalizedText};

/// How often the displayed headline changes.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct NewsTicker {
    headlines: Vec<LocalizedText>,
    index: usize,
}

impl NewsTicker {
    pub fn new(headlines: Vec<LocalizedText>) -> Self {
        Self {
            headlines,
            index: 0,
        }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            LocalizedText::new(
                "Monsoon forecast shows 95% normal rainfall expected this season",
                "मानसून पूर्वानुमान इस मौसम में 95% सामान्य वर्षा की संभावना दिखाता है",
            ),
            LocalizedText::new(
                "New crop insurance scheme launched with enhanced coverage",
                "बेहतर कवरेज के साथ नई फसल बीमा योजना शुरू की गई",
            ),
            LocalizedText::new(
                "Government announces ₹50,000 crore agriculture infrastructure fund",
                "सरकार ने ₹50,000 करोड़ कृषि अवसंरचना फंड की घोषणा की",
            ),
        ])
    }

    /// The headline currently shown, in `locale`. `None` for an empty ticker.
    pub fn current(&self, locale: Locale) -> Option<&str> {
        self.headlines.get(self.index).map(|h| h.get(locale))
    }

    /// Move to the next headline, wrapping after the last. Returns the new
    /// position.
    pub fn advance(&mut self) -> usize {
        if !self.headlines.is_empty() {
            self.index = (self.index + 1) % self.headlines.len();
        }
        self.index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.headlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }

    pub fn headlines(&self) -> &[LocalizedText] {
        &self.headlines
    }
}

impl Default for NewsTicker {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_around() {
        let mut ticker = NewsTicker::builtin();
        assert_eq!(ticker.len(), 3);
        assert_eq!(ticker.index(), 0);
        assert_eq!(ticker.advance(), 1);
        assert_eq!(ticker.advance(), 2);
        assert_eq!(ticker.advance(), 0);
    }

    #[test]
    fn current_is_localized() {
        let mut ticker = NewsTicker::builtin();
        ticker.advance();
        assert_eq!(
            ticker.current(Locale::En),
            Some("New crop insurance scheme launched with enhanced coverage")
        );
        assert_eq!(
            ticker.current(Locale::Hi),
            Some("बेहतर कवरेज के साथ नई फसल बीमा योजना शुरू की गई")
        );
    }

    #[test]
    fn empty_ticker_is_inert() {
        let mut ticker = NewsTicker::new(Vec::new());
        assert_eq!(ticker.advance(), 0);
        assert_eq!(ticker.current(Locale::En), None);
    }

    #[test]
    fn rotation_interval_is_four_seconds() {
        assert_eq!(ROTATION_INTERVAL.as_secs(), 4);
    }
}
