//! # Language Preference
//!
//! The user's locale choice persists across sessions under the key
//! [`LANGUAGE_PREFERENCE_KEY`]. Storage is behind [`PreferenceStore`] so
//! the same logic runs against an in-memory map or a JSON file.
//!
//! Failures never block the user: an unreadable or unrecognized stored
//! value falls back to the primary locale, and a failed write is logged
//! while the in-process choice still takes effect.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use annadata_core::{Locale, LocaleResolver};
use parking_lot::Mutex;
use thiserror::Error;

/// Storage key for the locale choice.
pub const LANGUAGE_PREFERENCE_KEY: &str = "rait-language";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt preference file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Key-value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk. A missing file reads as
/// empty and is created on first write.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|source| PreferenceError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let _guard = self.write_lock.lock();
        let mut values = writable_base(self.read_all())?;
        values.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string_pretty(&values).map_err(|source| {
            PreferenceError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// The map a write starts from. A corrupt file is replaced; any other
/// read failure aborts the write so existing keys are not lost.
fn writable_base(
    read: Result<BTreeMap<String, String>, PreferenceError>,
) -> Result<BTreeMap<String, String>, PreferenceError> {
    match read {
        Ok(values) => Ok(values),
        Err(PreferenceError::Corrupt { path, source }) => {
            tracing::warn!(path = %path.display(), error = %source, "replacing corrupt preference file");
            Ok(BTreeMap::new())
        }
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// LanguagePreference
// ---------------------------------------------------------------------------

/// The active locale, persisted through a [`PreferenceStore`].
#[derive(Debug)]
pub struct LanguagePreference<S> {
    store: S,
    locale: Locale,
}

impl<S: PreferenceStore> LanguagePreference<S> {
    /// Read the stored choice, falling back to the primary locale.
    pub fn load(store: S) -> Self {
        let locale = match store.get(LANGUAGE_PREFERENCE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(stored = %raw, "unrecognized stored language, using default");
                Locale::default()
            }),
            Ok(None) => Locale::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read language preference");
                Locale::default()
            }
        };
        Self { store, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch to `locale` and persist it.
    pub fn set(&mut self, locale: Locale) {
        self.locale = locale;
        if let Err(e) = self.store.set(LANGUAGE_PREFERENCE_KEY, locale.as_str()) {
            tracing::warn!(error = %e, locale = %locale, "failed to persist language preference");
        }
    }

    /// Flip between the two locales and persist. Returns the new locale.
    pub fn toggle(&mut self) -> Locale {
        self.set(self.locale.toggled());
        self.locale
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: PreferenceStore> LocaleResolver for LanguagePreference<S> {
    fn active_locale(&self) -> Locale {
        self.locale
    }
}
