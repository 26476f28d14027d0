//! # Preferences
//!
//! The storefront remembers the chosen UI language next to the basket, in
//! the same on-device storage.

use tracing::{debug, warn};

use crate::storage::SnapshotStorage;
use crate::types::Language;
use crate::LANGUAGE_STORAGE_KEY;

/// Reads the saved language, falling back to English when nothing valid is
/// stored.
pub fn load_language<S: SnapshotStorage + ?Sized>(storage: &S) -> Language {
    match storage.get(LANGUAGE_STORAGE_KEY) {
        Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|| {
            warn!(code = %code, "Ignoring unknown saved language");
            Language::default()
        }),
        Ok(None) => Language::default(),
        Err(e) => {
            warn!(error = %e, "Could not read saved language");
            Language::default()
        }
    }
}

/// Saves the language. A failed write is logged and otherwise ignored.
pub fn save_language<S: SnapshotStorage + ?Sized>(storage: &S, language: Language) {
    match storage.set(LANGUAGE_STORAGE_KEY, language.code()) {
        Ok(()) => debug!(language = %language, "Language switched"),
        Err(e) => warn!(error = %e, language = %language, "Error saving language"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_language_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(load_language(&storage), Language::English);

        save_language(&storage, Language::Arabic);
        assert_eq!(load_language(&storage), Language::Arabic);
        assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).unwrap().as_deref(), Some("ar"));
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let storage = MemoryStorage::with_entry(LANGUAGE_STORAGE_KEY, "xx");
        assert_eq!(load_language(&storage), Language::English);
    }
}
