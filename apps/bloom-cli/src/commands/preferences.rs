//! Language preference commands.

use bloom_core::preferences::{load_language, save_language};
use bloom_core::{Language, SnapshotStorage};

use crate::error::CliError;

pub fn get_language<S: SnapshotStorage + ?Sized>(storage: &S) -> Language {
    load_language(storage)
}

/// Saves the language named by `code` (`en`, `ru`, `ar`).
pub fn set_language<S: SnapshotStorage + ?Sized>(
    storage: &S,
    code: &str,
) -> Result<Language, CliError> {
    let language = Language::from_code(code).ok_or_else(|| {
        CliError::validation(format!("unknown language '{code}' (expected en, ru or ar)"))
    })?;

    save_language(storage, language);
    Ok(language)
}
