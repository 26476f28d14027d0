//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`, `--storage`)
//! 2. Environment variables (`BLOOM_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bloom_core::{CheckoutHandoff, Money};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Boutique WhatsApp number used when none is configured.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+971500000000";

/// Currency prefix used when none is configured.
pub const DEFAULT_CURRENCY: &str = "AED ";

/// Where basket snapshots are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `<data dir>/bloom.db`
    #[default]
    Sqlite,

    /// `<data dir>/snapshots/<key>.json`
    File,

    /// Nothing survives the process
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::File => "file",
            StorageBackend::Memory => "memory",
        })
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Directory holding the database or snapshot files.
    pub data_dir: PathBuf,

    /// Snapshot storage backend.
    pub storage: StorageBackend,

    /// Boutique number checkout messages are sent to.
    pub whatsapp_number: String,

    /// Prefix for every amount ("AED ", "$").
    pub currency_symbol: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            data_dir: default_data_dir(),
            storage: StorageBackend::default(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            currency_symbol: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BLOOM_DATA_DIR`: Override data directory
    /// - `BLOOM_STORAGE`: `sqlite`, `file` or `memory`
    /// - `BLOOM_WHATSAPP_NUMBER`: Checkout phone number
    /// - `BLOOM_CURRENCY`: Currency prefix
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(dir) = lookup("BLOOM_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(storage) = lookup("BLOOM_STORAGE") {
            match storage.parse() {
                Ok(backend) => config.storage = backend,
                Err(e) => warn!(error = %e, "Ignoring BLOOM_STORAGE"),
            }
        }

        if let Some(number) = lookup("BLOOM_WHATSAPP_NUMBER") {
            config.whatsapp_number = number;
        }

        if let Some(currency) = lookup("BLOOM_CURRENCY") {
            config.currency_symbol = currency;
        }

        config
    }

    /// SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("bloom.db")
    }

    /// Directory for file-backed snapshots.
    pub fn snapshots_dir(&self) -> PathBuf {
        self.data_dir.join("snapshots")
    }

    /// Checkout contact details.
    pub fn checkout_handoff(&self) -> CheckoutHandoff {
        CheckoutHandoff::new(&self.whatsapp_number, &self.currency_symbol)
    }

    /// Formats an amount with the currency prefix.
    ///
    /// ## Example
    /// ```rust
    /// use bloom_cli::state::ConfigState;
    /// use bloom_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_minor(1234)), "AED 12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let digits = amount.to_string();
        match digits.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", self.currency_symbol, magnitude),
            None => format!("{}{}", self.currency_symbol, digits),
        }
    }
}

/// Platform data directory, or `./.bloom` when none can be determined.
///
/// - **macOS**: `~/Library/Application Support/com.bloom.basket`
/// - **Windows**: `%APPDATA%\bloom\basket\data`
/// - **Linux**: `~/.local/share/basket`
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "bloom", "basket")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".bloom"))
}
