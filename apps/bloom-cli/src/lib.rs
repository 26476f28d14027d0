//! # Bloom CLI Library
//!
//! Command-line shell for the flower basket.
//!
//! ## Module Organization
//! ```text
//! bloom_cli/
//! ├── lib.rs          ◄─── You are here (startup, tracing, run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── config.rs   ◄─── ConfigState (env + defaults)
//! │   ├── storage.rs  ◄─── StorageHandle (SQLite / file / memory)
//! │   └── basket.rs   ◄─── SharedBasket (Arc<Mutex<BasketStore>>)
//! ├── commands/
//! │   ├── basket.rs   ◄─── show / add / remove / set-qty / clear
//! │   ├── checkout.rs ◄─── WhatsApp handoff
//! │   ├── preferences.rs ◄─ language
//! │   └── status.rs   ◄─── backend, migrations, stored keys
//! └── error.rs        ◄─── CliError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::CliError;
use state::{ConfigState, SharedBasket, StorageHandle};

/// Runs one command with configuration from the environment.
pub async fn run(cli: Cli) -> Result<String, CliError> {
    let mut config = ConfigState::from_env();
    cli.apply_to(&mut config);
    run_with_config(cli, config).await
}

/// Runs one command.
///
/// ## Sequence
/// ```text
/// 1. Open storage        (SQLite: connect, migrate, preload snapshots)
/// 2. Rehydrate basket    (BasketStore::open)
/// 3. Execute command     (store operations persist as they go)
/// 4. Shut storage down   (flush write-behind queue, close pool)
/// ```
pub async fn run_with_config(cli: Cli, config: ConfigState) -> Result<String, CliError> {
    info!(
        data_dir = %config.data_dir.display(),
        storage = %config.storage,
        "Starting bloom"
    );

    let storage = StorageHandle::open(&config).await?;
    let basket = SharedBasket::open(storage.clone());

    let result = commands::execute(cli.command, &basket, &storage, &config).await;

    // Flush even when the command failed; earlier writes still count
    storage.shutdown().await?;
    debug!("Storage closed");

    result
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bloom=trace` - Show trace for bloom crates only
/// - Default: `info,bloom=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bloom=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
