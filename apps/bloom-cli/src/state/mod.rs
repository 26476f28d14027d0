//! # State Module
//!
//! Separate state types instead of one `AppState`; each command takes only
//! what it needs.
//!
//! ```text
//! ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐
//! │   ConfigState    │  │  StorageHandle   │  │    SharedBasket      │
//! │                  │  │                  │  │                      │
//! │  data dir        │  │  SQLite / file / │  │  Arc<Mutex<          │
//! │  backend         │  │  memory backend  │  │    BasketStore       │
//! │  phone, currency │  │                  │  │  >>                  │
//! └──────────────────┘  └──────────────────┘  └──────────────────────┘
//!   read-only             cloneable handle      exclusive via Mutex
//! ```

mod basket;
mod config;
mod storage;

pub use basket::SharedBasket;
pub use config::{ConfigState, StorageBackend, DEFAULT_CURRENCY, DEFAULT_WHATSAPP_NUMBER};
pub use storage::StorageHandle;
