//! Persistence layer for the recite deck: atomic JSON snapshot storage,
//! TOML configuration, and data-directory resolution.

pub mod config;
pub mod error;
pub mod store;

pub use config::{Config, ProviderConfig};
pub use error::{Result, StoreError};
pub use store::{DeckStore, default_base_dir};
