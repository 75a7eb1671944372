pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{ContextDirectory, JsonCatalogStore};
pub use crate::config::SyncSettings;
pub use crate::core::engine::{BatchReport, SyncEngine};
pub use crate::core::synchronizer::CatalogSynchronizer;
pub use crate::utils::error::{Result, SyncError};
