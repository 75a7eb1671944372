pub mod engine;
pub mod matcher;
pub mod synchronizer;

pub use crate::domain::model::{Catalog, ContextIndex, DomainSummary, LibraryRecord};
pub use crate::domain::ports::{CatalogStore, ConfigProvider, ContextSource};
pub use crate::utils::error::Result;

use crate::adapters::local_workspace;
use engine::{BatchReport, SyncEngine};
use synchronizer::CatalogSynchronizer;

/// Runs one batch against the local filesystem layout described by `config`.
pub fn run<C: ConfigProvider>(config: &C) -> BatchReport {
    let (store, contexts) =
        local_workspace(config.base_dir(), config.data_dir(), config.context_dir());
    let synchronizer = CatalogSynchronizer::new(store, contexts).with_dry_run(config.dry_run());

    SyncEngine::new(synchronizer).run(config.domains())
}
