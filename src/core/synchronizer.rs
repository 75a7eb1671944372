use crate::core::matcher::find_context_file;
use crate::domain::model::{Catalog, ContextIndex, DomainSummary, RecordOutcome};
use crate::domain::ports::{CatalogStore, ContextSource};
use crate::utils::error::Result;

const MAX_EXAMPLES: usize = 5;

/// Updates every record of `catalog` against `index` in place.
pub fn reconcile(catalog: &mut Catalog, index: &ContextIndex) -> Vec<RecordOutcome> {
    catalog
        .libraries
        .iter_mut()
        .map(|library| {
            let matched = find_context_file(library.name(), index);
            let changed = library.apply_match(matched.as_deref());

            match &matched {
                Some(file_name) => {
                    tracing::info!("✓ {} has context file: {}", library.name(), file_name)
                }
                None => tracing::info!("✗ {} has no context file", library.name()),
            }

            RecordOutcome {
                name: library.name().to_string(),
                context_file_name: matched,
                changed,
            }
        })
        .collect()
}

pub fn summarize(domain: &str, context_files: usize, outcomes: &[RecordOutcome]) -> DomainSummary {
    let mut summary = DomainSummary {
        domain: domain.to_string(),
        context_files,
        total: outcomes.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        let matched = outcome.context_file_name.is_some();
        if matched {
            summary.with_context += 1;
            if summary.examples.len() < MAX_EXAMPLES {
                summary.examples.push(outcome.name.clone());
            }
        }
        if outcome.changed {
            summary.changed += 1;
            if matched {
                summary.newly_matched += 1;
            } else {
                summary.newly_unmatched += 1;
            }
        }
    }

    summary
}

/// Reconciles one domain catalog with its context directory.
pub struct CatalogSynchronizer<S: CatalogStore, C: ContextSource> {
    store: S,
    contexts: C,
    dry_run: bool,
}

impl<S: CatalogStore, C: ContextSource> CatalogSynchronizer<S, C> {
    pub fn new(store: S, contexts: C) -> Self {
        Self {
            store,
            contexts,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Loads, matches and rewrites the catalog of `domain`. Nothing is
    /// written unless every earlier step succeeded.
    pub fn sync_domain(&self, domain: &str) -> Result<DomainSummary> {
        let mut catalog = self.store.load_catalog(domain)?;
        let index = self.contexts.context_files(domain)?;

        tracing::info!(
            "Found {} context files for {}: {:?}",
            index.len(),
            domain,
            index.names().collect::<Vec<_>>()
        );

        let outcomes = reconcile(&mut catalog, &index);
        let mut summary = summarize(domain, index.len(), &outcomes);

        if self.dry_run {
            tracing::info!(
                "🔍 Dry run: {} would change {} of {} libraries",
                self.store.catalog_path(domain).display(),
                summary.changed,
                summary.total
            );
        } else {
            self.store.save_catalog(domain, &catalog)?;
            summary.written = true;
        }

        tracing::info!(
            "Updated context status for {}: {} libraries processed",
            domain,
            summary.total
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LibraryRecord;
    use crate::utils::error::SyncError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MemoryStore {
        catalogs: RefCell<HashMap<String, Catalog>>,
        saves: RefCell<usize>,
    }

    impl CatalogStore for &MemoryStore {
        fn catalog_path(&self, domain: &str) -> PathBuf {
            PathBuf::from(format!("{domain}-libraries.json"))
        }

        fn load_catalog(&self, domain: &str) -> Result<Catalog> {
            self.catalogs
                .borrow()
                .get(domain)
                .cloned()
                .ok_or_else(|| SyncError::CatalogNotFound {
                    domain: domain.to_string(),
                    path: self.catalog_path(domain),
                })
        }

        fn save_catalog(&self, domain: &str, catalog: &Catalog) -> Result<()> {
            *self.saves.borrow_mut() += 1;
            self.catalogs
                .borrow_mut()
                .insert(domain.to_string(), catalog.clone());
            Ok(())
        }
    }

    struct FixedContexts(Vec<&'static str>);

    impl ContextSource for FixedContexts {
        fn context_dir(&self, domain: &str) -> PathBuf {
            PathBuf::from(domain)
        }

        fn context_files(&self, _domain: &str) -> Result<ContextIndex> {
            Ok(self.0.iter().copied().collect())
        }
    }

    fn catalog(records: Vec<LibraryRecord>) -> Catalog {
        Catalog::new(records)
    }

    #[test]
    fn test_reconcile_clears_stale_file_name() {
        let stale = LibraryRecord::new("numpy")
            .with_field("hasContextFile", serde_json::Value::Bool(true))
            .with_field("contextFileName", serde_json::json!("stale.txt"));
        let mut catalog = catalog(vec![stale]);

        let outcomes = reconcile(&mut catalog, &ContextIndex::new());

        assert!(outcomes[0].changed);
        assert!(!catalog.libraries[0].has_context_file());
        assert_eq!(catalog.libraries[0].context_file_name(), None);
    }

    #[test]
    fn test_summarize_counts() {
        let outcomes = vec![
            RecordOutcome {
                name: "a".to_string(),
                context_file_name: Some("a.txt".to_string()),
                changed: true,
            },
            RecordOutcome {
                name: "b".to_string(),
                context_file_name: None,
                changed: true,
            },
            RecordOutcome {
                name: "c".to_string(),
                context_file_name: Some("c.txt".to_string()),
                changed: false,
            },
        ];

        let summary = summarize("astronomy", 2, &outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.with_context, 2);
        assert_eq!(summary.changed, 2);
        assert_eq!(summary.newly_matched, 1);
        assert_eq!(summary.newly_unmatched, 1);
        assert_eq!(summary.examples, vec!["a", "c"]);
    }

    #[test]
    fn test_sync_domain_saves_catalog() {
        let store = MemoryStore::default();
        store.catalogs.borrow_mut().insert(
            "finance".to_string(),
            catalog(vec![LibraryRecord::new("finance/pandas")]),
        );

        let synchronizer =
            CatalogSynchronizer::new(&store, FixedContexts(vec!["pandas-context.txt"]));
        let summary = synchronizer.sync_domain("finance").unwrap();

        assert!(summary.written);
        assert_eq!(summary.with_context, 1);
        assert_eq!(*store.saves.borrow(), 1);

        let saved = store.catalogs.borrow()["finance"].clone();
        assert_eq!(
            saved.libraries[0].context_file_name(),
            Some("pandas-context.txt")
        );
    }

    #[test]
    fn test_dry_run_does_not_save() {
        let store = MemoryStore::default();
        store.catalogs.borrow_mut().insert(
            "finance".to_string(),
            catalog(vec![LibraryRecord::new("finance/pandas")]),
        );

        let synchronizer =
            CatalogSynchronizer::new(&store, FixedContexts(vec!["pandas-context.txt"]))
                .with_dry_run(true);
        let summary = synchronizer.sync_domain("finance").unwrap();

        assert!(!summary.written);
        assert_eq!(summary.changed, 1);
        assert_eq!(*store.saves.borrow(), 0);
        assert!(!store.catalogs.borrow()["finance"].libraries[0].has_context_file());
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let store = MemoryStore::default();
        let synchronizer = CatalogSynchronizer::new(&store, FixedContexts(vec![]));

        assert!(matches!(
            synchronizer.sync_domain("astronomy"),
            Err(SyncError::CatalogNotFound { .. })
        ));
        assert_eq!(*store.saves.borrow(), 0);
    }
}
