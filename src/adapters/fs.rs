use crate::core::matcher::is_context_file;
use crate::domain::model::{Catalog, ContextIndex};
use crate::domain::ports::{CatalogStore, ContextSource};
use crate::utils::error::{Result, SyncError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Catalogs stored as `<data_dir>/<domain>-libraries.json`.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    data_dir: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl CatalogStore for JsonCatalogStore {
    fn catalog_path(&self, domain: &str) -> PathBuf {
        self.data_dir.join(format!("{domain}-libraries.json"))
    }

    fn load_catalog(&self, domain: &str) -> Result<Catalog> {
        let path = self.catalog_path(domain);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SyncError::CatalogNotFound {
                    domain: domain.to_string(),
                    path,
                })
            }
            Err(source) => return Err(SyncError::CatalogIo { path, source }),
        };

        serde_json::from_str(&content)
            .map_err(|source| SyncError::MalformedCatalog { path, source })
    }

    /// Plain overwrite: an interrupted write can leave the file truncated.
    fn save_catalog(&self, domain: &str, catalog: &Catalog) -> Result<()> {
        let path = self.catalog_path(domain);
        let json = serde_json::to_string_pretty(catalog)?;

        fs::write(&path, json).map_err(|source| SyncError::CatalogWrite { path, source })
    }
}

/// Context files stored under `<context_root>/<domain>/`.
#[derive(Debug, Clone)]
pub struct ContextDirectory {
    context_root: PathBuf,
}

impl ContextDirectory {
    pub fn new(context_root: impl Into<PathBuf>) -> Self {
        Self {
            context_root: context_root.into(),
        }
    }
}

impl ContextSource for ContextDirectory {
    fn context_dir(&self, domain: &str) -> PathBuf {
        self.context_root.join(domain)
    }

    fn context_files(&self, domain: &str) -> Result<ContextIndex> {
        let dir = self.context_dir(domain);
        let to_error = |source: std::io::Error| SyncError::ContextDirectory {
            path: dir.clone(),
            source,
        };

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Context directory {} does not exist", dir.display());
                return Ok(ContextIndex::new());
            }
            Err(e) => return Err(to_error(e)),
        };

        let mut index = ContextIndex::new();
        for entry in entries {
            let entry = entry.map_err(to_error)?;
            match entry.file_name().into_string() {
                Ok(name) if is_context_file(&name) => index.insert(name),
                Ok(_) => {}
                Err(raw) => tracing::debug!("Skipping non UTF-8 entry {:?}", raw),
            }
        }

        Ok(index)
    }
}

/// Both adapters rooted at one project directory.
pub fn local_workspace(
    base_dir: &Path,
    data_dir: &Path,
    context_dir: &Path,
) -> (JsonCatalogStore, ContextDirectory) {
    (
        JsonCatalogStore::new(base_dir.join(data_dir)),
        ContextDirectory::new(base_dir.join(context_dir)),
    )
}
