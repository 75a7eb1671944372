use crate::domain::model::{Catalog, ContextIndex};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait CatalogStore {
    fn catalog_path(&self, domain: &str) -> PathBuf;
    fn load_catalog(&self, domain: &str) -> Result<Catalog>;
    fn save_catalog(&self, domain: &str, catalog: &Catalog) -> Result<()>;
}

pub trait ContextSource {
    fn context_dir(&self, domain: &str) -> PathBuf;
    fn context_files(&self, domain: &str) -> Result<ContextIndex>;
}

pub trait ConfigProvider {
    fn base_dir(&self) -> &Path;
    fn data_dir(&self) -> &Path;
    fn context_dir(&self) -> &Path;
    fn domains(&self) -> &[String];
    fn dry_run(&self) -> bool;
}
