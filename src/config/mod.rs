#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_domains, validate_path, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_DOMAINS: &[&str] = &["astronomy", "finance"];
pub const DEFAULT_DATA_DIR: &str = "app/data";
pub const DEFAULT_CONTEXT_DIR: &str = "public/context";

/// Fully resolved settings handed to the sync entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub context_dir: PathBuf,
    pub domains: Vec<String>,
    pub dry_run: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            context_dir: PathBuf::from(DEFAULT_CONTEXT_DIR),
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            dry_run: false,
        }
    }
}

impl SyncSettings {
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Overlays the values present in a TOML file.
    pub fn merge_toml(mut self, toml: &toml_config::TomlConfig) -> Self {
        let sync = &toml.sync;
        if let Some(base_dir) = &sync.base_dir {
            self.base_dir = PathBuf::from(base_dir);
        }
        if let Some(data_dir) = &sync.data_dir {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(context_dir) = &sync.context_dir {
            self.context_dir = PathBuf::from(context_dir);
        }
        if let Some(domains) = &sync.domains {
            self.domains = domains.clone();
        }
        self
    }
}

fn path_field(field: &str, path: &Path) -> Result<()> {
    validate_path(field, &path.to_string_lossy())
}

impl Validate for SyncSettings {
    fn validate(&self) -> Result<()> {
        path_field("base_dir", &self.base_dir)?;
        path_field("data_dir", &self.data_dir)?;
        path_field("context_dir", &self.context_dir)?;
        validate_domains("domains", &self.domains)
    }
}

impl ConfigProvider for SyncSettings {
    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn context_dir(&self) -> &Path {
        &self.context_dir
    }

    fn domains(&self) -> &[String] {
        &self.domains
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
