use crate::config::toml_config::TomlConfig;
use crate::config::SyncSettings;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-sync")]
#[command(about = "Synchronize library catalogs with the context files present on disk")]
pub struct CliConfig {
    /// Project root that holds the data and context directories
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Domains to process (defaults to astronomy,finance)
    #[arg(short, long = "domain", value_delimiter = ',')]
    pub domains: Vec<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog directory, relative to the base directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Context directory root, relative to the base directory
    #[arg(long)]
    pub context_dir: Option<PathBuf>,

    /// Compute the updates without rewriting any catalog
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Resolves defaults, the optional TOML file and the flags, in that
    /// order of increasing priority.
    pub fn resolve(&self) -> Result<SyncSettings> {
        let mut settings = SyncSettings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let toml = TomlConfig::from_file(path)?;
            toml.validate()?;
            settings = settings.merge_toml(&toml);
        }

        if let Some(base_dir) = &self.base_dir {
            settings.base_dir = base_dir.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(context_dir) = &self.context_dir {
            settings.context_dir = context_dir.clone();
        }
        if !self.domains.is_empty() {
            settings.domains = self.domains.clone();
        }
        settings.dry_run = self.dry_run;

        settings.validate()?;
        Ok(settings)
    }
}
