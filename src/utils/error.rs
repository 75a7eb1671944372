use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Catalog not found for domain '{domain}': {}", .path.display())]
    CatalogNotFound { domain: String, path: PathBuf },

    #[error("Malformed catalog {}: {source}", .path.display())]
    MalformedCatalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read catalog {}: {source}", .path.display())]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write catalog {}: {source}", .path.display())]
    CatalogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list context directory {}: {source}", .path.display())]
    ContextDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to write run report {}: {message}", .path.display())]
    ReportError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    ContextFiles,
    Configuration,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::CatalogNotFound { .. }
            | SyncError::MalformedCatalog { .. }
            | SyncError::CatalogIo { .. }
            | SyncError::CatalogWrite { .. }
            | SyncError::SerializationError(_) => ErrorCategory::Catalog,
            SyncError::ContextDirectory { .. } => ErrorCategory::ContextFiles,
            SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SyncError::ReportError { .. } => ErrorCategory::Report,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一領域缺檔不影響其他領域
            SyncError::CatalogNotFound { .. } => ErrorSeverity::Low,
            SyncError::MalformedCatalog { .. }
            | SyncError::CatalogIo { .. }
            | SyncError::ContextDirectory { .. }
            | SyncError::SerializationError(_) => ErrorSeverity::Medium,
            SyncError::ReportError { .. }
            | SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorSeverity::High,
            // 寫入中斷可能留下截斷的目錄檔
            SyncError::CatalogWrite { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SyncError::CatalogNotFound { path, .. } => format!(
                "Create {} or remove the domain from the configured list",
                path.display()
            ),
            SyncError::MalformedCatalog { .. } => {
                "Check that the catalog is valid JSON with a \"libraries\" array whose entries all have a \"name\"".to_string()
            }
            SyncError::CatalogIo { .. } | SyncError::ContextDirectory { .. } => {
                "Check file permissions and that the path is readable".to_string()
            }
            SyncError::CatalogWrite { path, .. } => format!(
                "Check disk space and permissions; {} may be truncated and should be restored from version control",
                path.display()
            ),
            SyncError::ConfigError { .. }
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => {
                "Review the command line flags and the TOML configuration file".to_string()
            }
            SyncError::ReportError { .. } => {
                "Check that the report directory exists and is writable".to_string()
            }
            SyncError::SerializationError(_) => {
                "Re-run with --verbose for more details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Catalog => format!("Catalog problem: {}", self),
            ErrorCategory::ContextFiles => format!("Context files problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Report => format!("Could not save the run report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
