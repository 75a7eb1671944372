use crate::utils::error::{Result, SyncError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Domain identifiers become part of file and directory names, so they must
/// be a single path component.
pub fn validate_domain(field_name: &str, domain: &str) -> Result<()> {
    validate_non_empty_string(field_name, domain)?;

    if domain.contains(['/', '\\', '\0']) || domain == "." || domain == ".." {
        return Err(SyncError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: domain.to_string(),
            reason: "Domain must be a single path component".to_string(),
        });
    }

    Ok(())
}

pub fn validate_domains(field_name: &str, domains: &[String]) -> Result<()> {
    if domains.is_empty() {
        return Err(SyncError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for domain in domains {
        validate_domain(field_name, domain)?;
        if !seen.insert(domain.as_str()) {
            return Err(SyncError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: domain.clone(),
                reason: "Domain listed more than once".to_string(),
            });
        }
    }

    Ok(())
}
