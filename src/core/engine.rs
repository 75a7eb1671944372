use crate::core::synchronizer::CatalogSynchronizer;
use crate::domain::model::DomainSummary;
use crate::domain::ports::{CatalogStore, ContextSource};
use crate::utils::error::{Result, SyncError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Result of one domain within a batch.
#[derive(Debug)]
pub struct DomainOutcome {
    pub domain: String,
    pub result: Result<DomainSummary>,
}

impl DomainOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub outcomes: Vec<DomainOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome(&self, domain: &str) -> Option<&DomainOutcome> {
        self.outcomes.iter().find(|o| o.domain == domain)
    }

    pub fn log_summary(&self) {
        tracing::info!("📊 Summary");

        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(summary) => {
                    tracing::info!(
                        "✅ {}: {}/{} libraries with context ({:.1}%), {} changed",
                        outcome.domain,
                        summary.with_context,
                        summary.total,
                        summary.coverage_percent(),
                        summary.changed
                    );
                    if !summary.examples.is_empty() {
                        tracing::info!("   📁 e.g. {}", summary.examples.join(", "));
                    }
                }
                Err(e) => tracing::error!("❌ {}: {}", outcome.domain, e),
            }
        }

        tracing::info!(
            "🎯 {}/{} domains synchronized in {} ms",
            self.succeeded(),
            self.outcomes.len(),
            (self.finished_at - self.started_at).num_milliseconds()
        );

        if !self.is_complete_success() {
            tracing::warn!("⚠️  Some domains could not be synchronized");
        }
    }

    pub fn to_document(&self) -> ReportDocument<'_> {
        ReportDocument {
            started_at: self.started_at,
            finished_at: self.finished_at,
            dry_run: self.dry_run,
            succeeded: self.succeeded(),
            failed: self.failed(),
            domains: self
                .outcomes
                .iter()
                .map(|outcome| match &outcome.result {
                    Ok(summary) => DomainEntry {
                        domain: &outcome.domain,
                        status: if summary.written {
                            DomainStatus::Updated
                        } else {
                            DomainStatus::DryRun
                        },
                        summary: Some(summary),
                        error: None,
                    },
                    Err(e) => DomainEntry {
                        domain: &outcome.domain,
                        status: DomainStatus::Failed,
                        summary: None,
                        error: Some(e.to_string()),
                    },
                })
                .collect(),
        }
    }

    /// Writes the machine-readable run report as pretty JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let report_error = |message: String| SyncError::ReportError {
            path: path.to_path_buf(),
            message,
        };

        let json = serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| report_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| report_error(e.to_string()))?;

        tracing::info!("📝 Run report written to {}", path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Updated,
    DryRun,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct DomainEntry<'a> {
    pub domain: &'a str,
    pub status: DomainStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a DomainSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub succeeded: usize,
    pub failed: usize,
    pub domains: Vec<DomainEntry<'a>>,
}

/// Drives the synchronizer over a list of domains, one after another.
pub struct SyncEngine<S: CatalogStore, C: ContextSource> {
    synchronizer: CatalogSynchronizer<S, C>,
}

impl<S: CatalogStore, C: ContextSource> SyncEngine<S, C> {
    pub fn new(synchronizer: CatalogSynchronizer<S, C>) -> Self {
        Self { synchronizer }
    }

    /// Failures are kept per domain and never stop the batch.
    pub fn run(&self, domains: &[String]) -> BatchReport {
        let started_at = Utc::now();
        tracing::info!("🔄 Updating context status for {} domains", domains.len());

        let outcomes = domains
            .iter()
            .map(|domain| {
                tracing::info!("📁 Processing {} domain", domain);
                let result = self.synchronizer.sync_domain(domain);

                if let Err(e) = &result {
                    tracing::error!(
                        "Error updating context status for domain {}: {} (Category: {:?}, Severity: {:?})",
                        domain,
                        e,
                        e.category(),
                        e.severity()
                    );
                    tracing::debug!("💡 {}", e.recovery_suggestion());
                }

                DomainOutcome {
                    domain: domain.clone(),
                    result,
                }
            })
            .collect();

        BatchReport {
            started_at,
            finished_at: Utc::now(),
            dry_run: self.synchronizer.is_dry_run(),
            outcomes,
        }
    }
}
