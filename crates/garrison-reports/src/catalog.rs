//! The persisted report catalog.

use garrison_audit::{AuditAction, AuditLog};
use garrison_core::{Report, ReportId, ReportType, User};
use garrison_storage::{Collection, ScopedKvStore, layout};
use tracing::{debug, info};

use crate::draft::NewReport;
use crate::error::{ReportError, ReportResult};

/// All reports, newest first, stored under the `reports` key.
#[derive(Debug, Clone)]
pub struct ReportCatalog {
    reports: Collection<Report>,
    audit: AuditLog,
}

impl ReportCatalog {
    /// Open the catalog inside `scope`.
    #[must_use]
    pub fn new(scope: ScopedKvStore, audit: AuditLog) -> Self {
        Self {
            reports: Collection::new(scope, layout::REPORTS),
            audit,
        }
    }

    /// File a report as `author`. It is stored `Pending` at the front of the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] for an incomplete draft (nothing is
    /// written), or a persistence/audit error.
    pub async fn create(&self, author: &User, draft: NewReport) -> ReportResult<Report> {
        draft.validate()?;
        let report = draft.into_report(author);
        self.reports.prepend(report.clone()).await?;
        info!(
            report_id = %report.id,
            report_type = report.report_type.as_str(),
            author = %author.email,
            "report filed"
        );

        self.audit
            .record(
                author,
                AuditAction::ReportCreate,
                format!("Filed {} report: {}", report.report_type, report.subject),
            )
            .await?;
        Ok(report)
    }

    /// Every report, or only those of `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the catalog cannot be read.
    pub async fn list(&self, filter: Option<ReportType>) -> ReportResult<Vec<Report>> {
        let reports = self.reports.load().await?;
        debug!(count = reports.len(), ?filter, "report catalog loaded");
        Ok(match filter {
            Some(t) => reports.into_iter().filter(|r| r.report_type == t).collect(),
            None => reports,
        })
    }

    /// The `limit` newest reports.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the catalog cannot be read.
    pub async fn recent(&self, limit: usize) -> ReportResult<Vec<Report>> {
        let mut reports = self.list(None).await?;
        reports.truncate(limit);
        Ok(reports)
    }

    /// Look up a report by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if no report has `id`.
    pub async fn get(&self, id: &ReportId) -> ReportResult<Report> {
        self.list(None)
            .await?
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))
    }
}
