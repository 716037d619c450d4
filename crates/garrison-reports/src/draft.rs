//! Input for filing a report.

use garrison_core::{
    DisciplinaryDetails, Rank, Report, ReportId, ReportStatus, ReportType, Timestamp, User,
};

use crate::error::{ReportError, ReportResult};

/// Fields the author fills in when filing a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    /// Kind of report.
    pub report_type: ReportType,
    /// One-line subject. Required.
    pub subject: String,
    /// Personnel concerned. Required.
    pub personnel_name: String,
    /// Rank of that personnel.
    pub personnel_rank: Rank,
    /// Originating command. Blank means the author's command.
    pub originating_command: String,
    /// Free-text body.
    pub description: String,
    /// Only for [`ReportType::DisciplinaryProceeding`].
    pub disciplinary: Option<DisciplinaryDetails>,
    /// Attachment references.
    pub attachments: Vec<String>,
}

impl NewReport {
    /// Start a report with the two required fields; everything else empty.
    #[must_use]
    pub fn new(
        report_type: ReportType,
        subject: impl Into<String>,
        personnel_name: impl Into<String>,
    ) -> Self {
        Self {
            report_type,
            subject: subject.into(),
            personnel_name: personnel_name.into(),
            personnel_rank: Rank::None,
            originating_command: String::new(),
            description: String::new(),
            disciplinary: None,
            attachments: Vec::new(),
        }
    }

    /// Set the personnel rank.
    #[must_use]
    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.personnel_rank = rank;
        self
    }

    /// Set the originating command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.originating_command = command.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach disciplinary details.
    #[must_use]
    pub fn with_disciplinary(mut self, details: DisciplinaryDetails) -> Self {
        self.disciplinary = Some(details);
        self
    }

    /// Add an attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, reference: impl Into<String>) -> Self {
        self.attachments.push(reference.into());
        self
    }

    /// Check required fields and the disciplinary rule.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Validation`] if the subject or personnel name
    /// is blank, or disciplinary details accompany another report type.
    pub fn validate(&self) -> ReportResult<()> {
        if self.subject.trim().is_empty() {
            return Err(ReportError::Validation("subject is required".into()));
        }
        if self.personnel_name.trim().is_empty() {
            return Err(ReportError::Validation(
                "personnel name is required".into(),
            ));
        }
        let has_details = self.disciplinary.as_ref().is_some_and(|d| !d.is_empty());
        if has_details && !self.report_type.is_disciplinary() {
            return Err(ReportError::Validation(format!(
                "disciplinary details are not allowed on a {} report",
                self.report_type
            )));
        }
        Ok(())
    }

    /// Build the stored record. Assumes [`validate`](Self::validate) passed.
    pub(crate) fn into_report(self, author: &User) -> Report {
        let originating_command = match self.originating_command.trim() {
            "" => author.command.clone(),
            command => command.to_string(),
        };
        let report_type = self.report_type;
        let disciplinary = self
            .disciplinary
            .filter(|d| report_type.is_disciplinary() && !d.is_empty());
        Report {
            id: ReportId::new(),
            report_type,
            subject: self.subject.trim().to_string(),
            personnel_name: self.personnel_name.trim().to_string(),
            personnel_rank: self.personnel_rank,
            originating_command,
            created_at: Timestamp::now(),
            status: ReportStatus::Pending,
            description: self.description,
            disciplinary,
            attachments: self.attachments,
            approver: None,
            author_id: author.id.clone(),
        }
    }
}
