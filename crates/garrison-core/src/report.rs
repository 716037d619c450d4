//! Operational report records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::types::{ReportId, Timestamp, UserId};
use crate::user::Rank;

/// Kind of operational report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Promotion request.
    Promotion,
    /// Transfer between commands.
    Transfer,
    /// Exile order.
    Exile,
    /// Disciplinary proceeding. The only type that carries
    /// [`DisciplinaryDetails`].
    DisciplinaryProceeding,
    /// Leave of absence.
    Leave,
    /// Weekly summary.
    Weekly,
}

impl ReportType {
    /// All report types in listing order.
    pub const ALL: [ReportType; 6] = [
        Self::Promotion,
        Self::Transfer,
        Self::Exile,
        Self::DisciplinaryProceeding,
        Self::Leave,
        Self::Weekly,
    ];

    /// Stable machine tag, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Promotion => "promotion",
            Self::Transfer => "transfer",
            Self::Exile => "exile",
            Self::DisciplinaryProceeding => "disciplinary_proceeding",
            Self::Leave => "leave",
            Self::Weekly => "weekly",
        }
    }

    /// Whether reports of this type may carry disciplinary details.
    #[must_use]
    pub fn is_disciplinary(self) -> bool {
        self == Self::DisciplinaryProceeding
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Promotion => "Promotion",
            Self::Transfer => "Transfer",
            Self::Exile => "Exile",
            Self::DisciplinaryProceeding => "Disciplinary Proceeding",
            Self::Leave => "Leave",
            Self::Weekly => "Weekly Report",
        };
        f.write_str(label)
    }
}

impl FromStr for ReportType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ParseError::new("report type", s))
    }
}

/// Review state of a report.
///
/// Reports are created `Pending`; nothing in the console moves them further
/// yet, but stored records may carry any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    /// Not yet submitted.
    Draft,
    /// Submitted, awaiting review.
    Pending,
    /// Accepted.
    Approved,
    /// Refused.
    Rejected,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(label)
    }
}

/// Extra fields recorded for disciplinary proceedings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplinaryDetails {
    /// Notes from the investigating officer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investigator_notes: Option<String>,
    /// Steps taken so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplinary_steps: Option<String>,
    /// Outcome, once decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_disposition: Option<String>,
}

impl DisciplinaryDetails {
    /// Whether every field is absent or blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.investigator_notes,
            &self.disciplinary_steps,
            &self.final_disposition,
        ]
        .into_iter()
        .all(|f| f.as_deref().is_none_or(|s| s.trim().is_empty()))
    }
}

/// An operational report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Unique report ID.
    pub id: ReportId,
    /// Kind of report.
    pub report_type: ReportType,
    /// One-line subject.
    pub subject: String,
    /// Name of the personnel the report concerns.
    pub personnel_name: String,
    /// Rank of that personnel, [`Rank::None`] when unknown.
    pub personnel_rank: Rank,
    /// Command the report originates from.
    pub originating_command: String,
    /// When the report was filed.
    pub created_at: Timestamp,
    /// Review state.
    pub status: ReportStatus,
    /// Free-text body.
    pub description: String,
    /// Disciplinary fields, only for [`ReportType::DisciplinaryProceeding`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplinary: Option<DisciplinaryDetails>,
    /// References to attached documents.
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Reviewer, once one is assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
    /// User who filed the report.
    pub author_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_parse() {
        assert_eq!(
            "disciplinary-proceeding".parse::<ReportType>().unwrap(),
            ReportType::DisciplinaryProceeding
        );
        assert_eq!("Weekly".parse::<ReportType>().unwrap(), ReportType::Weekly);
        assert!("memo".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_only_disciplinary_type_is_disciplinary() {
        let disciplinary: Vec<_> = ReportType::ALL
            .into_iter()
            .filter(|t| t.is_disciplinary())
            .collect();
        assert_eq!(disciplinary, vec![ReportType::DisciplinaryProceeding]);
    }

    #[test]
    fn test_disciplinary_details_is_empty() {
        assert!(DisciplinaryDetails::default().is_empty());
        let blank = DisciplinaryDetails {
            investigator_notes: Some("   ".into()),
            ..Default::default()
        };
        assert!(blank.is_empty());
        let filled = DisciplinaryDetails {
            final_disposition: Some("reprimand".into()),
            ..Default::default()
        };
        assert!(!filled.is_empty());
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let report = Report {
            id: ReportId::new(),
            report_type: ReportType::Leave,
            subject: "Annual leave".into(),
            personnel_name: "SANTOS".into(),
            personnel_rank: Rank::None,
            originating_command: "DIRAD".into(),
            created_at: Timestamp::now(),
            status: ReportStatus::Pending,
            description: String::new(),
            disciplinary: None,
            attachments: Vec::new(),
            approver: None,
            author_id: UserId::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("disciplinary"));
        assert!(!json.contains("approver"));
        assert!(json.contains("\"report_type\":\"leave\""));
        assert!(json.contains("\"status\":\"Pending\""));
    }
}
