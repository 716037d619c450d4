//! Dashboard counters.

use garrison_core::{Report, User, UserStatus};
use serde::Serialize;

/// What the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Reports in the catalog.
    pub total_reports: usize,
    /// Users awaiting review.
    pub pending_approvals: usize,
    /// Approved users.
    pub active_users: usize,
    /// Newest reports, at most [`Self::RECENT_REPORTS`].
    pub recent_reports: Vec<Report>,
}

impl DashboardSummary {
    /// How many reports the recent list holds.
    pub const RECENT_REPORTS: usize = 5;

    /// Summarize `users` and `reports` (newest first).
    #[must_use]
    pub fn compute(users: &[User], mut reports: Vec<Report>) -> Self {
        let count = |status| users.iter().filter(|u| u.status == status).count();
        let total_reports = reports.len();
        reports.truncate(Self::RECENT_REPORTS);
        Self {
            total_reports,
            pending_approvals: count(UserStatus::Pending),
            active_users: count(UserStatus::Approved),
            recent_reports: reports,
        }
    }
}
