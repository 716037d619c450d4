//! Console views and role-based routing.

use std::fmt;
use std::str::FromStr;

use garrison_core::{ParseError, User};

/// A page of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Summary counters and recent reports.
    #[default]
    Dashboard,
    /// The session user's own record.
    Profile,
    /// The report catalog.
    Reports,
    /// Pending access requests.
    Approvals,
    /// Reviewed members.
    Users,
    /// Audit trail and owner tools.
    Settings,
}

impl View {
    /// Every view, in menu order.
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Profile,
        View::Reports,
        View::Approvals,
        View::Users,
        View::Settings,
    ];

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Profile => "profile",
            Self::Reports => "reports",
            Self::Approvals => "approvals",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }

    /// Whether only administrators see this view.
    #[must_use]
    pub fn requires_admin(self) -> bool {
        matches!(self, Self::Approvals | Self::Users)
    }

    /// Whether `user` may open this view.
    #[must_use]
    pub fn is_visible_to(self, user: &User) -> bool {
        !self.requires_admin() || user.role.has_admin_visibility()
    }

    /// Views `user` may open, in menu order.
    #[must_use]
    pub fn visible_to(user: &User) -> Vec<View> {
        Self::ALL
            .into_iter()
            .filter(|v| v.is_visible_to(user))
            .collect()
    }

    /// The view to show when `user` asks for `requested`: the request itself
    /// when visible, otherwise the dashboard.
    #[must_use]
    pub fn route(user: &User, requested: View) -> View {
        if requested.is_visible_to(user) {
            requested
        } else {
            View::Dashboard
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::new("view", s))
    }
}
