//! Who may review access requests.

use garrison_core::User;
use tracing::warn;

use crate::error::{AccessError, AccessResult};

/// Admin check applied to approve, reject and revoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminPolicy {
    enforce: bool,
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self::enforced()
    }
}

impl AdminPolicy {
    /// Require an approved administrator.
    #[must_use]
    pub fn enforced() -> Self {
        Self { enforce: true }
    }

    /// Let any caller through, logging each call.
    #[must_use]
    pub fn unchecked() -> Self {
        Self { enforce: false }
    }

    /// Build from the `access.enforce_admin_role` setting.
    #[must_use]
    pub fn from_flag(enforce: bool) -> Self {
        Self { enforce }
    }

    /// Whether the check is active.
    #[must_use]
    pub fn is_enforced(self) -> bool {
        self.enforce
    }

    /// Check that `actor` (as currently stored) may perform `action`.
    ///
    /// `actor` is `None` when the acting user's record no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Forbidden`] when enforced and the actor is
    /// missing, not approved, or holds no administrative role.
    pub fn authorize(self, actor: Option<&User>, action: &str) -> AccessResult<()> {
        let allowed = actor.is_some_and(User::is_admin);
        if allowed {
            return Ok(());
        }
        let who = actor.map_or_else(|| "unknown user".to_string(), |u| u.email.clone());
        if self.enforce {
            return Err(AccessError::Forbidden(format!(
                "{who} may not {action} users"
            )));
        }
        warn!(actor = %who, action, "admin check disabled; allowing unchecked call");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use garrison_core::{Rank, Role, UserStatus};

    use super::*;

    fn user(role: Role, status: UserStatus) -> User {
        let mut u = User::pending("a@x.mil", "SILVA", Rank::Captain, "COMGEP");
        u.role = role;
        u.status = status;
        u
    }

    #[test]
    fn test_admin_passes() {
        let admin = user(Role::Dirad, UserStatus::Approved);
        assert!(AdminPolicy::enforced().authorize(Some(&admin), "approve").is_ok());
    }

    #[test]
    fn test_non_admin_forbidden() {
        let policy = AdminPolicy::enforced();
        let plain = user(Role::Unassigned, UserStatus::Approved);
        let revoked_admin = user(Role::Sefa, UserStatus::Rejected);

        assert!(matches!(
            policy.authorize(Some(&plain), "approve"),
            Err(AccessError::Forbidden(_))
        ));
        assert!(matches!(
            policy.authorize(Some(&revoked_admin), "reject"),
            Err(AccessError::Forbidden(_))
        ));
        assert!(matches!(
            policy.authorize(None, "revoke"),
            Err(AccessError::Forbidden(_))
        ));
    }

    #[test]
    fn test_unchecked_allows_anyone() {
        let plain = user(Role::Unassigned, UserStatus::Pending);
        let policy = AdminPolicy::unchecked();
        assert!(!policy.is_enforced());
        assert!(policy.authorize(Some(&plain), "approve").is_ok());
        assert!(policy.authorize(None, "approve").is_ok());
    }

    #[test]
    fn test_default_is_enforced() {
        assert!(AdminPolicy::default().is_enforced());
        assert!(!AdminPolicy::from_flag(false).is_enforced());
    }
}
