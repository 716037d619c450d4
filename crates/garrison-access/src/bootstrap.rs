//! The configured owner account and its repair rule.

use garrison_core::{Permission, Rank, Role, Timestamp, User, UserId, UserStatus};
use tracing::warn;

/// Identity of the account that must always exist as an approved owner.
///
/// Built from configuration and handed to the [`UserDirectory`](crate::UserDirectory),
/// which applies [`reconcile`](Self::reconcile) on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerBootstrap {
    /// Owner login email.
    pub email: String,
    /// Owner war name.
    pub display_name: String,
    /// Owner rank.
    pub rank: Rank,
    /// Owner command.
    pub command: String,
}

/// What [`OwnerBootstrap::reconcile`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRepair {
    /// No record had the owner email; one was created.
    Created,
    /// The record existed but had lost its role or status.
    Restored,
}

impl OwnerBootstrap {
    /// Owner identity with the given fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        rank: Rank,
        command: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().trim().to_string(),
            display_name: display_name.into(),
            rank,
            command: command.into(),
        }
    }

    /// Deterministic ID of the synthesized owner record.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::for_email(&self.email)
    }

    /// Whether `user` is the protected owner.
    #[must_use]
    pub fn is_owner(&self, user: &User) -> bool {
        user.has_email(&self.email)
    }

    /// Fresh owner record: approved, owner role, every permission.
    #[must_use]
    pub fn synthesize(&self) -> User {
        User {
            id: self.user_id(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            rank: self.rank,
            command: self.command.clone(),
            role: Role::Owner,
            status: UserStatus::Approved,
            permissions: Permission::all(),
            created_at: Timestamp::now(),
        }
    }

    /// Make `users` satisfy the owner invariant.
    ///
    /// Appends a synthesized owner when none matches the email; otherwise
    /// forces the first match to owner/approved/all permissions if either
    /// role or status drifted. Later matches are left as they are and
    /// logged. Returns `None` when nothing changed.
    pub fn reconcile(&self, users: &mut Vec<User>) -> Option<OwnerRepair> {
        let matches = self.matching_records(users);
        if matches > 1 {
            warn!(
                email = %self.email,
                matches,
                "several records share the owner email; only the first is kept as owner"
            );
        }
        let Some(owner) = users.iter_mut().find(|u| self.is_owner(u)) else {
            users.push(self.synthesize());
            return Some(OwnerRepair::Created);
        };
        if owner.role == Role::Owner && owner.status == UserStatus::Approved {
            return None;
        }
        owner.role = Role::Owner;
        owner.status = UserStatus::Approved;
        owner.permissions = Permission::all();
        Some(OwnerRepair::Restored)
    }

    /// How many records in `users` carry the owner email.
    #[must_use]
    pub fn matching_records(&self, users: &[User]) -> usize {
        users.iter().filter(|u| self.is_owner(u)).count()
    }
}
