//! Access request input.

use garrison_core::{Rank, User};

use crate::error::{AccessError, AccessResult};

/// Fields a prospective user submits when requesting access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Login email.
    pub email: String,
    /// War name.
    pub display_name: String,
    /// Military rank. [`Rank::None`] is refused.
    pub rank: Rank,
    /// Organizational unit.
    pub command: String,
}

impl Registration {
    /// Build a registration from raw input.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        rank: Rank,
        command: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            rank,
            command: command.into(),
        }
    }

    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Validation`] naming the first missing field.
    pub fn validate(&self) -> AccessResult<()> {
        let fields = [
            ("email", &self.email),
            ("display name", &self.display_name),
            ("command", &self.command),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AccessError::Validation(format!("{name} is required")));
        }
        if !self.rank.is_assigned() {
            return Err(AccessError::Validation("rank is required".into()));
        }
        Ok(())
    }

    /// Turn the request into a pending user with trimmed fields.
    #[must_use]
    pub(crate) fn into_pending_user(self) -> User {
        User::pending(
            self.email.trim(),
            self.display_name.trim(),
            self.rank,
            self.command.trim(),
        )
    }
}
