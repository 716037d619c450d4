//! The persisted user directory.

use garrison_audit::{AuditAction, AuditLog};
use garrison_core::{User, UserId};
use garrison_storage::{Collection, ScopedKvStore, layout};
use tracing::{debug, warn};

use crate::bootstrap::{OwnerBootstrap, OwnerRepair};
use crate::error::{AccessError, AccessResult};

/// All users, stored as one array under the `users` key.
///
/// When an [`OwnerBootstrap`] is configured, every [`load`](Self::load)
/// repairs the owner record before returning and persists the repair.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Collection<User>,
    audit: AuditLog,
    owner: Option<OwnerBootstrap>,
}

impl UserDirectory {
    /// Open the directory inside `scope`.
    #[must_use]
    pub fn new(scope: ScopedKvStore, audit: AuditLog, owner: Option<OwnerBootstrap>) -> Self {
        Self {
            users: Collection::new(scope, layout::USERS),
            audit,
            owner,
        }
    }

    /// The configured owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&OwnerBootstrap> {
        self.owner.as_ref()
    }

    /// Whether `user` is the configured owner.
    #[must_use]
    pub fn is_protected(&self, user: &User) -> bool {
        self.owner.as_ref().is_some_and(|o| o.is_owner(user))
    }

    /// Every user in store order, with the owner invariant applied.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Persistence`] if the directory cannot be read or
    /// a repair cannot be written, and [`AccessError::Audit`] if the repair
    /// was written but could not be logged.
    pub async fn load(&self) -> AccessResult<Vec<User>> {
        let mut users = self.users.load().await?;
        debug!(count = users.len(), "user directory loaded");

        let Some(owner) = &self.owner else {
            return Ok(users);
        };
        let Some(repair) = owner.reconcile(&mut users) else {
            return Ok(users);
        };

        self.users.save(&users).await?;
        let detail = match repair {
            OwnerRepair::Created => format!("Owner account {} created", owner.email),
            OwnerRepair::Restored => format!("Owner account {} restored", owner.email),
        };
        warn!(email = %owner.email, ?repair, "owner account repaired");
        self.audit
            .append(&owner.user_id(), &owner.email, AuditAction::OwnerRestored, detail)
            .await?;
        Ok(users)
    }

    /// Replace the whole directory.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Persistence`] if the write fails.
    pub async fn save(&self, users: &[User]) -> AccessResult<()> {
        self.users.save(users).await?;
        Ok(())
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] if no user has `id`.
    pub async fn get(&self, id: &UserId) -> AccessResult<User> {
        self.load()
            .await?
            .into_iter()
            .find(|u| &u.id == id)
            .ok_or_else(|| AccessError::NotFound(id.to_string()))
    }

    /// Look up a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the directory cannot be read.
    pub async fn find_by_email(&self, email: &str) -> AccessResult<Option<User>> {
        Ok(self.load().await?.into_iter().find(|u| u.has_email(email)))
    }
}
