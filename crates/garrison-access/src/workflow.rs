//! Access request lifecycle: register, authenticate, approve, reject, revoke.
//!
//! ```text
//!            approve            revoke
//! pending ─────────▶ approved ─────────▶ rejected
//!    │                                      ▲
//!    └──────────────── reject ──────────────┘
//! ```
//!
//! Every operation reads the whole directory, changes at most one record and
//! writes the directory back, then appends one audit entry.

use std::collections::BTreeSet;

use garrison_audit::{AuditAction, AuditLog};
use garrison_core::{Permission, Role, User, UserId, UserStatus};
use tracing::{debug, info};

use crate::directory::UserDirectory;
use crate::error::{AccessError, AccessResult, DenialReason};
use crate::policy::AdminPolicy;
use crate::registration::Registration;

/// The access workflow over a [`UserDirectory`].
#[derive(Debug, Clone)]
pub struct AccessControl {
    directory: UserDirectory,
    audit: AuditLog,
    policy: AdminPolicy,
}

impl AccessControl {
    /// Wire the workflow.
    #[must_use]
    pub fn new(directory: UserDirectory, audit: AuditLog, policy: AdminPolicy) -> Self {
        Self {
            directory,
            audit,
            policy,
        }
    }

    /// The underlying directory.
    #[must_use]
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// File an access request. The new user is pending, unassigned and
    /// holds no permissions.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Validation`] for a blank field or missing rank
    /// - [`AccessError::DuplicateEmail`] if the email is taken (any case)
    pub async fn register(&self, registration: Registration) -> AccessResult<User> {
        registration.validate()?;
        let mut users = self.directory.load().await?;
        if users.iter().any(|u| u.has_email(&registration.email)) {
            return Err(AccessError::DuplicateEmail(
                registration.email.trim().to_string(),
            ));
        }

        let user = registration.into_pending_user();
        users.push(user.clone());
        self.directory.save(&users).await?;
        info!(user_id = %user.id, email = %user.email, "access requested");

        self.audit
            .record(
                &user,
                AuditAction::Register,
                format!(
                    "Access requested by {} ({}, {})",
                    user.display_name, user.rank, user.command
                ),
            )
            .await?;
        Ok(user)
    }

    /// Resolve a login email to an approved user.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::AuthenticationDenied`] unless the email belongs
    /// to an approved user.
    pub async fn authenticate(&self, email: &str) -> AccessResult<User> {
        let denied = |reason| AccessError::AuthenticationDenied {
            email: email.trim().to_string(),
            reason,
        };
        let user = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or_else(|| denied(DenialReason::NotRegistered))?;
        match user.status {
            UserStatus::Approved => {
                debug!(user_id = %user.id, "authenticated");
                Ok(user)
            },
            UserStatus::Pending => Err(denied(DenialReason::Pending)),
            UserStatus::Rejected => Err(denied(DenialReason::Rejected)),
        }
    }

    /// Approve a pending user, setting role and permissions in one write.
    /// An owner is granted every permission whatever `permissions` holds.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Forbidden`] if `actor` is not an approved admin, or
    ///   grants [`Role::Owner`] without being an owner
    /// - [`AccessError::Validation`] if `role` is [`Role::Unassigned`]
    /// - [`AccessError::NotFound`] if `target` does not exist
    /// - [`AccessError::InvalidTransition`] if `target` is not pending
    pub async fn approve(
        &self,
        actor: &User,
        target: &UserId,
        role: Role,
        permissions: BTreeSet<Permission>,
    ) -> AccessResult<User> {
        let mut users = self.directory.load().await?;
        let acting = users.iter().find(|u| u.id == actor.id).cloned();
        self.policy.authorize(acting.as_ref(), "approve")?;

        if role == Role::Unassigned {
            return Err(AccessError::Validation(
                "an approved user needs a role".into(),
            ));
        }
        if role == Role::Owner && acting.as_ref().is_none_or(|a| a.role != Role::Owner) {
            return Err(AccessError::Forbidden(
                "only an owner can grant the owner role".into(),
            ));
        }

        let record = find_mut(&mut users, target)?;
        if record.status != UserStatus::Pending {
            return Err(AccessError::InvalidTransition {
                action: "approve",
                email: record.email.clone(),
                from: record.status,
            });
        }
        record.status = UserStatus::Approved;
        record.role = role;
        record.permissions = if role == Role::Owner {
            Permission::all()
        } else {
            permissions
        };
        let approved = record.clone();

        self.directory.save(&users).await?;
        info!(
            user_id = %approved.id,
            role = %approved.role,
            by = %actor.email,
            "user approved"
        );

        self.audit
            .record(
                actor,
                AuditAction::ApproveUser,
                format!("Approved {} as {}", approved.email, approved.role),
            )
            .await?;
        Ok(approved)
    }

    /// Reject a pending user. Role and permissions are left as they were.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Forbidden`] if `actor` is not an approved admin
    /// - [`AccessError::NotFound`] if `target` does not exist
    /// - [`AccessError::ProtectedAccount`] if `target` is the configured owner
    /// - [`AccessError::InvalidTransition`] if `target` is not pending
    pub async fn reject(&self, actor: &User, target: &UserId) -> AccessResult<User> {
        let rejected = self
            .close_access(actor, target, "reject", UserStatus::Pending)
            .await?;
        info!(user_id = %rejected.id, by = %actor.email, "access request rejected");

        self.audit
            .record(
                actor,
                AuditAction::RejectUser,
                format!("Rejected access request from {}", rejected.email),
            )
            .await?;
        Ok(rejected)
    }

    /// Revoke an approved user's access.
    ///
    /// # Errors
    ///
    /// - [`AccessError::SelfActionBlocked`] if `target` is `actor`
    /// - [`AccessError::Forbidden`] if `actor` is not an approved admin
    /// - [`AccessError::NotFound`] if `target` does not exist
    /// - [`AccessError::ProtectedAccount`] if `target` is the configured owner
    /// - [`AccessError::InvalidTransition`] if `target` is not approved
    pub async fn revoke(&self, actor: &User, target: &UserId) -> AccessResult<User> {
        if &actor.id == target {
            return Err(AccessError::SelfActionBlocked);
        }
        let revoked = self
            .close_access(actor, target, "revoke", UserStatus::Approved)
            .await?;
        info!(user_id = %revoked.id, by = %actor.email, "access revoked");

        self.audit
            .record(
                actor,
                AuditAction::RevokeUser,
                format!("Revoked access for {}", revoked.email),
            )
            .await?;
        Ok(revoked)
    }

    /// Pending users in store order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the directory cannot be read.
    pub async fn list_pending(&self) -> AccessResult<Vec<User>> {
        Ok(self
            .directory
            .load()
            .await?
            .into_iter()
            .filter(|u| u.status == UserStatus::Pending)
            .collect())
    }

    /// Reviewed users (approved or rejected) whose display name, email or
    /// command contains `term`, ignoring case. An empty term matches all.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the directory cannot be read.
    pub async fn search_members(&self, term: &str) -> AccessResult<Vec<User>> {
        let needle = term.trim().to_lowercase();
        Ok(self
            .directory
            .load()
            .await?
            .into_iter()
            .filter(|u| u.status != UserStatus::Pending)
            .filter(|u| {
                [&u.display_name, &u.email, &u.command]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotFound`] if no user has `id`.
    pub async fn get(&self, id: &UserId) -> AccessResult<User> {
        self.directory.get(id).await
    }

    /// Shared body of reject and revoke: move `target` from `from` to
    /// rejected and persist.
    async fn close_access(
        &self,
        actor: &User,
        target: &UserId,
        action: &'static str,
        from: UserStatus,
    ) -> AccessResult<User> {
        let mut users = self.directory.load().await?;
        let acting = users.iter().find(|u| u.id == actor.id);
        self.policy.authorize(acting, action)?;

        let protected = users
            .iter()
            .find(|u| &u.id == target)
            .is_some_and(|u| self.directory.is_protected(u));
        let record = find_mut(&mut users, target)?;
        if protected {
            return Err(AccessError::ProtectedAccount(record.email.clone()));
        }
        if record.status != from {
            return Err(AccessError::InvalidTransition {
                action,
                email: record.email.clone(),
                from: record.status,
            });
        }
        record.status = UserStatus::Rejected;
        let closed = record.clone();

        self.directory.save(&users).await?;
        Ok(closed)
    }
}

fn find_mut<'a>(users: &'a mut [User], id: &UserId) -> AccessResult<&'a mut User> {
    users
        .iter_mut()
        .find(|u| &u.id == id)
        .ok_or_else(|| AccessError::NotFound(id.to_string()))
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
