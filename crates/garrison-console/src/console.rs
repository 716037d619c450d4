//! The console facade.

use std::collections::BTreeSet;
use std::sync::Arc;

use garrison_access::{
    AccessControl, AccessError, AdminPolicy, OwnerBootstrap, Registration, UserDirectory,
};
use garrison_audit::{AuditAction, AuditEntry, AuditLog};
use garrison_config::Config;
use garrison_core::{Permission, Report, ReportType, Role, Timestamp, User, UserId};
use garrison_reports::{NewReport, ReportCatalog};
use garrison_storage::{KvStore, ScopedKvStore, layout};
use tracing::{info, warn};

use crate::backup::BackupSnapshot;
use crate::dashboard::DashboardSummary;
use crate::error::{ConsoleError, ConsoleResult};
use crate::session::Session;
use crate::views::View;

/// How a [`Console`] is wired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    /// Store namespace holding the four console keys.
    pub namespace: String,
    /// Account kept present as an approved owner.
    pub owner: Option<OwnerBootstrap>,
    /// Admin check for review actions and admin views.
    pub policy: AdminPolicy,
    /// Default length of [`Console::audit_recent`].
    pub recent_limit: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            namespace: layout::DEFAULT_NAMESPACE.to_string(),
            owner: None,
            policy: AdminPolicy::enforced(),
            recent_limit: 15,
        }
    }
}

impl ConsoleSettings {
    /// Settings from a loaded [`Config`].
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let owner = config.owner.is_configured().then(|| {
            OwnerBootstrap::new(
                config.owner.email.as_str(),
                config.owner.display_name.as_str(),
                config.owner.rank,
                config.owner.command.as_str(),
            )
        });
        Self {
            namespace: config.storage.namespace.clone(),
            owner,
            policy: AdminPolicy::from_flag(config.access.enforce_admin_role),
            recent_limit: config.audit.recent_limit,
        }
    }
}

/// Store, workflows and session behind one handle.
#[derive(Debug)]
pub struct Console {
    access: AccessControl,
    reports: ReportCatalog,
    audit: AuditLog,
    session: Session,
    policy: AdminPolicy,
    recent_limit: usize,
}

impl Console {
    /// Wire a console over `store` and restore the persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::MissingOwner`] when the policy is enforced
    /// without an owner, or a persistence error for an invalid namespace or
    /// an unreadable store.
    pub async fn open(store: Arc<dyn KvStore>, settings: ConsoleSettings) -> ConsoleResult<Self> {
        if settings.owner.is_none() && settings.policy.is_enforced() {
            return Err(ConsoleError::MissingOwner);
        }
        let scope = ScopedKvStore::new(store, settings.namespace)?;
        let audit = AuditLog::new(scope.clone());
        let directory = UserDirectory::new(scope.clone(), audit.clone(), settings.owner);
        let access = AccessControl::new(directory, audit.clone(), settings.policy);
        let reports = ReportCatalog::new(scope.clone(), audit.clone());

        let mut session = Session::new(scope);
        session.restore(&access).await?;

        Ok(Self {
            access,
            reports,
            audit,
            session,
            policy: settings.policy,
            recent_limit: settings.recent_limit,
        })
    }

    /// The session context.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotLoggedIn`] when logged out.
    pub fn whoami(&self) -> ConsoleResult<&User> {
        self.session.require()
    }

    /// File an access request. No login needed.
    ///
    /// # Errors
    ///
    /// See [`AccessControl::register`].
    pub async fn register(&self, registration: Registration) -> ConsoleResult<User> {
        Ok(self.access.register(registration).await?)
    }

    /// Log in as `email`.
    ///
    /// # Errors
    ///
    /// See [`Session::login`].
    pub async fn login(&mut self, email: &str) -> ConsoleResult<User> {
        self.session.login(&self.access, &self.audit, email).await
    }

    /// Log out. Returns the user who was logged in, if any.
    ///
    /// # Errors
    ///
    /// See [`Session::logout`].
    pub async fn logout(&mut self) -> ConsoleResult<Option<User>> {
        self.session.logout(&self.audit).await
    }

    /// Resolve a requested view for the session user.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotLoggedIn`] when logged out.
    pub fn route(&self, requested: View) -> ConsoleResult<View> {
        Ok(View::route(self.session.require()?, requested))
    }

    /// Views the session user may open.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotLoggedIn`] when logged out.
    pub fn views(&self) -> ConsoleResult<Vec<View>> {
        Ok(View::visible_to(self.session.require()?))
    }

    /// Look up any user by email.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotLoggedIn`] when logged out, or
    /// [`AccessError::NotFound`] for an unknown email.
    pub async fn user_by_email(&self, email: &str) -> ConsoleResult<User> {
        self.session.require()?;
        self.access
            .directory()
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccessError::NotFound(email.trim().to_string()).into())
    }

    /// Pending access requests (the approvals view).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotLoggedIn`], [`ConsoleError::Forbidden`] for
    /// a user without admin visibility, or a persistence error.
    pub async fn pending(&self) -> ConsoleResult<Vec<User>> {
        self.open_view(View::Approvals).await?;
        Ok(self.access.list_pending().await?)
    }

    /// Reviewed members matching `term` (the users view).
    ///
    /// # Errors
    ///
    /// Same as [`pending`](Self::pending).
    pub async fn members(&self, term: &str) -> ConsoleResult<Vec<User>> {
        self.open_view(View::Users).await?;
        Ok(self.access.search_members(term).await?)
    }

    /// Approve `target` as the session user.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`], or see [`AccessControl::approve`].
    pub async fn approve(
        &self,
        target: &UserId,
        role: Role,
        permissions: BTreeSet<Permission>,
    ) -> ConsoleResult<User> {
        let actor = self.session.require()?;
        Ok(self
            .access
            .approve(actor, target, role, permissions)
            .await?)
    }

    /// Reject `target` as the session user.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`], or see [`AccessControl::reject`].
    pub async fn reject(&self, target: &UserId) -> ConsoleResult<User> {
        let actor = self.session.require()?;
        Ok(self.access.reject(actor, target).await?)
    }

    /// Revoke `target` as the session user.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`], or see [`AccessControl::revoke`].
    pub async fn revoke(&self, target: &UserId) -> ConsoleResult<User> {
        let actor = self.session.require()?;
        Ok(self.access.revoke(actor, target).await?)
    }

    /// File a report authored by the session user.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`], or see [`ReportCatalog::create`].
    pub async fn create_report(&self, draft: NewReport) -> ConsoleResult<Report> {
        let author = self.session.require()?;
        Ok(self.reports.create(author, draft).await?)
    }

    /// Reports, optionally of one type, newest first.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`] or a persistence error.
    pub async fn reports(&self, filter: Option<ReportType>) -> ConsoleResult<Vec<Report>> {
        self.session.require()?;
        Ok(self.reports.list(filter).await?)
    }

    /// Dashboard counters.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`] or a persistence error.
    pub async fn dashboard(&self) -> ConsoleResult<DashboardSummary> {
        self.session.require()?;
        let users = self.access.directory().load().await?;
        let reports = self.reports.list(None).await?;
        Ok(DashboardSummary::compute(&users, reports))
    }

    /// Newest audit entries, `limit` or the configured default.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`] or a persistence error.
    pub async fn audit_recent(&self, limit: Option<usize>) -> ConsoleResult<Vec<AuditEntry>> {
        self.session.require()?;
        Ok(self
            .audit
            .recent(limit.unwrap_or(self.recent_limit))
            .await?)
    }

    /// Every audit entry tagged `action`, newest first.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`] or a persistence error.
    pub async fn audit_by_action(&self, action: &AuditAction) -> ConsoleResult<Vec<AuditEntry>> {
        self.session.require()?;
        Ok(self.audit.by_action(action).await?)
    }

    /// Snapshot users, reports and logs. Owner only; audited as
    /// `BACKUP_EXPORT` after the snapshot is taken.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotLoggedIn`], [`ConsoleError::Forbidden`] for a
    /// non-owner, or a persistence/audit error.
    pub async fn export_backup(&self) -> ConsoleResult<BackupSnapshot> {
        let session_user = self.session.require()?;
        let actor = self.access.get(&session_user.id).await?;
        if actor.role != Role::Owner {
            return Err(ConsoleError::Forbidden(format!(
                "{} may not export backups",
                actor.email
            )));
        }

        let snapshot = BackupSnapshot {
            exported_at: Timestamp::now(),
            exported_by: actor.email.clone(),
            users: self.access.directory().load().await?,
            reports: self.reports.list(None).await?,
            logs: self.audit.entries().await?,
        };
        info!(
            by = %actor.email,
            users = snapshot.users.len(),
            reports = snapshot.reports.len(),
            logs = snapshot.logs.len(),
            "backup exported"
        );

        self.audit
            .record(
                &actor,
                AuditAction::BackupExport,
                format!(
                    "Exported {} users, {} reports, {} log entries",
                    snapshot.users.len(),
                    snapshot.reports.len(),
                    snapshot.logs.len()
                ),
            )
            .await?;
        Ok(snapshot)
    }

    /// Check the stored record of the session user against `view`.
    async fn open_view(&self, view: View) -> ConsoleResult<()> {
        let session_user = self.session.require()?;
        if !view.requires_admin() {
            return Ok(());
        }
        let stored = match self.access.get(&session_user.id).await {
            Ok(user) => Some(user),
            Err(AccessError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };
        if stored.as_ref().is_some_and(User::is_admin) {
            return Ok(());
        }
        if self.policy.is_enforced() {
            return Err(ConsoleError::Forbidden(format!(
                "the {view} view needs an administrative role"
            )));
        }
        warn!(user = %session_user.email, %view, "admin check disabled; opening admin view");
        Ok(())
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
