//! The logged-in user, persisted under `current_session_user`.

use garrison_access::{AccessControl, AccessError};
use garrison_audit::{AuditAction, AuditLog};
use garrison_core::{User, UserStatus};
use garrison_storage::{ScopedKvStore, Slot, layout};
use tracing::{debug, info, warn};

use crate::error::{ConsoleError, ConsoleResult};

/// Explicit session context.
///
/// Holds an in-memory copy of the session user and mirrors it to the store
/// so a later process can [`restore`](Self::restore) it.
#[derive(Debug, Clone)]
pub struct Session {
    slot: Slot<User>,
    current: Option<User>,
}

impl Session {
    /// A logged-out session bound to `scope`.
    #[must_use]
    pub fn new(scope: ScopedKvStore) -> Self {
        Self {
            slot: Slot::new(scope, layout::CURRENT_SESSION_USER),
            current: None,
        }
    }

    /// Load the persisted session user.
    ///
    /// The snapshot is refreshed from the directory so role and status
    /// changes made since login take effect. A user who no longer exists or
    /// is no longer approved is logged out and the key removed.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the session key or directory cannot be
    /// read.
    pub async fn restore(&mut self, access: &AccessControl) -> ConsoleResult<Option<&User>> {
        let Some(snapshot) = self.slot.get().await? else {
            self.current = None;
            return Ok(None);
        };

        let fresh = match access.get(&snapshot.id).await {
            Ok(user) => Some(user),
            Err(AccessError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };
        match fresh {
            Some(user) if user.status == UserStatus::Approved => {
                if user != snapshot {
                    self.slot.set(&user).await?;
                    debug!(user_id = %user.id, "session snapshot refreshed");
                }
                debug!(user_id = %user.id, "session restored");
                self.current = Some(user);
            },
            other => {
                warn!(
                    user_id = %snapshot.id,
                    status = ?other.map(|u| u.status),
                    "stored session no longer valid; logging out"
                );
                self.slot.clear().await?;
                self.current = None;
            },
        }
        Ok(self.current.as_ref())
    }

    /// Authenticate `email` and make it the session user, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Access`] if authentication is refused, or a
    /// persistence/audit error.
    pub async fn login(
        &mut self,
        access: &AccessControl,
        audit: &AuditLog,
        email: &str,
    ) -> ConsoleResult<User> {
        let user = access.authenticate(email).await?;
        self.slot.set(&user).await?;
        self.current = Some(user.clone());
        info!(user_id = %user.id, email = %user.email, "logged in");

        audit
            .record(&user, AuditAction::Login, "Logged in")
            .await?;
        Ok(user)
    }

    /// End the session. Returns the user who was logged in, if any.
    ///
    /// # Errors
    ///
    /// Returns a persistence/audit error.
    pub async fn logout(&mut self, audit: &AuditLog) -> ConsoleResult<Option<User>> {
        let Some(user) = self.current.take() else {
            self.slot.clear().await?;
            return Ok(None);
        };
        audit
            .record(&user, AuditAction::Logout, "Logged out")
            .await?;
        self.slot.clear().await?;
        info!(user_id = %user.id, "logged out");
        Ok(Some(user))
    }

    /// The session user, if logged in.
    #[must_use]
    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// The session user.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotLoggedIn`] when logged out.
    pub fn require(&self) -> ConsoleResult<&User> {
        self.current.as_ref().ok_or(ConsoleError::NotLoggedIn)
    }
}
