//! The audit log collection.

use garrison_core::{AuditEntryId, User, UserId};
use garrison_storage::{Collection, ScopedKvStore, layout};
use tracing::debug;

use crate::entry::{AuditAction, AuditEntry};
use crate::error::AuditResult;

/// Newest-first, append-only audit log stored under the `logs` key.
///
/// The log is unbounded and does not deduplicate. There is no operation to
/// edit or remove an entry.
#[derive(Debug, Clone)]
pub struct AuditLog {
    entries: Collection<AuditEntry>,
}

impl AuditLog {
    /// Open the log inside `scope`.
    #[must_use]
    pub fn new(scope: ScopedKvStore) -> Self {
        Self {
            entries: Collection::new(scope, layout::LOGS),
        }
    }

    /// Record an action. The new entry becomes the first one.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Storage`](crate::AuditError::Storage) if the log
    /// cannot be read or written.
    pub async fn append(
        &self,
        actor_id: &UserId,
        actor_email: &str,
        action: AuditAction,
        detail: impl Into<String>,
    ) -> AuditResult<AuditEntryId> {
        let entry = AuditEntry::new(actor_id.clone(), actor_email, action, detail);
        let id = entry.id.clone();
        debug!(
            entry_id = %id,
            actor = %entry.actor_email,
            action = %entry.action,
            "audit entry recorded"
        );
        self.entries.prepend(entry).await?;
        Ok(id)
    }

    /// Record an action performed by `actor`.
    ///
    /// # Errors
    ///
    /// Same as [`append`](Self::append).
    pub async fn record(
        &self,
        actor: &User,
        action: AuditAction,
        detail: impl Into<String>,
    ) -> AuditResult<AuditEntryId> {
        self.append(&actor.id, &actor.email, action, detail).await
    }

    /// All entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the log cannot be read.
    pub async fn entries(&self) -> AuditResult<Vec<AuditEntry>> {
        Ok(self.entries.load().await?)
    }

    /// The `limit` newest entries.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the log cannot be read.
    pub async fn recent(&self, limit: usize) -> AuditResult<Vec<AuditEntry>> {
        let mut entries = self.entries().await?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// Number of entries.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the log cannot be read.
    pub async fn count(&self) -> AuditResult<usize> {
        Ok(self.entries().await?.len())
    }

    /// Entries carrying `action`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the log cannot be read.
    pub async fn by_action(&self, action: &AuditAction) -> AuditResult<Vec<AuditEntry>> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .filter(|e| &e.action == action)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use garrison_core::Rank;
    use garrison_storage::MemoryKvStore;

    use super::*;

    fn log() -> AuditLog {
        let scope =
            ScopedKvStore::new(Arc::new(MemoryKvStore::new()), layout::DEFAULT_NAMESPACE).unwrap();
        AuditLog::new(scope)
    }

    #[tokio::test]
    async fn test_empty_log() {
        let log = log();
        assert!(log.entries().await.unwrap().is_empty());
        assert_eq!(log.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_is_newest_first() {
        let log = log();
        let actor = UserId::new();
        log.append(&actor, "a@x.mil", AuditAction::Register, "first")
            .await
            .unwrap();
        log.append(&actor, "a@x.mil", AuditAction::Login, "second")
            .await
            .unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].detail, "second");
        assert_eq!(entries[1].detail, "first");
    }

    #[tokio::test]
    async fn test_no_dedup() {
        let log = log();
        let actor = UserId::new();
        for _ in 0..3 {
            log.append(&actor, "a@x.mil", AuditAction::Login, "Logged in")
                .await
                .unwrap();
        }
        assert_eq!(log.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_recent_and_by_action() {
        let log = log();
        let actor = UserId::new();
        for i in 0..20 {
            let action = if i % 2 == 0 {
                AuditAction::Login
            } else {
                AuditAction::Logout
            };
            log.append(&actor, "a@x.mil", action, format!("#{i}"))
                .await
                .unwrap();
        }

        let recent = log.recent(15).await.unwrap();
        assert_eq!(recent.len(), 15);
        assert_eq!(recent[0].detail, "#19");

        let logins = log.by_action(&AuditAction::Login).await.unwrap();
        assert_eq!(logins.len(), 10);
        assert!(logins.iter().all(|e| e.action == AuditAction::Login));
        assert_eq!(logins[0].detail, "#18");
    }

    #[tokio::test]
    async fn test_record_uses_actor_identity() {
        let log = log();
        let user = User::pending("b@x.mil", "COSTA", Rank::Major, "SEFA");
        log.record(&user, AuditAction::Custom("NOTE".into()), "free-form")
            .await
            .unwrap();

        let entry = &log.entries().await.unwrap()[0];
        assert_eq!(entry.actor_id, user.id);
        assert_eq!(entry.actor_email, "b@x.mil");
        assert_eq!(entry.action.as_str(), "NOTE");
    }
}
