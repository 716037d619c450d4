//! The configured owner survives deletion and tampering of the stored
//! user directory.

mod common;

use std::sync::Arc;

use common::{ConsoleHarness, OWNER_EMAIL};
use garrison_audit::AuditAction;
use garrison_core::{Role, User, UserStatus};
use garrison_storage::{KvStore, ScopedKvStore, layout};

fn scope(harness: &ConsoleHarness) -> ScopedKvStore {
    ScopedKvStore::new(
        Arc::clone(&harness.store) as Arc<dyn KvStore>,
        layout::DEFAULT_NAMESPACE,
    )
    .unwrap()
}

async fn stored_users(harness: &ConsoleHarness) -> Vec<User> {
    scope(harness)
        .get_json(layout::USERS)
        .await
        .unwrap()
        .unwrap_or_default()
}

#[tokio::test]
async fn test_absent_owner_created_exactly_once() {
    let harness = ConsoleHarness::new();
    harness.owner().await;
    harness.owner().await;

    let users = stored_users(&harness).await;
    let owners: Vec<_> = users.iter().filter(|u| u.has_email(OWNER_EMAIL)).collect();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].role, Role::Owner);
    assert_eq!(owners[0].status, UserStatus::Approved);
}

#[tokio::test]
async fn test_tampered_owner_restored_on_next_read() {
    let harness = ConsoleHarness::new();
    let mut console = harness.owner().await;
    console.logout().await.unwrap();

    let mut users = stored_users(&harness).await;
    for user in users.iter_mut().filter(|u| u.has_email(OWNER_EMAIL)) {
        user.role = Role::Dirad;
        user.status = UserStatus::Rejected;
    }
    scope(&harness)
        .set_json(layout::USERS, &users)
        .await
        .unwrap();

    let console = harness.owner().await;
    let owner = console.whoami().unwrap();
    assert_eq!(owner.role, Role::Owner);
    assert_eq!(owner.status, UserStatus::Approved);

    let restored = console
        .audit_by_action(&AuditAction::OwnerRestored)
        .await
        .unwrap();
    assert_eq!(restored.len(), 2);
    assert!(restored[0].detail.contains("restored"));
}

#[tokio::test]
async fn test_deleted_directory_recreates_owner() {
    let harness = ConsoleHarness::new();
    harness.owner().await;
    scope(&harness).delete(layout::USERS).await.unwrap();

    let console = harness.open().await;
    assert_eq!(console.whoami().unwrap().email, OWNER_EMAIL);
    assert_eq!(stored_users(&harness).await.len(), 1);
}
