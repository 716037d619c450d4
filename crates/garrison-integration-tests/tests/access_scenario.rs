//! End-to-end access request scenario over the library crates.
//!
//! Register → pending list → approve with a role and permissions →
//! authenticate, then the terminal rejected state and self-revocation.

use std::collections::BTreeSet;
use std::sync::Arc;

use garrison_access::{
    AccessControl, AccessError, AdminPolicy, DenialReason, OwnerBootstrap, Registration,
    UserDirectory,
};
use garrison_audit::{AuditAction, AuditLog};
use garrison_core::{Permission, Rank, Role, UserStatus};
use garrison_storage::{MemoryKvStore, ScopedKvStore, layout};

const OWNER_EMAIL: &str = "chief@x.mil";

fn wire() -> (AccessControl, AuditLog) {
    let scope =
        ScopedKvStore::new(Arc::new(MemoryKvStore::new()), layout::DEFAULT_NAMESPACE).unwrap();
    let audit = AuditLog::new(scope.clone());
    let owner = OwnerBootstrap::new(OWNER_EMAIL, "CHIEF", Rank::Colonel, "COMGEP");
    let directory = UserDirectory::new(scope, audit.clone(), Some(owner));
    (
        AccessControl::new(directory, audit.clone(), AdminPolicy::enforced()),
        audit,
    )
}

#[tokio::test]
async fn test_register_approve_authenticate_scenario() {
    let (access, audit) = wire();

    let registered = access
        .register(Registration::new(
            "a@x.mil",
            "SILVA",
            Rank::Captain,
            "COMGEP",
        ))
        .await
        .unwrap();
    assert_eq!(registered.status, UserStatus::Pending);
    assert_eq!(registered.role, Role::Unassigned);
    assert!(registered.permissions.is_empty());

    let pending = access.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].email, "a@x.mil");

    let owner = access.authenticate(OWNER_EMAIL).await.unwrap();
    access
        .approve(
            &owner,
            &registered.id,
            Role::Comgep,
            BTreeSet::from([Permission::GenerateReports]),
        )
        .await
        .unwrap();

    let user = access.authenticate("a@x.mil").await.unwrap();
    assert_eq!(user.id, registered.id);
    assert_eq!(user.status, UserStatus::Approved);
    assert_eq!(user.role, Role::Comgep);
    assert_eq!(
        user.permissions,
        BTreeSet::from([Permission::GenerateReports])
    );

    let entries = audit.entries().await.unwrap();
    assert_eq!(entries[0].action, AuditAction::ApproveUser);
    assert_eq!(entries[0].actor_email, OWNER_EMAIL);
    assert!(access.list_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_is_terminal() {
    let (access, _audit) = wire();
    let owner = access.authenticate(OWNER_EMAIL).await.unwrap();
    let user = access
        .register(Registration::new("b@x.mil", "COSTA", Rank::Major, "SEFA"))
        .await
        .unwrap();

    access.reject(&owner, &user.id).await.unwrap();
    let err = access.authenticate("b@x.mil").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::AuthenticationDenied {
            reason: DenialReason::Rejected,
            ..
        }
    ));

    let err = access
        .approve(&owner, &user.id, Role::Sefa, BTreeSet::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccessError::InvalidTransition {
            from: UserStatus::Rejected,
            ..
        }
    ));
}

#[tokio::test]
async fn test_pending_user_cannot_log_in() {
    let (access, _audit) = wire();
    access
        .register(Registration::new("c@x.mil", "SOUZA", Rank::Aspirant, "DIRAD"))
        .await
        .unwrap();
    let err = access.authenticate("C@X.MIL").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::AuthenticationDenied {
            reason: DenialReason::Pending,
            ..
        }
    ));
}

#[tokio::test]
async fn test_self_revocation_refused_and_record_unchanged() {
    let (access, _audit) = wire();
    let owner = access.authenticate(OWNER_EMAIL).await.unwrap();
    let user = access
        .register(Registration::new("d@x.mil", "LIMA", Rank::Captain, "COMGEP"))
        .await
        .unwrap();
    let admin = access
        .approve(&owner, &user.id, Role::Comgep, BTreeSet::new())
        .await
        .unwrap();

    let err = access.revoke(&admin, &admin.id).await.unwrap_err();
    assert!(matches!(err, AccessError::SelfActionBlocked));
    assert_eq!(access.get(&admin.id).await.unwrap(), admin);
}

#[tokio::test]
async fn test_duplicate_email_any_case() {
    let (access, _audit) = wire();
    access
        .register(Registration::new("e@x.mil", "ROCHA", Rank::Major, "SEFA"))
        .await
        .unwrap();
    let err = access
        .register(Registration::new("E@X.mil", "ROCHA", Rank::Major, "SEFA"))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::DuplicateEmail(_)));
}
