use std::collections::BTreeSet;
use std::sync::Arc;

use garrison_audit::{AuditAction, AuditLog};
use garrison_core::{Permission, Rank, Role, User, UserId, UserStatus};
use garrison_storage::{MemoryKvStore, ScopedKvStore, layout};

use super::*;
use crate::bootstrap::OwnerBootstrap;
use crate::directory::UserDirectory;
use crate::error::{AccessError, DenialReason};
use crate::policy::AdminPolicy;
use crate::registration::Registration;

const OWNER_EMAIL: &str = "chief@x.mil";

struct Fixture {
    access: AccessControl,
    audit: AuditLog,
}

fn fixture_with(policy: AdminPolicy) -> Fixture {
    let scope =
        ScopedKvStore::new(Arc::new(MemoryKvStore::new()), layout::DEFAULT_NAMESPACE).unwrap();
    let audit = AuditLog::new(scope.clone());
    let owner = OwnerBootstrap::new(OWNER_EMAIL, "CHIEF", Rank::Colonel, "COMGEP");
    let directory = UserDirectory::new(scope, audit.clone(), Some(owner));
    Fixture {
        access: AccessControl::new(directory, audit.clone(), policy),
        audit,
    }
}

fn fixture() -> Fixture {
    fixture_with(AdminPolicy::enforced())
}

impl Fixture {
    async fn owner(&self) -> User {
        self.access.authenticate(OWNER_EMAIL).await.unwrap()
    }

    async fn register(&self, email: &str) -> User {
        self.access
            .register(Registration::new(email, "SILVA", Rank::Captain, "COMGEP"))
            .await
            .unwrap()
    }

    /// Register and approve `email` with `role`, acting as the owner.
    async fn member(&self, email: &str, role: Role) -> User {
        let owner = self.owner().await;
        let user = self.register(email).await;
        self.access
            .approve(&owner, &user.id, role, BTreeSet::new())
            .await
            .unwrap()
    }
}

fn perms(list: &[Permission]) -> BTreeSet<Permission> {
    list.iter().copied().collect()
}

// ---------------------------------------------------------------------------
// register
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_registration_is_pending_unassigned_without_permissions() {
    let f = fixture();
    let user = f.register("a@x.mil").await;

    assert_eq!(user.status, UserStatus::Pending);
    assert_eq!(user.role, Role::Unassigned);
    assert!(user.permissions.is_empty());

    let stored = f.access.get(&user.id).await.unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn test_registration_is_audited_by_new_user() {
    let f = fixture();
    let user = f.register("a@x.mil").await;

    let entry = &f.audit.entries().await.unwrap()[0];
    assert_eq!(entry.action, AuditAction::Register);
    assert_eq!(entry.actor_id, user.id);
    assert_eq!(entry.actor_email, "a@x.mil");
}

#[tokio::test]
async fn test_duplicate_email_refused_ignoring_case() {
    let f = fixture();
    f.register("a@x.mil").await;

    let err = f
        .access
        .register(Registration::new("A@X.MIL", "OTHER", Rank::Major, "SEFA"))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::DuplicateEmail(_)));
    assert_eq!(f.access.list_pending().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_owner_email_cannot_be_registered() {
    let f = fixture();
    let err = f
        .access
        .register(Registration::new(OWNER_EMAIL, "X", Rank::Major, "SEFA"))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::DuplicateEmail(_)));
}

#[tokio::test]
async fn test_invalid_registration_writes_nothing() {
    let f = fixture();
    let err = f
        .access
        .register(Registration::new("a@x.mil", "SILVA", Rank::None, "COMGEP"))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)));
    assert!(f.access.list_pending().await.unwrap().is_empty());
    assert!(f.audit.by_action(&AuditAction::Register).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// authenticate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_authenticate_reasons() {
    let f = fixture();
    let owner = f.owner().await;

    let err = f.access.authenticate("ghost@x.mil").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::AuthenticationDenied {
            reason: DenialReason::NotRegistered,
            ..
        }
    ));

    let pending = f.register("p@x.mil").await;
    let err = f.access.authenticate("p@x.mil").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::AuthenticationDenied {
            reason: DenialReason::Pending,
            ..
        }
    ));

    f.access.reject(&owner, &pending.id).await.unwrap();
    let err = f.access.authenticate("p@x.mil").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::AuthenticationDenied {
            reason: DenialReason::Rejected,
            ..
        }
    ));
}

#[tokio::test]
async fn test_authenticate_ignores_case() {
    let f = fixture();
    let user = f.member("a@x.mil", Role::Sefa).await;
    let found = f.access.authenticate("  A@x.MIL ").await.unwrap();
    assert_eq!(found.id, user.id);
}

// ---------------------------------------------------------------------------
// approve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_approve_then_authenticate() {
    let f = fixture();
    let owner = f.owner().await;
    let user = f.register("a@x.mil").await;

    let granted = perms(&[Permission::GenerateReports, Permission::ViewDisciplinary]);
    f.access
        .approve(&owner, &user.id, Role::Comgep, granted.clone())
        .await
        .unwrap();

    let logged_in = f.access.authenticate("a@x.mil").await.unwrap();
    assert_eq!(logged_in.status, UserStatus::Approved);
    assert_eq!(logged_in.role, Role::Comgep);
    assert_eq!(logged_in.permissions, granted);

    let entry = &f.audit.entries().await.unwrap()[0];
    assert_eq!(entry.action, AuditAction::ApproveUser);
    assert_eq!(entry.actor_id, owner.id);
    assert!(entry.detail.contains("a@x.mil"));
    assert!(entry.detail.contains("COMGEP"));
}

#[tokio::test]
async fn test_approve_requires_role() {
    let f = fixture();
    let owner = f.owner().await;
    let user = f.register("a@x.mil").await;

    let err = f
        .access
        .approve(&owner, &user.id, Role::Unassigned, BTreeSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Validation(_)));
    assert_eq!(f.access.get(&user.id).await.unwrap().status, UserStatus::Pending);
}

#[tokio::test]
async fn test_only_owner_grants_owner() {
    let f = fixture();
    let admin = f.member("admin@x.mil", Role::Dirad).await;
    let user = f.register("a@x.mil").await;

    let err = f
        .access
        .approve(&admin, &user.id, Role::Owner, BTreeSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));

    let owner = f.owner().await;
    let promoted = f
        .access
        .approve(&owner, &user.id, Role::Owner, Permission::all())
        .await
        .unwrap();
    assert_eq!(promoted.role, Role::Owner);
}

#[tokio::test]
async fn test_owner_approval_grants_every_permission() {
    let f = fixture();
    let owner = f.owner().await;
    let user = f.register("a@x.mil").await;

    let promoted = f
        .access
        .approve(
            &owner,
            &user.id,
            Role::Owner,
            BTreeSet::from([Permission::GenerateReports]),
        )
        .await
        .unwrap();
    assert_eq!(promoted.permissions, Permission::all());
    assert!(promoted.has_permission(Permission::ApproveUsers));
    assert_eq!(
        f.access.get(&user.id).await.unwrap().permissions,
        Permission::all()
    );
}

#[tokio::test]
async fn test_pending_user_cannot_approve() {
    let f = fixture();
    let requester = f.register("r@x.mil").await;
    let user = f.register("a@x.mil").await;

    let err = f
        .access
        .approve(&requester, &user.id, Role::Sefa, BTreeSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
    assert_eq!(f.access.list_pending().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_actor_is_reloaded_from_store() {
    let f = fixture();
    let owner = f.owner().await;
    let admin = f.member("admin@x.mil", Role::Sefa).await;
    f.access.revoke(&owner, &admin.id).await.unwrap();

    // `admin` still says approved/SEFA, but the stored record is rejected.
    let user = f.register("a@x.mil").await;
    let err = f.access.reject(&admin, &user.id).await.unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
}

#[tokio::test]
async fn test_unregistered_actor_forbidden() {
    let f = fixture();
    let user = f.register("a@x.mil").await;
    let mut stranger = User::pending("s@x.mil", "S", Rank::Major, "SEFA");
    stranger.role = Role::Owner;
    stranger.status = UserStatus::Approved;

    let err = f
        .access
        .approve(&stranger, &user.id, Role::Sefa, BTreeSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
}

#[tokio::test]
async fn test_unchecked_policy_lets_anyone_review() {
    let f = fixture_with(AdminPolicy::unchecked());
    let requester = f.register("r@x.mil").await;
    let user = f.register("a@x.mil").await;

    let approved = f
        .access
        .approve(&requester, &user.id, Role::Sefa, BTreeSet::new())
        .await
        .unwrap();
    assert_eq!(approved.status, UserStatus::Approved);
}

#[tokio::test]
async fn test_approve_missing_target() {
    let f = fixture();
    let owner = f.owner().await;
    let err = f
        .access
        .approve(&owner, &UserId::new(), Role::Sefa, BTreeSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// reject / revoke
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_reject_is_terminal() {
    let f = fixture();
    let owner = f.owner().await;
    let user = f.register("a@x.mil").await;

    let rejected = f.access.reject(&owner, &user.id).await.unwrap();
    assert_eq!(rejected.status, UserStatus::Rejected);
    assert_eq!(rejected.role, Role::Unassigned);

    let err = f
        .access
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

    let entry = &f.audit.entries().await.unwrap()[0];
    assert_eq!(entry.action, AuditAction::RejectUser);
}

#[tokio::test]
async fn test_reject_requires_pending() {
    let f = fixture();
    let owner = f.owner().await;
    let member = f.member("a@x.mil", Role::Sefa).await;

    let err = f.access.reject(&owner, &member.id).await.unwrap_err();
    assert!(matches!(err, AccessError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_revoke_self_is_blocked() {
    let f = fixture();
    let admin = f.member("admin@x.mil", Role::Comgep).await;

    let err = f.access.revoke(&admin, &admin.id).await.unwrap_err();
    assert!(matches!(err, AccessError::SelfActionBlocked));
    assert_eq!(f.access.get(&admin.id).await.unwrap(), admin);
}

#[tokio::test]
async fn test_revoke_approved_user() {
    let f = fixture();
    let owner = f.owner().await;
    let member = f.member("a@x.mil", Role::Sefa).await;

    let revoked = f.access.revoke(&owner, &member.id).await.unwrap();
    assert_eq!(revoked.status, UserStatus::Rejected);
    assert!(f.access.authenticate("a@x.mil").await.is_err());
    assert_eq!(
        f.audit.entries().await.unwrap()[0].action,
        AuditAction::RevokeUser
    );
}

#[tokio::test]
async fn test_revoke_requires_approved() {
    let f = fixture();
    let owner = f.owner().await;
    let pending = f.register("a@x.mil").await;
    let err = f.access.revoke(&owner, &pending.id).await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::InvalidTransition {
            action: "revoke",
            ..
        }
    ));
}

#[tokio::test]
async fn test_owner_is_protected() {
    let f = fixture();
    let owner = f.owner().await;
    let admin = f.member("admin@x.mil", Role::Sefa).await;

    let err = f.access.revoke(&admin, &owner.id).await.unwrap_err();
    assert!(matches!(err, AccessError::ProtectedAccount(_)));
    assert_eq!(f.owner().await.status, UserStatus::Approved);
}

// ---------------------------------------------------------------------------
// queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_pending_in_store_order() {
    let f = fixture();
    f.register("first@x.mil").await;
    f.member("middle@x.mil", Role::Sefa).await;
    f.register("last@x.mil").await;

    let emails: Vec<_> = f
        .access
        .list_pending()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.email)
        .collect();
    assert_eq!(emails, vec!["first@x.mil", "last@x.mil"]);
}

#[tokio::test]
async fn test_search_members_skips_pending() {
    let f = fixture();
    f.member("silva@x.mil", Role::Sefa).await;
    f.register("silva.pending@x.mil").await;

    let found = f.access.search_members("SILVA").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "silva@x.mil");

    // Owner and member both reviewed; empty term lists them all.
    assert_eq!(f.access.search_members("").await.unwrap().len(), 2);
    assert!(f.access.search_members("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_matches_command() {
    let f = fixture();
    f.member("a@x.mil", Role::Dirad).await;
    let found = f.access.search_members("comgep").await.unwrap();
    // Both the owner and the member are in COMGEP.
    assert_eq!(found.len(), 2);
}
