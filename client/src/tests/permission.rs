use lostfound_shared::account::{Actor, Role};
use lostfound_shared::claim::ClaimStatus;

use crate::permission::{can_modify, claim_actions, ClaimAction};

fn actor(role: Role) -> Actor {
    Actor {
        name: "Chidi".to_owned(),
        email: "chidi@campus.edu".to_owned(),
        role,
    }
}

/// Test: owners and admins may modify, everyone else may not.
#[test]
fn modification_is_owner_or_admin() {
    let owner = actor(Role::User);
    assert!(can_modify(&owner, Some("chidi@campus.edu")));
    assert!(!can_modify(&owner, Some("somebody@campus.edu")));
    assert!(!can_modify(&owner, None));

    let admin = actor(Role::Admin);
    assert!(can_modify(&admin, Some("somebody@campus.edu")));
    assert!(can_modify(&admin, None));

    // Moderators get no special rights over items.
    let moderator = actor(Role::Moderator);
    assert!(!can_modify(&moderator, Some("somebody@campus.edu")));
}

/// Test: the full (role, status) action matrix.
#[test]
fn claim_action_matrix() {
    use ClaimAction::*;

    for status in [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::Reviewed,
    ] {
        assert!(claim_actions(&Role::User, &status).is_empty());
        assert!(claim_actions(&Role::Moderator, &status).is_empty());
    }

    assert_eq!(
        claim_actions(&Role::Admin, &ClaimStatus::Pending),
        [Approve, Reject]
    );
    assert_eq!(
        claim_actions(&Role::Admin, &ClaimStatus::Reviewed),
        [Approve, Reject]
    );
    assert_eq!(
        claim_actions(&Role::Admin, &ClaimStatus::Approved),
        [Rollback]
    );
    assert_eq!(
        claim_actions(&Role::Admin, &ClaimStatus::Rejected),
        [Rollback]
    );
    assert!(claim_actions(
        &Role::Admin,
        &ClaimStatus::Other("ESCALATED".to_owned())
    )
    .is_empty());
}
