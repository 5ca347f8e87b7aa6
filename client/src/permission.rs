//! Client-side permission predicates.
//!
//! Advisory only: these decide which affordances to show, never whether an
//! operation succeeds. The server re-checks every mutating call, and a stale
//! affordance simply earns a 403 at the gateway.

use lostfound_shared::account::{Actor, Role};
use lostfound_shared::claim::ClaimStatus;

/// Whether `actor` may edit or delete a record owned by `owner_email`.
/// Admins may modify anything; everyone else only their own records. A
/// record with no owner on it is modifiable by admins alone.
pub fn can_modify(actor: &Actor, owner_email: Option<&str>) -> bool {
    if actor.role.is_admin() {
        return true;
    }
    owner_email.map_or(false, |email| email == actor.email)
}

/// Mutations an actor may be offered on a claim in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimAction {
    Approve,
    Reject,
    Rollback,
}

/// The action set for a (role, status) pair. Non-admins get nothing,
/// regardless of status. `REVIEWED` behaves like `PENDING` for verdicts; the
/// two terminal states only offer the rollback reset. Unknown statuses carry
/// no actions.
pub fn claim_actions(role: &Role, status: &ClaimStatus) -> &'static [ClaimAction] {
    if !role.is_admin() {
        return &[];
    }
    match status {
        ClaimStatus::Pending | ClaimStatus::Reviewed => {
            &[ClaimAction::Approve, ClaimAction::Reject]
        }
        ClaimStatus::Approved | ClaimStatus::Rejected => &[ClaimAction::Rollback],
        ClaimStatus::Other(_) => &[],
    }
}
