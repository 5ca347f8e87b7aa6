//! The claim lifecycle view-model.
//!
//! [`ClaimBoard`] is the admin triage surface: it holds the full claim list,
//! derives role-appropriate actions per record, applies optimistic status
//! patches on successful mutations, and is refreshed wholesale by the
//! poller. [`MyClaims`] is the claimant's own-claims surface. Transition
//! legality is never validated here; the board only offers affordances
//! consistent with the expected graph and lets the server enforce it.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use lostfound_shared::claim::handle::ClaimCreateDescriptor;
use lostfound_shared::claim::{ClaimRecord, ClaimStatus};

use crate::api::{self, claims as requests};
use crate::notify::Notice;
use crate::permission::{claim_actions, ClaimAction};
use crate::view::paging::{self, PageView};
use crate::view::{report_fetch_error, Refresh};
use crate::{Context, Error};

pub use crate::api::claims::ClaimTarget;

/// Client-side status filter; a pure predicate over the fetched collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ClaimStatus),
}

impl StatusFilter {
    fn matches(&self, status: &ClaimStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Status breakdown of the full (unfiltered) collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClaimCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub reviewed: usize,
}

struct ViewState {
    filter: StatusFilter,
    page: usize,
}

pub struct ClaimBoard {
    claims: RwLock<Vec<ClaimRecord>>,
    view: Mutex<ViewState>,
    in_flight: AtomicBool,
    last_updated: RwLock<Option<DateTime<Utc>>>,
    per_page: usize,
}

impl ClaimBoard {
    pub fn new(per_page: usize) -> Self {
        Self {
            claims: RwLock::new(Vec::new()),
            view: Mutex::new(ViewState {
                filter: StatusFilter::All,
                page: 1,
            }),
            in_flight: AtomicBool::new(false),
            last_updated: RwLock::new(None),
            per_page: per_page.max(1),
        }
    }

    /// Replaces the collection with the server's current full list.
    ///
    /// Safe to call concurrently with itself: an overlapping call is dropped
    /// (`Refresh::Skipped`), not queued. On failure the prior collection
    /// stays visible; a 401 clears the session (gateway) while a 403 leaves
    /// both session and data intact.
    pub async fn refresh(&self, cx: &Context) -> Result<Refresh, Error> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(Refresh::Skipped);
        }
        let result = self.refresh_inner(cx).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn refresh_inner(&self, cx: &Context) -> Result<Refresh, Error> {
        if let Err(err) = cx.require_session() {
            report_fetch_error(cx, &err, "claims");
            return Err(err);
        }

        match api::call(cx, requests::FetchClaims).await {
            Ok(fresh) => {
                let unchanged = {
                    let current = self.claims.read();
                    !current.is_empty() && *current == fresh
                };
                if unchanged {
                    tracing::debug!("claim refresh returned identical data");
                    return Ok(Refresh::Unchanged);
                }
                let count = fresh.len();
                *self.claims.write() = fresh;
                *self.last_updated.write() = Some(Utc::now());
                tracing::debug!(count, "claim collection replaced");
                Ok(Refresh::Updated(count))
            }
            Err(err) => {
                report_fetch_error(cx, &err, "claims");
                Err(err)
            }
        }
    }

    /// Admin verdict: moves a claim to `APPROVED` or `REJECTED`.
    ///
    /// The admin check runs here as well as in the UI so a stale affordance
    /// cannot slip a call through; the server still has the final word. On
    /// success the matching local record is patched optimistically and the
    /// caller should kick its poller to resync shortly after.
    pub async fn update_status(
        &self,
        cx: &Context,
        id: u64,
        status: ClaimStatus,
    ) -> Result<(), Error> {
        self.require_admin(cx, "update claim status")?;

        match api::call(
            cx,
            requests::UpdateClaimStatus {
                id,
                status: status.clone(),
            },
        )
        .await
        {
            Ok(()) => {
                self.patch_status(id, status.clone());
                cx.notifier().notify(Notice::success(format!(
                    "Claim status updated to {status} successfully!"
                )));
                Ok(())
            }
            Err(err) => {
                self.report_mutation_error(cx, &err, "update claim status");
                Err(err)
            }
        }
    }

    pub async fn approve(&self, cx: &Context, id: u64) -> Result<(), Error> {
        self.update_status(cx, id, ClaimStatus::Approved).await
    }

    pub async fn reject(&self, cx: &Context, id: u64) -> Result<(), Error> {
        self.update_status(cx, id, ClaimStatus::Rejected).await
    }

    /// Admin reset out of a terminal state. Always lands on `PENDING`
    /// whichever of `APPROVED`/`REJECTED` it came from; a deliberate reset,
    /// not an inverse.
    pub async fn rollback(&self, cx: &Context, id: u64) -> Result<(), Error> {
        self.require_admin(cx, "rollback claims")?;

        match api::call(cx, requests::RollbackClaim { id }).await {
            Ok(()) => {
                self.patch_status(id, ClaimStatus::Pending);
                cx.notifier().notify(Notice::success(
                    "Claim decision rolled back to PENDING successfully!",
                ));
                Ok(())
            }
            Err(err) => {
                self.report_mutation_error(cx, &err, "rollback claims");
                Err(err)
            }
        }
    }

    fn require_admin(&self, cx: &Context, action: &str) -> Result<(), Error> {
        let session = cx.require_session()?;
        if session.is_admin() {
            return Ok(());
        }
        let err = Error::Forbidden(format!("admin privileges are required to {action}"));
        cx.notifier().notify(Notice::error(format!(
            "Access denied. You need admin privileges to {action}."
        )));
        Err(err)
    }

    fn report_mutation_error(&self, cx: &Context, err: &Error, action: &str) {
        match err {
            Error::AuthExpired(_) => {}
            Error::Forbidden(_) => cx.notifier().notify(Notice::error(format!(
                "Access denied. You need admin privileges to {action}."
            ))),
            other => cx
                .notifier()
                .notify(Notice::error(format!("Failed to {action}: {other}"))),
        }
    }

    fn patch_status(&self, id: u64, status: ClaimStatus) {
        let mut claims = self.claims.write();
        if let Some(claim) = claims.iter_mut().find(|claim| claim.id == id) {
            claim.status = status;
        }
        drop(claims);
        *self.last_updated.write() = Some(Utc::now());
    }

    /// Actions the given claim should offer, based on the current session.
    pub fn actions(&self, cx: &Context, claim: &ClaimRecord) -> &'static [ClaimAction] {
        match cx.actor() {
            Some(actor) => claim_actions(&actor.role, &claim.status),
            None => &[],
        }
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        let mut view = self.view.lock();
        if view.filter != filter {
            view.filter = filter;
            view.page = 1;
        }
    }

    pub fn filter(&self) -> StatusFilter {
        self.view.lock().filter.clone()
    }

    pub fn set_page(&self, page: usize) {
        let total_pages = self.current_total_pages();
        self.view.lock().page = paging::clamp_page(page, total_pages);
    }

    pub fn next_page(&self) {
        let total_pages = self.current_total_pages();
        let mut view = self.view.lock();
        view.page = paging::clamp_page(view.page + 1, total_pages);
    }

    pub fn prev_page(&self) {
        let total_pages = self.current_total_pages();
        let mut view = self.view.lock();
        view.page = paging::clamp_page(view.page.saturating_sub(1), total_pages);
    }

    fn current_total_pages(&self) -> usize {
        let filtered = self.filtered();
        (filtered.len() + self.per_page - 1) / self.per_page
    }

    fn filtered(&self) -> Vec<ClaimRecord> {
        let claims = self.claims.read();
        let filter = self.view.lock().filter.clone();
        claims
            .iter()
            .filter(|claim| filter.matches(&claim.status))
            .cloned()
            .collect()
    }

    /// The current page of the filtered collection.
    pub fn page(&self) -> PageView<ClaimRecord> {
        let filtered = self.filtered();
        let page = self.view.lock().page;
        paging::paginate(&filtered, page, self.per_page)
    }

    /// Counts over the full, unfiltered collection.
    pub fn status_counts(&self) -> ClaimCounts {
        let claims = self.claims.read();
        let mut counts = ClaimCounts {
            total: claims.len(),
            ..ClaimCounts::default()
        };
        for claim in claims.iter() {
            match claim.status {
                ClaimStatus::Pending => counts.pending += 1,
                ClaimStatus::Approved => counts.approved += 1,
                ClaimStatus::Rejected => counts.rejected += 1,
                ClaimStatus::Reviewed => counts.reviewed += 1,
                ClaimStatus::Other(_) => {}
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.claims.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.read().is_empty()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read()
    }
}

/// The claimant's own claims. No verdict actions here; deletion is final
/// from the client's perspective (no rollback path).
pub struct MyClaims {
    claims: RwLock<Vec<ClaimRecord>>,
    in_flight: AtomicBool,
}

impl MyClaims {
    pub fn new() -> Self {
        Self {
            claims: RwLock::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn refresh(&self, cx: &Context) -> Result<Refresh, Error> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(Refresh::Skipped);
        }
        let result = self.refresh_inner(cx).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn refresh_inner(&self, cx: &Context) -> Result<Refresh, Error> {
        if let Err(err) = cx.require_session() {
            report_fetch_error(cx, &err, "your claims");
            return Err(err);
        }
        match api::call(cx, requests::FetchMyClaims).await {
            Ok(fresh) => {
                let count = fresh.len();
                *self.claims.write() = fresh;
                Ok(Refresh::Updated(count))
            }
            Err(err) => {
                report_fetch_error(cx, &err, "your claims");
                Err(err)
            }
        }
    }

    pub async fn delete(&self, cx: &Context, id: u64) -> Result<(), Error> {
        cx.require_session()?;
        match api::call(cx, requests::DeleteClaim { id }).await {
            Ok(()) => {
                self.claims.write().retain(|claim| claim.id != id);
                cx.notifier()
                    .notify(Notice::success("Claim request deleted successfully"));
                Ok(())
            }
            Err(Error::NotFound(message)) => {
                // Already gone server-side; drop the stale local row too.
                self.claims.write().retain(|claim| claim.id != id);
                cx.notifier()
                    .notify(Notice::warning("Claim request no longer exists"));
                Err(Error::NotFound(message))
            }
            Err(err) => {
                if !err.is_auth_expired() {
                    cx.notifier()
                        .notify(Notice::error(format!("Failed to delete claim: {err}")));
                }
                Err(err)
            }
        }
    }

    pub fn claims(&self) -> Vec<ClaimRecord> {
        self.claims.read().clone()
    }

    pub fn len(&self) -> usize {
        self.claims.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.read().is_empty()
    }
}

impl Default for MyClaims {
    fn default() -> Self {
        Self::new()
    }
}

/// Files a claim against exactly one item.
///
/// The token presence is checked before the call rather than relying on the
/// server 401. A 400 surfaces the server's validation message verbatim; on
/// 403 the session is cleared like an expiry, which is how the submission
/// surface has always behaved (unlike the triage board, where 403 preserves
/// the session).
pub async fn submit_claim(
    cx: &Context,
    target: ClaimTarget,
    descriptor: ClaimCreateDescriptor,
) -> Result<(), Error> {
    if cx.session().get().is_none() {
        cx.notifier()
            .notify(Notice::error("You must be logged in to submit a claim"));
        return Err(Error::NotLoggedIn);
    }

    match api::call(cx, requests::CreateClaim { target, descriptor }).await {
        Ok(()) => {
            cx.notifier().notify(Notice::success(
                "Your claim has been submitted successfully!",
            ));
            Ok(())
        }
        Err(err) => {
            match &err {
                Error::Validation(message) => {
                    cx.notifier().notify(Notice::error(message.clone()));
                }
                Error::Forbidden(_) => {
                    cx.session().clear();
                    cx.notifier().notify(Notice::error(
                        "Your session has expired. Please log in again.",
                    ));
                }
                Error::AuthExpired(_) => {}
                other => {
                    cx.notifier().notify(Notice::error(format!(
                        "Failed to submit claim. Please try again. ({other})"
                    )));
                }
            }
            Err(err)
        }
    }
}
