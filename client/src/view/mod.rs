//! Per-page view-models.
//!
//! Each board owns a full copy of its server collection and derives
//! filtered, paginated slices from it synchronously. Network refreshes
//! replace the whole collection ("periodic full-state replace"); optimistic
//! patches applied after a successful mutation are superseded, and corrected
//! if they were wrong, by the next refresh. The staleness bound is therefore
//! one polling interval.

pub mod claims;
pub mod dashboard;
pub mod items;
pub mod paging;
pub mod poll;
pub mod users;

use crate::notify::Notice;
use crate::{Context, Error};

/// Standard fetch-failure reporting, one notice per error class. The
/// gateway already announces expired sessions, so that case stays quiet
/// here. Prior data is always left in place by callers; a failed fetch
/// never clears a board.
pub(crate) fn report_fetch_error(cx: &Context, err: &Error, what: &str) {
    match err {
        Error::AuthExpired(_) => {}
        Error::NotLoggedIn => cx
            .notifier()
            .notify(Notice::error(format!("Please login to view {what}."))),
        Error::Forbidden(_) => cx.notifier().notify(Notice::error(format!(
            "Access denied. Admin privileges are required to view {what}."
        ))),
        Error::Unreachable(_) => cx
            .notifier()
            .notify(Notice::error("Cannot connect to server. Please try again.")),
        other => cx
            .notifier()
            .notify(Notice::error(format!("Failed to load {what}: {other}"))),
    }
}

/// Outcome of a collection refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Collection replaced; carries the new length.
    Updated(usize),
    /// Server data matched what was already held.
    Unchanged,
    /// A fetch was already in flight; this call was dropped, not queued.
    Skipped,
}
