//! The admin dashboard aggregate.
//!
//! Loads four collections in one shot and degrades per collection: a 403 on
//! any single fetch yields an empty collection plus a warning log, leaving
//! the rest of the dashboard intact, while a 401 fails the whole load (the
//! gateway has already cleared the session at that point).

use chrono::NaiveDate;

use lostfound_shared::account::UserRecord;
use lostfound_shared::claim::{ClaimRecord, ClaimStatus};
use lostfound_shared::item::{FoundItem, ItemRecord, LostItem};

use crate::api::items::{FetchItems, FoundKind, LostKind};
use crate::api::{self, claims, users};
use crate::view::paging::{self, PageView};
use crate::{Context, Error};

/// The four raw collections the dashboard is derived from.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub users: Vec<UserRecord>,
    pub lost: Vec<LostItem>,
    pub found: Vec<FoundItem>,
    pub claims: Vec<ClaimRecord>,
}

/// Headline numbers for the stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_lost: usize,
    pub total_found: usize,
    pub total_claims: usize,

    pub claims_pending: usize,
    pub claims_approved: usize,
    pub claims_rejected: usize,
    pub claims_reviewed: usize,

    /// `round(approved / total_claims * 100)`, 0 when there are no claims.
    pub success_rate: u32,
    /// `round(total_found / total_lost * 100)`, 0 when nothing is lost.
    /// A volume ratio of the two collections, not a per-item match count, so
    /// it can exceed 100.
    pub match_rate: u32,

    pub lost_pending: usize,
    pub lost_found: usize,
    pub lost_closed: usize,

    pub found_available: usize,
    pub found_claimed: usize,
    pub found_returned: usize,
}

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Stable row id ("lost-3", "found-7", "claim-12").
    pub id: String,
    pub kind: ActivityKind,
    pub name: String,
    pub location: String,
    pub date: Option<NaiveDate>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Lost,
    Found,
    Claim,
}

impl ActivityKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Lost => "Lost Item",
            ActivityKind::Found => "Found Item",
            ActivityKind::Claim => "Claim",
        }
    }
}

/// Fetches all four collections concurrently.
pub async fn load(cx: &Context) -> Result<DashboardData, Error> {
    cx.require_session()?;

    let (users, lost, found, claims) = tokio::join!(
        api::call(cx, users::FetchUsers),
        api::call(cx, FetchItems::<LostKind>::default()),
        api::call(cx, FetchItems::<FoundKind>::default()),
        api::call(cx, claims::FetchClaims),
    );

    Ok(DashboardData {
        users: degrade("users", users)?,
        lost: degrade("lost items", lost)?,
        found: degrade("found items", found)?,
        claims: degrade("claims", claims)?,
    })
}

/// Per-collection failure policy: an expired session aborts the load, any
/// other failure degrades that one collection to empty.
fn degrade<T>(what: &str, result: Result<Vec<T>, Error>) -> Result<Vec<T>, Error> {
    match result {
        Ok(items) => Ok(items),
        Err(err) if err.is_auth_expired() => Err(err),
        Err(err) => {
            tracing::warn!(collection = what, error = %err, "dashboard fetch degraded");
            Ok(Vec::new())
        }
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn status_is(status: Option<&str>, names: &[&str]) -> bool {
    status.map_or(false, |status| {
        names.iter().any(|name| status.eq_ignore_ascii_case(name))
    })
}

impl DashboardData {
    pub fn stats(&self) -> DashboardStats {
        let mut stats = DashboardStats {
            total_users: self.users.len(),
            total_lost: self.lost.len(),
            total_found: self.found.len(),
            total_claims: self.claims.len(),
            ..DashboardStats::default()
        };

        for claim in &self.claims {
            match claim.status {
                ClaimStatus::Pending => stats.claims_pending += 1,
                ClaimStatus::Approved => stats.claims_approved += 1,
                ClaimStatus::Rejected => stats.claims_rejected += 1,
                ClaimStatus::Reviewed => stats.claims_reviewed += 1,
                ClaimStatus::Other(_) => {}
            }
        }
        stats.success_rate = percent(stats.claims_approved, stats.total_claims);
        stats.match_rate = percent(stats.total_found, stats.total_lost);

        for item in &self.lost {
            let status = item.status();
            if status_is(status, &["LOST", "PENDING"]) || status.is_none() {
                stats.lost_pending += 1;
            } else if status_is(status, &["FOUND"]) {
                stats.lost_found += 1;
            } else if status_is(status, &["CLOSED"]) {
                stats.lost_closed += 1;
            }
        }
        for item in &self.found {
            let status = item.status();
            if status_is(status, &["FOUND", "AVAILABLE"]) || status.is_none() {
                stats.found_available += 1;
            } else if status_is(status, &["CLAIMED"]) {
                stats.found_claimed += 1;
            } else if status_is(status, &["RETURNED"]) {
                stats.found_returned += 1;
            }
        }
        stats
    }

    /// The newest activity rows: up to two lost items, two found items and
    /// three claims, merged and ordered newest first. Rows with no date sort
    /// last.
    pub fn recent_activities(&self) -> Vec<Activity> {
        fn newest<T, F: Fn(&T) -> Option<NaiveDate>>(items: &[T], date: F, take: usize) -> Vec<&T> {
            let mut sorted: Vec<&T> = items.iter().collect();
            sorted.sort_by(|a, b| date(b).cmp(&date(a)));
            sorted.into_iter().take(take).collect()
        }

        let mut rows = Vec::new();
        for item in newest(&self.lost, |item| item.date(), 2) {
            rows.push(Activity {
                id: format!("lost-{}", item.id()),
                kind: ActivityKind::Lost,
                name: non_empty(item.item_name()),
                location: item
                    .location()
                    .map_or_else(|| "Unknown Location".to_owned(), str::to_owned),
                date: item.date(),
                status: item.status().unwrap_or("LOST").to_owned(),
            });
        }
        for item in newest(&self.found, |item| item.date(), 2) {
            rows.push(Activity {
                id: format!("found-{}", item.id()),
                kind: ActivityKind::Found,
                name: non_empty(item.item_name()),
                location: item
                    .location()
                    .map_or_else(|| "Unknown Location".to_owned(), str::to_owned),
                date: item.date(),
                status: item.status().unwrap_or("FOUND").to_owned(),
            });
        }
        for claim in newest(&self.claims, |claim| claim.created_at.map(|at| at.date()), 3) {
            rows.push(Activity {
                id: format!("claim-{}", claim.id),
                kind: ActivityKind::Claim,
                name: claim
                    .item_name()
                    .map_or_else(|| "Unknown Item".to_owned(), str::to_owned),
                location: claim
                    .contact_information
                    .clone()
                    .unwrap_or_else(|| "Unknown Location".to_owned()),
                date: claim.created_at.map(|at| at.date()),
                status: claim.status.to_string(),
            });
        }

        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }
}

fn non_empty(name: &str) -> String {
    if name.is_empty() {
        "Unknown Item".to_owned()
    } else {
        name.to_owned()
    }
}

/// Sortable columns of the activity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivitySortKey {
    #[default]
    Date,
    Name,
    Status,
}

/// Search/sort/page state over a loaded activity list. Unlike the boards
/// this is a plain mutable struct; the dashboard reloads wholesale rather
/// than refreshing behind a shared handle.
pub struct ActivityFeed {
    activities: Vec<Activity>,
    search: String,
    sort_key: ActivitySortKey,
    ascending: bool,
    page: usize,
    per_page: usize,
}

impl ActivityFeed {
    pub fn new(activities: Vec<Activity>, per_page: usize) -> Self {
        Self {
            activities,
            search: String::new(),
            sort_key: ActivitySortKey::Date,
            ascending: false,
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn sort_by(&mut self, key: ActivitySortKey) {
        if self.sort_key == key {
            self.ascending = !self.ascending;
        } else {
            self.sort_key = key;
            // Dates default to newest first; text columns to A-Z.
            self.ascending = !matches!(key, ActivitySortKey::Date);
        }
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        let rows = self.rows();
        let total_pages = (rows.len() + self.per_page - 1) / self.per_page;
        self.page = paging::clamp_page(page, total_pages);
    }

    fn rows(&self) -> Vec<Activity> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<Activity> = self
            .activities
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || row.name.to_lowercase().contains(&needle)
                    || row.location.to_lowercase().contains(&needle)
                    || row.status.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let ordering = match self.sort_key {
                ActivitySortKey::Date => a.date.cmp(&b.date),
                ActivitySortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                ActivitySortKey::Status => a.status.cmp(&b.status),
            };
            if self.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        rows
    }

    pub fn page(&self) -> PageView<Activity> {
        paging::paginate(&self.rows(), self.page, self.per_page)
    }
}
