//! The admin user directory.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use lostfound_shared::account::{Role, UserRecord};

use crate::api::{self, users as requests};
use crate::notify::Notice;
use crate::view::paging::{self, PageView};
use crate::view::{report_fetch_error, Refresh};
use crate::{Context, Error};

/// Sortable columns of the directory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortKey {
    #[default]
    Id,
    Name,
    Email,
    Role,
}

/// Role breakdown of the full directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleCounts {
    pub total: usize,
    pub admins: usize,
    pub moderators: usize,
    pub users: usize,
}

struct DirectoryView {
    search: String,
    sort_key: UserSortKey,
    ascending: bool,
    page: usize,
}

pub struct UserDirectory {
    users: RwLock<Vec<UserRecord>>,
    view: Mutex<DirectoryView>,
    in_flight: AtomicBool,
    per_page: usize,
}

impl UserDirectory {
    pub fn new(per_page: usize) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            view: Mutex::new(DirectoryView {
                search: String::new(),
                sort_key: UserSortKey::Id,
                ascending: true,
                page: 1,
            }),
            in_flight: AtomicBool::new(false),
            per_page: per_page.max(1),
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
            report_fetch_error(cx, &err, "users");
            return Err(err);
        }
        match api::call(cx, requests::FetchUsers).await {
            Ok(fresh) => {
                let unchanged = {
                    let current = self.users.read();
                    !current.is_empty() && *current == fresh
                };
                if unchanged {
                    return Ok(Refresh::Unchanged);
                }
                let count = fresh.len();
                *self.users.write() = fresh;
                tracing::debug!(count, "user directory replaced");
                Ok(Refresh::Updated(count))
            }
            Err(err) => {
                report_fetch_error(cx, &err, "users");
                Err(err)
            }
        }
    }

    /// Deletes an account, admin only, with an optimistic local removal on
    /// success.
    pub async fn delete(&self, cx: &Context, id: u64) -> Result<(), Error> {
        let session = cx.require_session()?;
        if !session.is_admin() {
            cx.notifier().notify(Notice::error(
                "Access denied. You need admin privileges to delete users.",
            ));
            return Err(Error::Forbidden(
                "admin privileges are required to delete users".to_owned(),
            ));
        }

        match api::call(cx, requests::DeleteUser { id }).await {
            Ok(()) => {
                self.users.write().retain(|user| user.id != id);
                cx.notifier()
                    .notify(Notice::success("User deleted successfully!"));
                Ok(())
            }
            Err(Error::NotFound(message)) => {
                self.users.write().retain(|user| user.id != id);
                cx.notifier()
                    .notify(Notice::warning("User was already deleted."));
                Err(Error::NotFound(message))
            }
            Err(err) => {
                if !err.is_auth_expired() {
                    cx.notifier()
                        .notify(Notice::error(format!("Failed to delete user: {err}")));
                }
                Err(err)
            }
        }
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let mut view = self.view.lock();
        view.search = search.into();
        view.page = 1;
    }

    /// Sorts by `key`; selecting the active key flips the direction. Either
    /// way the view returns to the first page.
    pub fn sort_by(&self, key: UserSortKey) {
        let mut view = self.view.lock();
        if view.sort_key == key {
            view.ascending = !view.ascending;
        } else {
            view.sort_key = key;
            view.ascending = true;
        }
        view.page = 1;
    }

    pub fn set_page(&self, page: usize) {
        let total_pages = {
            let filtered = self.filtered_sorted();
            (filtered.len() + self.per_page - 1) / self.per_page
        };
        self.view.lock().page = paging::clamp_page(page, total_pages);
    }

    fn filtered_sorted(&self) -> Vec<UserRecord> {
        let users = self.users.read();
        let view = self.view.lock();
        let needle = view.search.trim().to_lowercase();
        let mut rows: Vec<UserRecord> = users
            .iter()
            .filter(|user| {
                needle.is_empty()
                    || user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let ordering = match view.sort_key {
                UserSortKey::Id => a.id.cmp(&b.id),
                UserSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                UserSortKey::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
                UserSortKey::Role => a.role.as_str().cmp(b.role.as_str()),
            };
            if view.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        rows
    }

    /// The current page of the searched, sorted directory.
    pub fn page(&self) -> PageView<UserRecord> {
        let rows = self.filtered_sorted();
        let page = self.view.lock().page;
        paging::paginate(&rows, page, self.per_page)
    }

    pub fn role_counts(&self) -> RoleCounts {
        let users = self.users.read();
        let mut counts = RoleCounts {
            total: users.len(),
            ..RoleCounts::default()
        };
        for user in users.iter() {
            match user.role {
                Role::Admin => counts.admins += 1,
                Role::Moderator => counts.moderators += 1,
                Role::User => counts.users += 1,
                Role::Other(_) => {}
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
