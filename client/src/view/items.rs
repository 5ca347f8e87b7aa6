//! Item browsing and reporting view-models, generic over the two kinds.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use lostfound_shared::item::handle::{FoundItemDescriptor, LostItemDescriptor};
use lostfound_shared::item::{Category, ItemRecord};

use crate::api;
use crate::api::items::{
    DeleteItem, FetchItems, FoundKind, ImageUpload, ItemKindSpec, LostKind, SaveFoundItem,
    SaveLostItem, UpdateFoundItem,
};
use crate::notify::Notice;
use crate::permission::can_modify;
use crate::view::paging::{self, PageView};
use crate::view::{report_fetch_error, Refresh};
use crate::{Context, Error};

/// All report categories, in form order.
pub const CATEGORIES: [Category; 6] = [
    Category::Electronics,
    Category::Clothing,
    Category::Documents,
    Category::Accessories,
    Category::PersonalItems,
    Category::Miscellaneous,
];

/// How a refresh was initiated, which decides how its failure is surfaced.
/// A manual refresh raises a notice; a background one only logs, so the
/// poller never spams the user while the server is briefly away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStyle {
    Manual,
    Background,
}

struct ItemViewState {
    search: String,
    category: Option<Category>,
    page: usize,
}

/// One kind's collection plus its derived search/category/page view.
pub struct ItemBoard<K: ItemKindSpec> {
    items: RwLock<Vec<K::Record>>,
    view: Mutex<ItemViewState>,
    in_flight: AtomicBool,
    last_updated: RwLock<Option<DateTime<Utc>>>,
    per_page: usize,
}

impl<K: ItemKindSpec> ItemBoard<K> {
    pub fn new(per_page: usize) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            view: Mutex::new(ItemViewState {
                search: String::new(),
                category: None,
                page: 1,
            }),
            in_flight: AtomicBool::new(false),
            last_updated: RwLock::new(None),
            per_page: per_page.max(1),
        }
    }

    pub async fn refresh(&self, cx: &Context, style: RefreshStyle) -> Result<Refresh, Error> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(Refresh::Skipped);
        }
        let result = self.refresh_inner(cx, style).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn refresh_inner(&self, cx: &Context, style: RefreshStyle) -> Result<Refresh, Error> {
        if let Err(err) = cx.require_session() {
            self.report(cx, style, &err);
            return Err(err);
        }

        match api::call(cx, FetchItems::<K>::default()).await {
            Ok(fresh) => {
                let unchanged = {
                    let current = self.items.read();
                    !current.is_empty() && *current == fresh
                };
                if unchanged {
                    return Ok(Refresh::Unchanged);
                }
                let count = fresh.len();
                *self.items.write() = fresh;
                *self.last_updated.write() = Some(Utc::now());
                tracing::debug!(kind = K::LABEL, count, "item collection replaced");
                Ok(Refresh::Updated(count))
            }
            Err(err) => {
                self.report(cx, style, &err);
                Err(err)
            }
        }
    }

    fn report(&self, cx: &Context, style: RefreshStyle, err: &Error) {
        match style {
            RefreshStyle::Manual => {
                report_fetch_error(cx, err, &format!("{} items", K::LABEL));
            }
            RefreshStyle::Background => {
                if err.is_auth_expired() {
                    return;
                }
                tracing::debug!(kind = K::LABEL, error = %err, "background item refresh failed");
            }
        }
    }

    /// Deletes one report, owner or admin only. The ownership check runs
    /// before any network traffic so a non-owner never even produces a
    /// request.
    pub async fn delete(&self, cx: &Context, id: u64) -> Result<(), Error> {
        let session = cx.require_session()?;
        let owner_email = {
            let items = self.items.read();
            let item = items.iter().find(|item| item.id() == id);
            item.and_then(|item| item.owner_email().map(str::to_owned))
        };
        if !can_modify(&session.actor(), owner_email.as_deref()) {
            cx.notifier().notify(Notice::error(format!(
                "You can only delete your own {} items.",
                K::LABEL
            )));
            return Err(Error::Forbidden(format!(
                "only the owner or an admin may delete a {} item",
                K::LABEL
            )));
        }

        match api::call(cx, DeleteItem::<K>::new(id)).await {
            Ok(()) => {
                self.remove_local(id);
                cx.notifier()
                    .notify(Notice::success("Item deleted successfully!"));
                Ok(())
            }
            Err(Error::NotFound(message)) => {
                // Stale row; somebody else already deleted it.
                self.remove_local(id);
                cx.notifier()
                    .notify(Notice::warning("Item was already deleted."));
                Err(Error::NotFound(message))
            }
            Err(err) => {
                if !err.is_auth_expired() {
                    cx.notifier()
                        .notify(Notice::error(format!("Failed to delete item: {err}")));
                }
                Err(err)
            }
        }
    }

    fn remove_local(&self, id: u64) {
        self.items.write().retain(|item| item.id() != id);
        *self.last_updated.write() = Some(Utc::now());
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let mut view = self.view.lock();
        view.search = search.into();
        view.page = 1;
    }

    pub fn set_category(&self, category: Option<Category>) {
        let mut view = self.view.lock();
        if view.category != category {
            view.category = category;
            view.page = 1;
        }
    }

    pub fn set_page(&self, page: usize) {
        let total_pages = {
            let filtered = self.filtered();
            (filtered.len() + self.per_page - 1) / self.per_page
        };
        self.view.lock().page = paging::clamp_page(page, total_pages);
    }

    fn filtered(&self) -> Vec<K::Record> {
        let items = self.items.read();
        let view = self.view.lock();
        let needle = view.search.trim().to_lowercase();
        items
            .iter()
            .filter(|item| {
                if let Some(category) = view.category {
                    if item.category() != Some(category) {
                        return false;
                    }
                }
                if needle.is_empty() {
                    return true;
                }
                item.item_name().to_lowercase().contains(&needle)
                    || item
                        .description()
                        .map_or(false, |text| text.to_lowercase().contains(&needle))
                    || item
                        .location()
                        .map_or(false, |text| text.to_lowercase().contains(&needle))
                    || item.category().map_or(false, |category| {
                        category.as_str().to_lowercase().contains(&needle)
                    })
            })
            .cloned()
            .collect()
    }

    /// The current page of the searched/filtered collection.
    pub fn page(&self) -> PageView<K::Record> {
        let filtered = self.filtered();
        let page = self.view.lock().page;
        paging::paginate(&filtered, page, self.per_page)
    }

    pub fn get(&self, id: u64) -> Option<K::Record> {
        self.items.read().iter().find(|item| item.id() == id).cloned()
    }

    /// The distinct categories present in the collection, in form order.
    pub fn categories(&self) -> Vec<Category> {
        let items = self.items.read();
        let mut present: Vec<Category> = items.iter().filter_map(|item| item.category()).collect();
        present.sort();
        present.dedup();
        present
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        *self.last_updated.read()
    }
}

/// Which kind the browse surface currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemTab {
    #[default]
    Found,
    Lost,
}

/// The two-tab browse surface. Both collections are kept loaded so tab
/// switches are instant; switching only resets the incoming tab's page.
pub struct ItemsView {
    pub found: ItemBoard<FoundKind>,
    pub lost: ItemBoard<LostKind>,
    tab: Mutex<ItemTab>,
}

impl ItemsView {
    pub fn new(per_page: usize) -> Self {
        Self {
            found: ItemBoard::new(per_page),
            lost: ItemBoard::new(per_page),
            tab: Mutex::new(ItemTab::Found),
        }
    }

    pub fn tab(&self) -> ItemTab {
        *self.tab.lock()
    }

    pub fn set_tab(&self, tab: ItemTab) {
        let mut current = self.tab.lock();
        if *current != tab {
            *current = tab;
            drop(current);
            match tab {
                ItemTab::Found => self.found.set_page(1),
                ItemTab::Lost => self.lost.set_page(1),
            }
        }
    }

    /// Refreshes both collections; the first error (if any) is returned but
    /// does not stop the other refresh.
    pub async fn refresh_all(&self, cx: &Context, style: RefreshStyle) -> Result<(), Error> {
        let (found, lost) = tokio::join!(
            self.found.refresh(cx, style),
            self.lost.refresh(cx, style)
        );
        found?;
        lost?;
        Ok(())
    }
}

/// Submits a lost item report.
pub async fn report_lost(
    cx: &Context,
    descriptor: LostItemDescriptor,
    image: Option<ImageUpload>,
) -> Result<(), Error> {
    cx.require_session()?;
    match api::call(cx, SaveLostItem { descriptor, image }).await {
        Ok(()) => {
            cx.notifier().notify(Notice::success(
                "Lost item reported successfully! We'll notify you if someone finds it.",
            ));
            Ok(())
        }
        Err(err) => {
            report_submit_error(cx, &err, "report the lost item");
            Err(err)
        }
    }
}

/// Submits a found item report.
pub async fn report_found(
    cx: &Context,
    descriptor: FoundItemDescriptor,
    image: Option<ImageUpload>,
) -> Result<(), Error> {
    cx.require_session()?;
    match api::call(cx, SaveFoundItem { descriptor, image }).await {
        Ok(()) => {
            cx.notifier().notify(Notice::success(
                "Found item reported successfully! Thank you for helping.",
            ));
            Ok(())
        }
        Err(err) => {
            report_submit_error(cx, &err, "report the found item");
            Err(err)
        }
    }
}

/// Edits an existing found item report. Owner or admin only; lost items have
/// no update endpoint, so there is no lost counterpart.
pub async fn update_found(
    cx: &Context,
    current_owner_email: Option<&str>,
    id: u64,
    descriptor: FoundItemDescriptor,
    image: Option<ImageUpload>,
) -> Result<(), Error> {
    let session = cx.require_session()?;
    if !can_modify(&session.actor(), current_owner_email) {
        cx.notifier().notify(Notice::error(
            "You can only edit your own found items.",
        ));
        return Err(Error::Forbidden(
            "only the owner or an admin may edit a found item".to_owned(),
        ));
    }
    match api::call(
        cx,
        UpdateFoundItem {
            id,
            descriptor,
            image,
        },
    )
    .await
    {
        Ok(()) => {
            cx.notifier()
                .notify(Notice::success("Item updated successfully!"));
            Ok(())
        }
        Err(err) => {
            report_submit_error(cx, &err, "update the item");
            Err(err)
        }
    }
}

fn report_submit_error(cx: &Context, err: &Error, action: &str) {
    match err {
        Error::AuthExpired(_) => {}
        Error::Validation(message) => cx.notifier().notify(Notice::error(message.clone())),
        other => cx
            .notifier()
            .notify(Notice::error(format!("Failed to {action}: {other}"))),
    }
}
