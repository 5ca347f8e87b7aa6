//! Pure pagination over an already-filtered collection. Pages are 1-indexed
//! with a fixed page size.

/// One page of a derived view.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// 1-indexed current page.
    pub page: usize,
    /// `ceil(total_items / per_page)`; 0 for an empty collection.
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
}

impl<T> PageView<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageView<T> {
    // A zero page size reads as one so the arithmetic below stays total.
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = (total_items + per_page - 1) / per_page;
    let page = page.max(1);
    let start = (page - 1) * per_page;
    let items = items.iter().skip(start).take(per_page).cloned().collect();
    PageView {
        items,
        page,
        total_pages,
        total_items,
        per_page,
    }
}

/// Clamps a requested page into the valid range (always at least 1, even
/// when the collection is empty).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}
