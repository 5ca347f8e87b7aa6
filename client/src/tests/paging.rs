use crate::view::paging::{clamp_page, paginate};

#[test]
fn pages_are_one_indexed_with_ceiling_count() {
    let items: Vec<u32> = (1..=14).collect();

    let page = paginate(&items, 1, 6);
    assert_eq!(page.items, (1..=6).collect::<Vec<_>>());
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 14);

    let page = paginate(&items, 3, 6);
    assert_eq!(page.items, vec![13, 14]);
}

#[test]
fn page_past_the_end_is_empty_not_a_panic() {
    let items: Vec<u32> = (1..=3).collect();
    let page = paginate(&items, 9, 6);
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[test]
fn empty_collection_has_zero_pages() {
    let page = paginate::<u32>(&[], 1, 6);
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.page, 1);
}

#[test]
fn zero_page_size_reads_as_one() {
    let items: Vec<u32> = (1..=3).collect();
    let page = paginate(&items, 1, 0);
    assert_eq!(page.items, vec![1]);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.per_page, 1);
}

#[test]
fn clamping_stays_in_range() {
    assert_eq!(clamp_page(0, 3), 1);
    assert_eq!(clamp_page(2, 3), 2);
    assert_eq!(clamp_page(9, 3), 3);
    // An empty collection still presents page 1.
    assert_eq!(clamp_page(5, 0), 1);
}
