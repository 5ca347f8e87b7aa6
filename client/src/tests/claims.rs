use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;

use lostfound_shared::claim::handle::ClaimCreateDescriptor;
use lostfound_shared::claim::ClaimStatus;

use crate::notify::Level;
use crate::view::claims::{submit_claim, ClaimBoard, ClaimTarget, MyClaims, StatusFilter};
use crate::view::Refresh;
use crate::{Error, SessionStore};

use super::support::{admin_session, claim_json, harness, user_session};

fn descriptor() -> ClaimCreateDescriptor {
    ClaimCreateDescriptor {
        proof_description: "scratch on the lid".to_owned(),
        contact_information: "0788000000".to_owned(),
        additional_details: None,
    }
}

/// Test: a refresh replaces the whole collection and reports its size.
#[tokio::test]
async fn refresh_replaces_collection() {
    let router = Router::new().route(
        "/claimRequests/all",
        get(|| async {
            Json(serde_json::json!([
                claim_json(1, "PENDING"),
                claim_json(2, "APPROVED"),
                claim_json(3, "PENDING"),
            ]))
        }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(admin_session()));

    let board = ClaimBoard::new(6);
    assert_eq!(board.refresh(&h.cx).await.unwrap(), Refresh::Updated(3));

    let counts = board.status_counts();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.pending, 2);
    assert_eq!(counts.approved, 1);
}

/// Test: a 401 clears the session exactly once and announces the expiry.
#[tokio::test]
async fn expired_session_is_cleared_and_announced() {
    let router = Router::new().route(
        "/claimRequests/all",
        get(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(admin_session()));

    let board = ClaimBoard::new(6);
    let err = board.refresh(&h.cx).await.unwrap_err();
    assert!(err.is_auth_expired());
    assert!(h.store.get().is_none());
    assert!(h
        .notifier
        .contains_level(Level::Error, "Session expired. Please login again."));
    assert_eq!(h.notifier.messages().len(), 1);
}

/// Test: a 403 on the fetch keeps both the session and the previously
/// fetched data.
#[tokio::test]
async fn forbidden_fetch_preserves_session_and_data() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/claimRequests/all",
        get(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(Json(serde_json::json!([claim_json(1, "PENDING")])))
                } else {
                    Err(StatusCode::FORBIDDEN)
                }
            }
        }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(user_session()));

    let board = ClaimBoard::new(6);
    assert_eq!(board.refresh(&h.cx).await.unwrap(), Refresh::Updated(1));

    let err = board.refresh(&h.cx).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    assert!(h.store.get().is_some(), "403 must not clear the session");
    assert_eq!(board.len(), 1, "403 must not drop held data");
    assert!(h.notifier.contains("Admin privileges are required"));
}

/// Test: rollback resets both terminal states to PENDING.
#[tokio::test]
async fn rollback_resets_terminal_states() {
    let router = Router::new()
        .route(
            "/claimRequests/all",
            get(|| async {
                Json(serde_json::json!([
                    claim_json(1, "APPROVED"),
                    claim_json(2, "REJECTED"),
                ]))
            }),
        )
        .route(
            "/claimRequests/rollback/:id",
            put(|Path(_id): Path<u64>| async { StatusCode::OK }),
        );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(admin_session()));

    let board = ClaimBoard::new(6);
    board.refresh(&h.cx).await.unwrap();

    board.rollback(&h.cx, 1).await.unwrap();
    board.rollback(&h.cx, 2).await.unwrap();

    let counts = board.status_counts();
    assert_eq!(counts.pending, 2);
    assert_eq!(counts.approved, 0);
    assert_eq!(counts.rejected, 0);
    assert!(h.notifier.contains("rolled back to PENDING"));
}

/// Test: a non-admin verdict is rejected before any request is issued.
#[tokio::test]
async fn non_admin_verdict_never_reaches_the_server() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/claimRequests/ClaimVerification/:id/status",
        put(move |Path(_id): Path<u64>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::OK
            }
        }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(user_session()));

    let board = ClaimBoard::new(6);
    let err = board
        .update_status(&h.cx, 1, ClaimStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(h.notifier.contains("admin privileges"));
}

/// Test: an overlapping refresh is dropped, not queued.
#[tokio::test]
async fn overlapping_refresh_is_dropped() {
    let router = Router::new().route(
        "/claimRequests/all",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Json(serde_json::json!([claim_json(1, "PENDING")]))
        }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(admin_session()));

    let board = Arc::new(ClaimBoard::new(6));
    let slow = {
        let board = board.clone();
        let cx = h.cx.clone();
        tokio::spawn(async move { board.refresh(&cx).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(board.refresh(&h.cx).await.unwrap(), Refresh::Skipped);
    assert_eq!(slow.await.unwrap().unwrap(), Refresh::Updated(1));
}

/// Test: changing the filter resets pagination to the first page.
#[tokio::test]
async fn filter_resets_pagination() {
    let rows: Vec<serde_json::Value> = (1..=14)
        .map(|id| claim_json(id, if id % 2 == 0 { "APPROVED" } else { "PENDING" }))
        .collect();
    let router = Router::new().route(
        "/claimRequests/all",
        get(move || {
            let rows = rows.clone();
            async move { Json(serde_json::Value::Array(rows)) }
        }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(admin_session()));

    let board = ClaimBoard::new(6);
    board.refresh(&h.cx).await.unwrap();

    let page = board.page();
    assert_eq!(page.total_items, 14);
    assert_eq!(page.total_pages, 3);

    board.set_page(2);
    assert_eq!(board.page().page, 2);

    board.set_filter(StatusFilter::Only(ClaimStatus::Approved));
    let page = board.page();
    assert_eq!(page.page, 1, "a filter change must reset the page");
    assert_eq!(page.total_items, 7);
    assert!(page
        .items
        .iter()
        .all(|claim| claim.status == ClaimStatus::Approved));
}

/// Test: a board built from a zero page-size config still paginates.
#[tokio::test]
async fn zero_page_size_config_does_not_panic() {
    let router = Router::new().route(
        "/claimRequests/all",
        get(|| async { Json(serde_json::json!([claim_json(1, "PENDING")])) }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(admin_session()));

    let board = ClaimBoard::new(0);
    board.refresh(&h.cx).await.unwrap();
    board.set_page(5);
    let page = board.page();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items.len(), 1);
}

/// Test: a claim submission binds exactly one item id as a query parameter.
#[tokio::test]
async fn submit_binds_exactly_one_item() {
    let seen = Arc::new(Mutex::new(None::<String>));
    let query = seen.clone();
    let router = Router::new().route(
        "/claimRequests/create",
        post(move |RawQuery(raw): RawQuery| {
            let query = query.clone();
            async move {
                *query.lock() = raw;
                StatusCode::OK
            }
        }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(user_session()));

    submit_claim(&h.cx, ClaimTarget::Found(7), descriptor())
        .await
        .unwrap();

    let raw = seen.lock().clone().unwrap();
    assert!(raw.contains("foundItemId=7"));
    assert!(!raw.contains("lostItemId"));
    assert!(h
        .notifier
        .contains_level(Level::Success, "submitted successfully"));
}

/// Test: a 400 on submission surfaces the server's message verbatim.
#[tokio::test]
async fn submit_validation_message_is_verbatim() {
    let router = Router::new().route(
        "/claimRequests/create",
        post(|| async { (StatusCode::BAD_REQUEST, "You cannot claim your own item") }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(user_session()));

    let err = submit_claim(&h.cx, ClaimTarget::Lost(3), descriptor())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(
        h.notifier.messages(),
        vec!["You cannot claim your own item".to_owned()]
    );
}

/// Test: a 403 on submission is treated as an expired session.
#[tokio::test]
async fn submit_forbidden_clears_session() {
    let router = Router::new().route(
        "/claimRequests/create",
        post(|| async { StatusCode::FORBIDDEN }),
    );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(user_session()));

    let err = submit_claim(&h.cx, ClaimTarget::Found(1), descriptor())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    assert!(h.store.get().is_none());
    assert!(h.notifier.contains("session has expired"));
}

/// Test: submission without a session never issues a request.
#[tokio::test]
async fn submit_requires_login() {
    let h = harness("http://127.0.0.1:9", None);
    let err = submit_claim(&h.cx, ClaimTarget::Found(1), descriptor())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotLoggedIn));
    assert!(h.notifier.contains("must be logged in"));
}

/// Test: deleting an own claim removes it locally, and a 404 on a stale row
/// still removes the row.
#[tokio::test]
async fn my_claims_delete_and_stale_delete() {
    let router = Router::new()
        .route(
            "/claimRequests/my-claims",
            get(|| async {
                Json(serde_json::json!([
                    claim_json(1, "PENDING"),
                    claim_json(2, "PENDING"),
                ]))
            }),
        )
        .route(
            "/claimRequests/delete/:id",
            delete(|Path(id): Path<u64>| async move {
                if id == 1 {
                    StatusCode::OK
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        );
    let base = super::support::serve(router).await;
    let h = harness(&base, Some(user_session()));

    let mine = MyClaims::new();
    assert_eq!(mine.refresh(&h.cx).await.unwrap(), Refresh::Updated(2));

    mine.delete(&h.cx, 1).await.unwrap();
    assert_eq!(mine.len(), 1);

    let err = mine.delete(&h.cx, 2).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(mine.is_empty(), "a 404 removes the stale row too");
    assert!(h.notifier.contains("no longer exists"));
}
