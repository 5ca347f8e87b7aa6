//! Integration tests driving the view-models against an in-process axum
//! server standing in for the Spring backend.

mod support;

mod claims;
mod paging;
mod permission;
mod poll;
mod session;
