//! Wire-level data model shared with the lost-and-found backend.
//!
//! The backend is a Java/Spring service, so every type here serializes with
//! `camelCase` field names and tolerates fields the server may omit. These
//! types carry no behavior beyond accessors; all transition and permission
//! logic lives in the client crate.

pub mod account;
pub mod claim;
pub mod item;
