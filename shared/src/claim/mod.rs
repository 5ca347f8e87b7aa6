pub mod handle;

use crate::account::UserSummary;
use crate::item::{Category, FoundItem, ItemRecord, LostItem};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Status of an ownership claim.
///
/// `PENDING` is the initial state. The client's model of the transition
/// graph: an admin moves `PENDING`/`REVIEWED` to `APPROVED` or `REJECTED`,
/// and a rollback resets `APPROVED`/`REJECTED` back to `PENDING`. Nothing in
/// the client transitions a claim into `REVIEWED`; that state is only ever
/// observed coming from the server. Unknown strings are preserved for
/// display but carry no action rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    Reviewed,
    Other(String),
}

impl ClaimStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::Reviewed => "REVIEWED",
            ClaimStatus::Other(status) => status,
        }
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        ClaimStatus::Pending
    }
}

impl From<String> for ClaimStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => ClaimStatus::Pending,
            "APPROVED" => ClaimStatus::Approved,
            "REJECTED" => ClaimStatus::Rejected,
            "REVIEWED" => ClaimStatus::Reviewed,
            _ => ClaimStatus::Other(value),
        }
    }
}

impl From<ClaimStatus> for String {
    fn from(status: ClaimStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which kind of item a claim targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKind {
    Lost,
    Found,
}

/// An ownership claim as returned by the claim endpoints.
///
/// At most one of `lost_item` / `found_item` should be populated; the server
/// does not enforce this and neither does this type, so accessors check the
/// lost side first (mirroring how the backend populates older rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: u64,
    #[serde(default)]
    pub status: ClaimStatus,
    #[serde(default)]
    pub lost_item: Option<LostItem>,
    #[serde(default)]
    pub found_item: Option<FoundItem>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub contact_information: Option<String>,
    #[serde(default)]
    pub proof_description: Option<String>,
    #[serde(default)]
    pub proof_image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl ClaimRecord {
    pub fn kind(&self) -> Option<ClaimKind> {
        if self.lost_item.is_some() {
            Some(ClaimKind::Lost)
        } else if self.found_item.is_some() {
            Some(ClaimKind::Found)
        } else {
            None
        }
    }

    pub fn item_name(&self) -> Option<&str> {
        self.lost_item
            .as_ref()
            .map(|item| item.item_name())
            .or_else(|| self.found_item.as_ref().map(|item| item.item_name()))
    }

    pub fn item_category(&self) -> Option<Category> {
        self.lost_item
            .as_ref()
            .and_then(|item| item.category())
            .or_else(|| self.found_item.as_ref().and_then(|item| item.category()))
    }

    pub fn item_image_url(&self) -> Option<&str> {
        self.lost_item
            .as_ref()
            .and_then(|item| item.image_url())
            .or_else(|| self.found_item.as_ref().and_then(|item| item.image_url()))
    }
}
