//! Descriptors for the multipart item save/update endpoints.
//!
//! The backend expects a multipart form whose JSON part is named after the
//! item kind (`lostItem` / `foundItem`), with the optional image bytes in an
//! `imageFile` part.

use super::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// JSON part of `POST /lostItem/saveLostItem`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItemDescriptor {
    pub item_name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lost_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lost: Option<String>,
}

/// JSON part of `POST /foundItems/saveFoundItem` and
/// `PUT /foundItems/updateFoundItem/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItemDescriptor {
    pub item_name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_found: Option<String>,
}
