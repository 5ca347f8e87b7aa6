//! Request body for claim creation.

use serde::{Deserialize, Serialize};

/// Body of `POST /claimRequests/create`. The target item id travels as a
/// query parameter (`lostItemId` or `foundItemId`), not in this body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCreateDescriptor {
    pub proof_description: String,
    pub contact_information: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_details: Option<String>,
}
