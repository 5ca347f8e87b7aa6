pub mod handle;

use crate::account::UserSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Item category. Closed enumeration; the report forms only offer these six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Electronics,
    Clothing,
    Documents,
    Accessories,
    PersonalItems,
    Miscellaneous,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Clothing => "CLOTHING",
            Category::Documents => "DOCUMENTS",
            Category::Accessories => "ACCESSORIES",
            Category::PersonalItems => "PERSONAL_ITEMS",
            Category::Miscellaneous => "MISCELLANEOUS",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lost item report.
///
/// `status` is a free-form display string (`LOST`, `FOUND`, `CLOSED`, ...);
/// the server does not commit to an enumeration for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItem {
    pub id: u64,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_date")]
    pub lost_date: Option<NaiveDate>,
    #[serde(default)]
    pub location_lost: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// A found item report, structurally parallel to [`LostItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    pub id: u64,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "serde_date")]
    pub found_date: Option<NaiveDate>,
    #[serde(default)]
    pub location_found: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// Common accessors over the two item variants so collection views can be
/// written once.
pub trait ItemRecord {
    fn id(&self) -> u64;
    fn item_name(&self) -> &str;
    fn category(&self) -> Option<Category>;
    fn description(&self) -> Option<&str>;
    fn date(&self) -> Option<NaiveDate>;
    fn location(&self) -> Option<&str>;
    fn status(&self) -> Option<&str>;
    fn image_url(&self) -> Option<&str>;
    fn owner(&self) -> Option<&UserSummary>;

    fn owner_email(&self) -> Option<&str> {
        self.owner().and_then(|user| user.email.as_deref())
    }
}

impl ItemRecord for LostItem {
    fn id(&self) -> u64 {
        self.id
    }
    fn item_name(&self) -> &str {
        &self.item_name
    }
    fn category(&self) -> Option<Category> {
        self.category
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn date(&self) -> Option<NaiveDate> {
        self.lost_date
    }
    fn location(&self) -> Option<&str> {
        self.location_lost.as_deref()
    }
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
    fn owner(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }
}

impl ItemRecord for FoundItem {
    fn id(&self) -> u64 {
        self.id
    }
    fn item_name(&self) -> &str {
        &self.item_name
    }
    fn category(&self) -> Option<Category> {
        self.category
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn date(&self) -> Option<NaiveDate> {
        self.found_date
    }
    fn location(&self) -> Option<&str> {
        self.location_found.as_deref()
    }
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
    fn owner(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }
}

/// The backend serializes item dates sometimes as a plain date and sometimes
/// as a Java `LocalDateTime`; accept both and keep only the date part.
mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        match value {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => {
                let date_part = raw.split('T').next().unwrap_or(&raw);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_date_accepts_both_date_and_datetime() {
        let item: LostItem = serde_json::from_str(
            r#"{"id":1,"itemName":"Wallet","lostDate":"2024-01-15T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(
            item.lost_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );

        let item: LostItem =
            serde_json::from_str(r#"{"id":2,"itemName":"Wallet","lostDate":"2024-01-15"}"#)
                .unwrap();
        assert_eq!(
            item.lost_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn found_item_tolerates_sparse_server_payloads() {
        let item: FoundItem = serde_json::from_str(r#"{"id":7}"#).unwrap();
        assert_eq!(item.item_name, "");
        assert_eq!(item.category, None);
        assert_eq!(item.owner_email(), None);
    }

    #[test]
    fn category_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::PersonalItems).unwrap(),
            "\"PERSONAL_ITEMS\""
        );
        let parsed: Category = serde_json::from_str("\"ELECTRONICS\"").unwrap();
        assert_eq!(parsed, Category::Electronics);
    }
}
