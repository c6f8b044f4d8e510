//! The item entity and its validated creation input.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Prefix under which every item document is stored.
pub const ITEM_KEY_PREFIX: &str = "items/";

/// Validated input for creating an item.
///
/// Produced only by request validation: `name` is already trimmed and
/// bounded, `description` is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemInput {
    /// Trimmed item name.
    pub name: String,
    /// Free-form description, untouched.
    pub description: Option<String>,
}

/// A persisted item.
///
/// Serialized with camelCase field names; `description` is omitted when absent
/// and `createdAt` is written as ISO-8601 UTC with millisecond precision.
///
/// # Examples
///
/// ```
/// use itempipe_model::{CreateItemInput, Item};
///
/// let item = Item::create(CreateItemInput {
///     name: "Widget".to_owned(),
///     description: None,
/// });
/// assert_eq!(item.object_key(), format!("items/{}.json", item.id));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-generated identifier (UUID v4).
    pub id: String,
    /// Item name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(with = "iso8601_millis")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Build a new item from validated input with a fresh id and the current
    /// time, truncated to the millisecond precision it is stored with.
    #[must_use]
    pub fn create(input: CreateItemInput) -> Self {
        Self::from_parts(
            input,
            uuid::Uuid::new_v4().to_string(),
            Utc::now().trunc_subsecs(3),
        )
    }

    /// Build an item with an explicit id and timestamp.
    #[must_use]
    pub fn from_parts(input: CreateItemInput, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            created_at,
        }
    }

    /// Object key for this item: `items/{id}.json`.
    #[must_use]
    pub fn object_key(&self) -> String {
        format!("{ITEM_KEY_PREFIX}{}.json", self.id)
    }
}

/// `DateTime<Utc>` as `YYYY-MM-DDTHH:MM:SS.sssZ`.
mod iso8601_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
