use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A media reference (`media:content`, `media:thumbnail`, group members)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaRef {
    pub url: String,
    pub medium: Option<String>,
    pub mime_type: Option<String>,
}

impl MediaRef {
    /// False only when the feed says the media is something other than an image
    pub fn may_be_image(&self) -> bool {
        let medium_ok = self.medium.as_deref().map_or(true, |m| m == "image");
        let type_ok = self
            .mime_type
            .as_deref()
            .map_or(true, |t| t.starts_with("image/"));
        medium_ok && type_ok
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: Option<String>,
    pub length: Option<u64>,
}

/// One feed item as produced by the parser, before normalization.
///
/// Every field is optional: feeds differ wildly in what they publish and an
/// absent field is not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub guid: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub content_encoded: Option<String>,
    pub content_snippet: Option<String>,
    pub creator: Option<String>,
    pub author: Option<String>,
    pub dc_creator: Option<String>,
    pub media_content: Vec<MediaRef>,
    pub media_thumbnail: Vec<MediaRef>,
    pub media_group: Vec<MediaRef>,
    pub enclosure: Option<Enclosure>,
    pub pub_date: Option<String>,
    pub iso_date: Option<String>,
    pub categories: Vec<String>,
}

/// Canonical, display-ready news item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub description: String,
    #[serde(with = "iso_millis")]
    pub pub_date: DateTime<Utc>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_icon: Option<String>,
    pub category: String,
    pub author: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Response for GET /api/news
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResult {
    pub items: Vec<NewsItem>,
    pub pagination: Pagination,
}

/// Serializes timestamps as `2024-01-05T10:00:00.000Z`
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
