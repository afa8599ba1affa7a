use super::model::{NewsItem, RawEntry};
use super::text::{
    decode_entities, extract_img_src, strip_html, truncate, valid_http_url, DESCRIPTION_MAX_CHARS,
};
use crate::domain::source::Source;
use chrono::{DateTime, NaiveDateTime, Utc};

const UNKNOWN_AUTHOR: &str = "Unknown";

/// Build the canonical item for one raw entry.
///
/// Returns `None` when the entry has no title, or has neither a link nor a
/// guid. `now` stands in for entries without a usable date, which keeps this
/// a pure function of its inputs.
pub fn normalize(entry: &RawEntry, source: &Source, now: DateTime<Utc>) -> Option<NewsItem> {
    let title = display_text(entry.title.as_deref())?;
    let link = non_empty(entry.link.as_deref()).or_else(|| non_empty(entry.guid.as_deref()))?;

    Some(NewsItem {
        id: link.clone(),
        title,
        link,
        description: extract_description(entry),
        pub_date: extract_pub_date(entry).unwrap_or(now),
        source: source.name.clone(),
        source_icon: source.icon.clone(),
        category: source.category.clone(),
        author: extract_author(entry),
        image_url: extract_image_url(entry).unwrap_or_default(),
    })
}

fn display_text(value: Option<&str>) -> Option<String> {
    value.map(decode_entities).filter(|v| !v.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn extract_description(entry: &RawEntry) -> String {
    let description = non_empty(entry.content_snippet.as_deref())
        .or_else(|| stripped(entry.description.as_deref()))
        .or_else(|| stripped(entry.content_encoded.as_deref()))
        .or_else(|| stripped(entry.content.as_deref()))
        .unwrap_or_default();

    truncate(&description, DESCRIPTION_MAX_CHARS)
}

fn stripped(html: Option<&str>) -> Option<String> {
    html.map(strip_html).filter(|text| !text.is_empty())
}

fn extract_author(entry: &RawEntry) -> String {
    display_text(entry.creator.as_deref())
        .or_else(|| display_text(entry.author.as_deref()))
        .or_else(|| display_text(entry.dc_creator.as_deref()))
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

fn extract_image_url(entry: &RawEntry) -> Option<String> {
    let media_content = entry
        .media_content
        .iter()
        .filter(|m| m.may_be_image())
        .map(|m| m.url.as_str());
    let media_thumbnail = entry.media_thumbnail.iter().map(|m| m.url.as_str());
    let media_group = entry
        .media_group
        .first()
        .filter(|m| m.may_be_image())
        .map(|m| m.url.as_str());
    let enclosure = entry
        .enclosure
        .as_ref()
        .filter(|e| {
            e.mime_type
                .as_deref()
                .map_or(true, |mime| mime.starts_with("image/"))
        })
        .map(|e| e.url.as_str());

    media_content
        .chain(media_thumbnail)
        .chain(media_group)
        .chain(enclosure)
        .find_map(valid_http_url)
        .or_else(|| {
            [entry.content.as_deref(), entry.content_encoded.as_deref()]
                .into_iter()
                .flatten()
                .filter_map(extract_img_src)
                .find_map(|src| valid_http_url(&src))
        })
}

fn extract_pub_date(entry: &RawEntry) -> Option<DateTime<Utc>> {
    [entry.iso_date.as_deref(), entry.pub_date.as_deref()]
        .into_iter()
        .flatten()
        .find_map(parse_date)
}

/// Parse the date formats seen in the wild: RFC 3339, RFC 2822 and a few
/// zone-less variants which are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%a, %d %b %Y %H:%M:%S"];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
