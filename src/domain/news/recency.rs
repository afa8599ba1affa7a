use super::model::NewsItem;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_RETENTION_DAYS: i64 = 7;
pub const MAX_RETENTION_DAYS: i64 = 3650;

/// Drop items published before `now - retention_days`.
/// The boundary is inclusive: an item exactly `retention_days` old is kept.
/// A window too large to represent keeps everything.
pub fn filter_recent(items: Vec<NewsItem>, retention_days: i64, now: DateTime<Utc>) -> Vec<NewsItem> {
    let cutoff = Duration::try_days(retention_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    items
        .into_iter()
        .filter(|item| item.pub_date >= cutoff)
        .collect()
}
