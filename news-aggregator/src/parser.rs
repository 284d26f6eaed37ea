use crate::types::{json_str, FeedPayload, FeedSource, FetchError, NewsItem, RawItem};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::{debug, info};

pub struct FeedParser {
    seen_titles: HashSet<String>,
}

impl FeedParser {
    pub fn new() -> Self {
        Self {
            seen_titles: HashSet::new(),
        }
    }

    /// Decode a conversion-service response body into items for `source`.
    pub fn parse_payload(source: &FeedSource, body: &[u8]) -> Result<Vec<NewsItem>, FetchError> {
        debug!("Parsing payload for {} ({} bytes)", source.key, body.len());

        let payload: FeedPayload = serde_json::from_slice(body).map_err(|e| FetchError::Parse {
            key: source.key.clone(),
            source: e,
        })?;

        if !payload.is_ok() {
            return Err(FetchError::Upstream {
                key: source.key.clone(),
                message: payload.message().unwrap_or("unknown error").to_string(),
            });
        }

        let raw_items = payload.items.unwrap_or_default();
        let total = raw_items.len();
        let items: Vec<NewsItem> = raw_items
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawItem>(value) {
                Ok(raw) => Some(Self::convert_item(source, &raw)),
                Err(e) => {
                    debug!("Skipping malformed item in {}: {}", source.key, e);
                    None
                }
            })
            .collect();

        if items.len() < total {
            info!("Skipped {} malformed items in {}", total - items.len(), source.key);
        }

        Ok(items)
    }

    fn convert_item(source: &FeedSource, raw: &RawItem) -> NewsItem {
        let image_url = non_empty(json_str(&raw.thumbnail))
            .or_else(|| non_empty(raw.enclosure_thumbnail()))
            .map(str::to_string);

        NewsItem {
            title: text_field(&raw.title),
            link: text_field(&raw.link),
            source: source.display_name.clone(),
            pub_date: text_field(&raw.pub_date),
            summary: text_field(&raw.description),
            image_url,
        }
    }

    /// Collapse items sharing a dedupe key, keeping the first one seen.
    pub fn deduplicate_items(&mut self, items: Vec<NewsItem>) -> Vec<NewsItem> {
        let total = items.len();
        let mut unique_items = Vec::with_capacity(total);

        for item in items {
            if self.seen_titles.insert(dedupe_key(&item.title)) {
                unique_items.push(item);
            } else {
                debug!("Removing duplicate item: {} ({})", item.title, item.source);
            }
        }

        let removed_count = total - unique_items.len();
        if removed_count > 0 {
            info!("Removed {} duplicate items", removed_count);
        }

        unique_items
    }

    /// Newest first, deduplicated, at most `max_items` long.
    pub fn finalize(&mut self, mut items: Vec<NewsItem>, max_items: usize) -> Vec<NewsItem> {
        sort_newest_first(&mut items);
        let mut unique_items = self.deduplicate_items(items);
        unique_items.truncate(max_items);
        unique_items
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

fn text_field(value: &Option<serde_json::Value>) -> String {
    json_str(value).unwrap_or_default().to_string()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Trimmed, lower-cased title.
pub fn dedupe_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Interpret a publication date for ordering. `None` when no format matches.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// Stable descending sort; undated items go last in their original order.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by_cached_key(|item| Reverse(parse_pub_date(&item.pub_date)));
}
