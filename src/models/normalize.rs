//! Lenient decoding of blog API responses into canonical records.
//!
//! The API has shipped several response layouts over time. Anything that does
//! not match a known layout decodes to an empty result instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::models::blog::{Author, AuthorRef, BlogId, BlogRecord, BlogStatus};

/// The container layouts a collection response can arrive in.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionShape {
    /// `[ {...}, {...} ]`
    Bare(Vec<Value>),
    /// `{ "results": [ ... ] }`
    Results(Vec<Value>),
    /// `{ "posts": [ ... ] }`
    Posts(Vec<Value>),
    /// Anything else.
    Unrecognized,
}

impl CollectionShape {
    pub fn detect(value: Value) -> Self {
        match value {
            Value::Array(items) => CollectionShape::Bare(items),
            Value::Object(mut obj) => {
                if let Some(Value::Array(items)) = obj.remove("results") {
                    CollectionShape::Results(items)
                } else if let Some(Value::Array(items)) = obj.remove("posts") {
                    CollectionShape::Posts(items)
                } else {
                    CollectionShape::Unrecognized
                }
            }
            _ => CollectionShape::Unrecognized,
        }
    }

    fn into_items(self) -> Vec<Value> {
        match self {
            CollectionShape::Bare(items)
            | CollectionShape::Results(items)
            | CollectionShape::Posts(items) => items,
            CollectionShape::Unrecognized => Vec::new(),
        }
    }
}

/// Decode a collection response into canonical records.
///
/// Entries that are not JSON objects are skipped.
pub fn normalize_collection(value: Value) -> Vec<BlogRecord> {
    let shape = CollectionShape::detect(value);
    if shape == CollectionShape::Unrecognized {
        tracing::warn!("Unrecognized blog collection shape, showing no posts");
    }
    shape
        .into_items()
        .iter()
        .filter_map(|item| match item {
            Value::Object(obj) => Some(record_from_object(obj)),
            other => {
                tracing::warn!("Skipping non-object collection entry: {other}");
                None
            }
        })
        .collect()
}

/// Decode a single-record response. Non-object bodies yield an empty record.
pub fn normalize_record(value: &Value) -> BlogRecord {
    match value {
        Value::Object(obj) => record_from_object(obj),
        _ => {
            tracing::warn!("Blog record response is not an object");
            BlogRecord::default()
        }
    }
}

/// Decode the authors list. Anything but an array yields no authors.
pub fn normalize_authors(value: &Value) -> Vec<Author> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let id = scalar_text(obj.get("id")?)?;
            Some(Author {
                id,
                name: text_field(obj, &["name"]),
            })
        })
        .collect()
}

fn record_from_object(obj: &Map<String, Value>) -> BlogRecord {
    let embedded_author = obj.get("author").and_then(Value::as_object);

    let author_id = obj
        .get("author_id")
        .and_then(scalar_text)
        .filter(|id| !id.is_empty())
        .or_else(|| embedded_author.and_then(|a| a.get("id")).and_then(scalar_text))
        .filter(|id| !id.is_empty());
    let author_name = embedded_author
        .map(|a| text_field(a, &["name"]))
        .filter(|name| !name.is_empty());

    let status = BlogStatus::parse(&text_field(obj, &["status"]));

    BlogRecord {
        id: BlogId(obj.get("id").and_then(scalar_text).unwrap_or_default()),
        slug: text_field(obj, &["slug"]),
        title: text_field(obj, &["title"]),
        description: text_field(obj, &["description"]),
        content: text_field(obj, &["content"]),
        status,
        tags: obj.get("tags").map(tags_from_value).unwrap_or_default(),
        author: AuthorRef {
            id: author_id,
            name: author_name,
        },
        published_date: date_field(obj, &["publishedDate", "published_date"]),
        reviewed_at: date_field(obj, &["reviewed_at", "reviewedAt"]),
        read_time: text_field(obj, &["readingTime", "read_time"]),
        is_top_rated: obj.get("isTopRated").is_some_and(truthy),
        is_archived: obj.get("is_archived").is_some_and(truthy),
        image_url: Some(text_field(obj, &["bannerImageUrl", "image_url"]))
            .filter(|url| !url.is_empty()),
    }
}

/// First non-empty string under any of `keys`, else an empty string.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(scalar_text))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// First non-empty date under any of `keys`. Numbers are epoch milliseconds.
fn date_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    let value = keys
        .iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| match value {
            Value::String(s) => !s.trim().is_empty(),
            Value::Number(_) => true,
            _ => false,
        })?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|millis| millis as i64))
            .and_then(date_from_millis),
        Value::String(s) => parse_calendar_date(s),
        _ => None,
    }
}

fn date_from_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Tags arrive either as an array or as a comma-joined string.
pub fn tags_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        Value::String(joined) => split_tags(joined),
        _ => Vec::new(),
    }
}

/// Split a comma-joined tag string, trimming entries and dropping empties.
pub fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tags for editing in a single text input.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse any of the date representations the API has been seen to emit.
///
/// Zoned timestamps are converted to UTC before the date is taken. A long run of
/// digits is read as epoch milliseconds.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc().date());
    }

    // `%z` does not take a `Z` suffix.
    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+0000"),
        None => raw.to_string(),
    };
    if let Some(dt) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&zoned, format).ok())
    {
        return Some(dt.naive_utc().date());
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.naive_utc().date());
    }
    if raw.len() > 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse().ok().and_then(date_from_millis);
    }
    None
}

/// Format a date for a date input: `YYYY-MM-DD`, or empty when absent.
pub fn format_calendar_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
