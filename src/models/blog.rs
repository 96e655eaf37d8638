use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the external API.
///
/// The API sends it either as a string or as a number; both are held as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(pub String);

impl BlogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication status of a blog post.
///
/// Unknown values coming from the API are kept verbatim in `Other` so they
/// can still be displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum BlogStatus {
    #[default]
    Published,
    Draft,
    Archived,
    Other(String),
}

impl BlogStatus {
    /// The statuses offered by the form.
    pub const SELECTABLE: [BlogStatus; 3] =
        [BlogStatus::Published, BlogStatus::Draft, BlogStatus::Archived];

    /// Parse a status as sent by the API. Empty input means `Published`.
    pub fn parse(s: &str) -> Self {
        match s {
            "" | "Published" => BlogStatus::Published,
            "Draft" => BlogStatus::Draft,
            "Archived" => BlogStatus::Archived,
            other => BlogStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlogStatus::Published => "Published",
            BlogStatus::Draft => "Draft",
            BlogStatus::Archived => "Archived",
            BlogStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, BlogStatus::Archived)
    }

    /// Badge style for the listing. Unrecognized statuses get the info badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            BlogStatus::Published => "badge-success",
            BlogStatus::Draft => "badge-warning",
            BlogStatus::Archived => "badge-neutral",
            BlogStatus::Other(_) => "badge-info",
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlogStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlogStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BlogStatus::parse(&s))
    }
}

/// An author as returned by the authors endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

/// Reference from a blog post to its (externally owned) author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: Option<String>,
    /// Display name, when the API embeds the author object.
    pub name: Option<String>,
}

/// A blog post in canonical shape, whatever the API response looked like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogRecord {
    pub id: BlogId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub status: BlogStatus,
    pub tags: Vec<String>,
    pub author: AuthorRef,
    pub published_date: Option<NaiveDate>,
    pub reviewed_at: Option<NaiveDate>,
    /// Free text such as "5 min read".
    pub read_time: String,
    pub is_top_rated: bool,
    pub is_archived: bool,
    pub image_url: Option<String>,
}

impl BlogRecord {
    /// Key for the public detail route: the slug, or the id when there is none.
    pub fn public_key(&self) -> &str {
        if self.slug.is_empty() {
            self.id.as_str()
        } else {
            &self.slug
        }
    }
}

/// A file picked in the form, held apart from the JSON payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment, guessing the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(BlogStatus::parse("Published"), BlogStatus::Published);
        assert_eq!(BlogStatus::parse(""), BlogStatus::Published);
        assert_eq!(BlogStatus::parse("Draft"), BlogStatus::Draft);
        assert_eq!(BlogStatus::parse("Archived"), BlogStatus::Archived);
        assert_eq!(
            BlogStatus::parse("Scheduled"),
            BlogStatus::Other("Scheduled".into())
        );
    }

    #[test]
    fn test_status_badge_fallback() {
        assert_eq!(BlogStatus::Published.badge_class(), "badge-success");
        assert_eq!(BlogStatus::Other("Weird".into()).badge_class(), "badge-info");
    }

    #[test]
    fn test_status_serializes_as_string() {
        let json = serde_json::to_string(&BlogStatus::Archived).unwrap();
        assert_eq!(json, "\"Archived\"");
        let other: BlogStatus = serde_json::from_str("\"Review\"").unwrap();
        assert_eq!(other.as_str(), "Review");
    }

    #[test]
    fn test_public_key_prefers_slug() {
        let mut record = BlogRecord {
            id: BlogId::new("42"),
            slug: "hello".into(),
            ..Default::default()
        };
        assert_eq!(record.public_key(), "hello");
        record.slug.clear();
        assert_eq!(record.public_key(), "42");
    }

    #[test]
    fn test_attachment_guesses_content_type() {
        let png = Attachment::new("cover.png", vec![1, 2, 3]);
        assert_eq!(png.content_type, "image/png");

        let unknown = Attachment::new("blob", vec![]);
        assert_eq!(unknown.content_type, "application/octet-stream");
    }
}
