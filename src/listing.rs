use crate::api::client::BlogApi;
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::blog::{BlogId, BlogRecord};
use crate::models::normalize::format_calendar_date;
use crate::navigation::{Navigator, Route};

/// Message shown when the collection cannot be fetched.
pub const LOAD_FAILED: &str = "Failed to load blogs. Please try again.";
/// Number of tags shown on a card before the "+N more" suffix.
pub const VISIBLE_TAGS: usize = 3;

/// State of the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogListing {
    records: Vec<BlogRecord>,
    error: Option<String>,
    is_loading: bool,
}

impl Default for BlogListing {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            error: None,
            is_loading: true,
        }
    }
}

impl BlogListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[BlogRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Record the result of the collection fetch. Failures leave the list empty.
    pub fn apply_fetch(&mut self, result: Result<Vec<BlogRecord>, AppError>) {
        self.is_loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Error fetching blogs: {e}");
                self.records = Vec::new();
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    pub fn cards(&self, config: &ApiConfig) -> Vec<BlogCard> {
        self.records
            .iter()
            .map(|record| BlogCard::from_record(record, config))
            .collect()
    }
}

/// Fetch the collection into `listing`.
pub async fn load(listing: &mut BlogListing, api: &dyn BlogApi) {
    let result = api.list_blogs().await;
    listing.apply_fetch(result);
}

/// What a listing button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    Create,
    Edit(BlogId),
    /// Open the public page, keyed by slug or id.
    View(String),
}

impl ListingAction {
    pub fn dispatch(&self, nav: &dyn Navigator) {
        match self {
            ListingAction::Create => nav.navigate(&Route::CreateBlog),
            ListingAction::Edit(id) => nav.navigate(&Route::EditBlog(id.clone())),
            ListingAction::View(key) => nav.open_in_new_context(&Route::ViewBlog(key.clone())),
        }
    }
}

/// Display-ready summary of one post.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogCard {
    pub title: String,
    pub description: String,
    pub status_label: String,
    pub badge_class: &'static str,
    pub is_top_rated: bool,
    /// `None` means no image block at all.
    pub image_src: Option<String>,
    pub visible_tags: Vec<String>,
    /// `"+N more"` when tags were cut off.
    pub more_tags: Option<String>,
    /// `YYYY-MM-DD` or `"N/A"`.
    pub published: String,
    pub read_time: Option<String>,
    pub edit: ListingAction,
    pub view: ListingAction,
}

impl BlogCard {
    pub fn from_record(record: &BlogRecord, config: &ApiConfig) -> Self {
        let hidden = record.tags.len().saturating_sub(VISIBLE_TAGS);
        let published = match record.published_date {
            Some(_) => format_calendar_date(record.published_date),
            None => "N/A".to_string(),
        };

        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            status_label: record.status.to_string(),
            badge_class: record.status.badge_class(),
            is_top_rated: record.is_top_rated,
            image_src: record
                .image_url
                .as_deref()
                .and_then(|path| config.asset_url(path)),
            visible_tags: record.tags.iter().take(VISIBLE_TAGS).cloned().collect(),
            more_tags: (hidden > 0).then(|| format!("+{hidden} more")),
            published,
            read_time: Some(record.read_time.clone()).filter(|t| !t.is_empty()),
            edit: ListingAction::Edit(record.id.clone()),
            view: ListingAction::View(record.public_key().to_string()),
        }
    }
}
