use std::collections::BTreeMap;
use std::fmt;

use crate::error::AppError;
use crate::form::payload::Submission;
use crate::form::validation::{validate, FieldErrors};
use crate::models::blog::{Attachment, Author, BlogId, BlogRecord, BlogStatus};
use crate::models::normalize::{format_calendar_date, join_tags};
use crate::models::slug::slugify;
use crate::navigation::Route;

/// Message shown when the post being edited cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load blog post data. Please try again.";
/// Message shown when the authors list cannot be loaded.
pub const AUTHORS_FAILED: &str = "Failed to load authors";

/// Query values that routing produces for a missing id.
const ABSENT_IDS: [&str; 3] = ["", "undefined", "null"];

/// Whether the form creates a new post or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(BlogId),
}

impl FormMode {
    /// Decide the mode from the `id` query parameter.
    pub fn from_query(id: Option<&str>) -> Self {
        match id {
            Some(id) if !ABSENT_IDS.contains(&id) => FormMode::Edit(BlogId::new(id)),
            _ => FormMode::Create,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// The user-editable fields of the form, named by their wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Slug,
    Description,
    Content,
    Status,
    Tags,
    ReviewedAt,
    ReadTime,
    PublishedDate,
    IsTopRated,
    AuthorId,
}

impl FormField {
    /// Key used in the JSON payload.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Slug => "slug",
            FormField::Description => "description",
            FormField::Content => "content",
            FormField::Status => "status",
            FormField::Tags => "tags",
            FormField::ReviewedAt => "reviewed_at",
            FormField::ReadTime => "read_time",
            FormField::PublishedDate => "published_date",
            FormField::IsTopRated => "isTopRated",
            FormField::AuthorId => "author_id",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A value entered into one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Live values of the form inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub status: BlogStatus,
    /// Comma-joined, as typed.
    pub tags: String,
    /// `YYYY-MM-DD` or empty.
    pub reviewed_at: String,
    pub read_time: String,
    /// `YYYY-MM-DD` or empty.
    pub published_date: String,
    pub is_top_rated: bool,
    pub author_id: Option<String>,
}

impl BlogForm {
    /// Seed the inputs from a loaded post.
    pub fn from_record(record: &BlogRecord) -> Self {
        Self {
            title: record.title.clone(),
            slug: record.slug.clone(),
            description: record.description.clone(),
            content: record.content.clone(),
            status: record.status.clone(),
            tags: join_tags(&record.tags),
            reviewed_at: format_calendar_date(record.reviewed_at),
            read_time: record.read_time.clone(),
            published_date: format_calendar_date(record.published_date),
            is_top_rated: record.is_top_rated,
            author_id: record.author.id.clone(),
        }
    }

    /// Current text of a field, as shown in its input.
    pub fn text(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Slug => self.slug.clone(),
            FormField::Description => self.description.clone(),
            FormField::Content => self.content.clone(),
            FormField::Status => self.status.to_string(),
            FormField::Tags => self.tags.clone(),
            FormField::ReviewedAt => self.reviewed_at.clone(),
            FormField::ReadTime => self.read_time.clone(),
            FormField::PublishedDate => self.published_date.clone(),
            FormField::IsTopRated => self.is_top_rated.to_string(),
            FormField::AuthorId => self.author_id.clone().unwrap_or_default(),
        }
    }

    /// Write one field. Returns `false` when the value kind does not fit the field.
    fn set(&mut self, field: FormField, value: &FieldValue) -> bool {
        let text = match value {
            FieldValue::Flag(flag) if field == FormField::IsTopRated => {
                self.is_top_rated = *flag;
                return true;
            }
            FieldValue::Flag(_) => return false,
            FieldValue::Text(text) => text.clone(),
        };
        match field {
            FormField::Title => self.title = text,
            FormField::Slug => self.slug = text,
            FormField::Description => self.description = text,
            FormField::Content => self.content = text,
            FormField::Status => self.status = BlogStatus::parse(&text),
            FormField::Tags => self.tags = text,
            FormField::ReviewedAt => self.reviewed_at = text,
            FormField::ReadTime => self.read_time = text,
            FormField::PublishedDate => self.published_date = text,
            FormField::AuthorId => self.author_id = Some(text).filter(|id| !id.is_empty()),
            FormField::IsTopRated => return false,
        }
        true
    }
}

/// Fields the user touched since the last load or successful submit.
///
/// The image is tracked by a flag only; its bytes live in [`FormState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    fields: BTreeMap<FormField, FieldValue>,
    file: bool,
}

impl ChangeSet {
    pub fn record(&mut self, field: FormField, value: FieldValue) {
        self.fields.insert(field, value);
    }

    pub fn mark_file(&mut self) {
        self.file = true;
    }

    pub fn fields(&self) -> impl Iterator<Item = (&FormField, &FieldValue)> {
        self.fields.iter()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn file_changed(&self) -> bool {
        self.file
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && !self.file
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.file = false;
    }
}

/// Complete state of the create/edit page.
#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    values: BlogForm,
    changes: ChangeSet,
    file: Option<Attachment>,
    authors: Vec<Author>,
    field_errors: FieldErrors,
    submit_error: Option<String>,
    authors_error: Option<String>,
    success_message: Option<String>,
    is_fetching: bool,
    is_submitting: bool,
}

impl FormState {
    pub fn new(mode: FormMode) -> Self {
        Self {
            is_fetching: mode.is_edit(),
            mode,
            values: BlogForm::default(),
            changes: ChangeSet::default(),
            file: None,
            authors: Vec::new(),
            field_errors: FieldErrors::new(),
            submit_error: None,
            authors_error: None,
            success_message: None,
            is_submitting: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &BlogForm {
        &self.values
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn file(&self) -> Option<&Attachment> {
        self.file.as_ref()
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn authors_error(&self) -> Option<&str> {
        self.authors_error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Apply a user edit and record it as changed.
    ///
    /// A title edit also regenerates the slug and records both.
    pub fn update(&mut self, field: FormField, value: impl Into<FieldValue>) {
        let value = value.into();
        if !self.values.set(field, &value) {
            tracing::warn!(%field, ?value, "Ignoring value of the wrong kind");
            return;
        }
        if let (FormField::Title, FieldValue::Text(title)) = (field, &value) {
            let slug = slugify(title);
            self.values.slug = slug.clone();
            self.changes.record(FormField::Slug, FieldValue::Text(slug));
        }
        self.changes.record(field, value);
    }

    /// Hold a newly picked image and mark it changed. No selection is a no-op.
    pub fn select_file(&mut self, file: Option<Attachment>) {
        if let Some(file) = file {
            self.file = Some(file);
            self.changes.mark_file();
        }
    }

    pub fn apply_authors(&mut self, result: Result<Vec<Author>, AppError>) {
        match result {
            Ok(authors) => {
                self.authors = authors;
                self.authors_error = None;
            }
            Err(e) => {
                tracing::warn!("Error fetching authors: {e}");
                self.authors = Vec::new();
                self.authors_error = Some(AUTHORS_FAILED.to_string());
            }
        }
    }

    /// Seed the form from the post being edited. Loading is not a change.
    pub fn apply_loaded(&mut self, result: Result<BlogRecord, AppError>) {
        self.is_fetching = false;
        self.field_errors.clear();
        self.submit_error = None;
        match result {
            Ok(record) => {
                self.values = BlogForm::from_record(&record);
                self.changes.clear();
            }
            Err(e) => {
                tracing::warn!("Error fetching blog post: {e}");
                self.submit_error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Validate and build the submission, marking the form busy.
    ///
    /// Returns `None` when a submission is already in flight or validation
    /// failed; in the latter case the field errors are populated.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.is_submitting {
            return None;
        }
        self.submit_error = None;
        self.success_message = None;
        self.field_errors = validate(&self.values);
        if !self.field_errors.is_empty() {
            return None;
        }
        self.is_submitting = true;
        let submission = match &self.mode {
            FormMode::Create => Submission::create(&self.values, self.file.as_ref()),
            FormMode::Edit(id) => {
                Submission::update(id.clone(), &self.values, &self.changes, self.file.as_ref())
            }
        };
        Some(submission)
    }

    /// Record the outcome of `submission`. On success returns where to go next.
    pub fn finish_submit(
        &mut self,
        submission: &Submission,
        result: Result<(), AppError>,
    ) -> Option<Route> {
        self.is_submitting = false;
        match result {
            Ok(()) => {
                self.success_message = Some(submission.success_message().to_string());
                self.changes.clear();
                Some(Route::Home)
            }
            Err(e) => {
                tracing::error!("Error submitting blog post: {e}");
                self.submit_error = Some(submission.failure_message(&e));
                None
            }
        }
    }
}
