use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::client::BlogApi;
use crate::error::AppError;
use crate::form::state::{BlogForm, ChangeSet, FieldValue, FormField};
use crate::models::blog::{Attachment, BlogId, BlogStatus};
use crate::models::normalize::split_tags;

/// Full post data sent when creating a post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePayload {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub status: BlogStatus,
    pub tags: Vec<String>,
    pub reviewed_at: String,
    pub read_time: String,
    pub published_date: String,
    #[serde(rename = "isTopRated")]
    pub is_top_rated: bool,
    pub is_archived: bool,
    pub author_id: String,
}

impl CreatePayload {
    pub fn from_form(values: &BlogForm) -> Self {
        Self {
            title: values.title.clone(),
            slug: values.slug.clone(),
            description: values.description.clone(),
            content: values.content.clone(),
            status: values.status.clone(),
            tags: split_tags(&values.tags),
            reviewed_at: values.reviewed_at.clone(),
            read_time: values.read_time.clone(),
            published_date: values.published_date.clone(),
            is_top_rated: values.is_top_rated,
            is_archived: values.status.is_archived(),
            author_id: values.author_id.clone().unwrap_or_default(),
        }
    }
}

/// Build a partial-update payload from the changed fields.
///
/// Only keys in `changes` are included, except `is_archived`, which is always
/// recomputed from the current status even when the status was not touched.
pub fn update_payload(values: &BlogForm, changes: &ChangeSet) -> Map<String, Value> {
    let mut payload = Map::new();
    for (field, value) in changes.fields() {
        let json = match (field, value) {
            (FormField::Tags, FieldValue::Text(joined)) => Value::from(split_tags(joined)),
            (_, FieldValue::Text(text)) => Value::from(text.as_str()),
            (_, FieldValue::Flag(flag)) => Value::from(*flag),
        };
        payload.insert(field.key().to_string(), json);
    }
    payload.insert(
        "is_archived".to_string(),
        Value::from(values.status.is_archived()),
    );
    payload
}

/// A ready-to-send form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create {
        payload: CreatePayload,
        file: Option<Attachment>,
    },
    Update {
        id: BlogId,
        payload: Map<String, Value>,
        /// Present only if the file itself was changed.
        file: Option<Attachment>,
    },
}

impl Submission {
    pub fn create(values: &BlogForm, file: Option<&Attachment>) -> Self {
        Submission::Create {
            payload: CreatePayload::from_form(values),
            file: file.cloned(),
        }
    }

    pub fn update(
        id: BlogId,
        values: &BlogForm,
        changes: &ChangeSet,
        file: Option<&Attachment>,
    ) -> Self {
        Submission::Update {
            id,
            payload: update_payload(values, changes),
            file: if changes.file_changed() {
                file.cloned()
            } else {
                None
            },
        }
    }

    pub async fn send(self, api: &dyn BlogApi) -> Result<(), AppError> {
        match self {
            Submission::Create { payload, file } => api.create_blog(payload, file).await,
            Submission::Update { id, payload, file } => {
                api.update_blog(id, payload, file).await
            }
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Submission::Create { .. } => "Blog post created successfully!",
            Submission::Update { .. } => "Blog post updated successfully!",
        }
    }

    pub fn failure_fallback(&self) -> &'static str {
        match self {
            Submission::Create { .. } => "Failed to create blog post",
            Submission::Update { .. } => "Failed to update blog post",
        }
    }

    /// User-facing text for a failed submission: the API's message when it
    /// sent one, otherwise the fixed fallback for this kind of submission.
    pub fn failure_message(&self, err: &AppError) -> String {
        err.api_message()
            .unwrap_or_else(|| self.failure_fallback())
            .to_string()
    }
}
