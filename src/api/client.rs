use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::api::errors::ensure_success;
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::form::payload::CreatePayload;
use crate::models::blog::{Attachment, Author, BlogId, BlogRecord};
use crate::models::normalize::{normalize_authors, normalize_collection, normalize_record};

/// Collection endpoint: list (`GET`) and create (`POST`).
pub const COLLECTION_PATH: &str = "/blog_posts/";
/// Single-record endpoint, keyed by the `blog_id` query parameter.
pub const RECORD_PATH: &str = "/blog_posts/blog_post/";
pub const AUTHORS_PATH: &str = "/authors";

/// Multipart field carrying the JSON-encoded post data.
pub const BLOG_DATA_FIELD: &str = "blog_data";
/// Multipart field carrying the image file.
pub const FILE_FIELD: &str = "file";

/// The external blog API, as consumed by the admin pages.
///
/// Abstracted as a trait so page logic can be tested against a mock.
#[cfg_attr(test, mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait BlogApi: Send + Sync {
    /// Fetch every post, normalized from whichever collection shape the API returns.
    async fn list_blogs(&self) -> Result<Vec<BlogRecord>, AppError>;

    /// Fetch one post by id.
    async fn get_blog(&self, id: BlogId) -> Result<BlogRecord, AppError>;

    async fn list_authors(&self) -> Result<Vec<Author>, AppError>;

    /// Create a post from a full payload, with an optional image.
    async fn create_blog(
        &self,
        payload: CreatePayload,
        file: Option<Attachment>,
    ) -> Result<(), AppError>;

    /// Partially update a post. `payload` holds only the changed keys.
    async fn update_blog(
        &self,
        id: BlogId,
        payload: Map<String, Value>,
        file: Option<Attachment>,
    ) -> Result<(), AppError>;
}

/// `reqwest` implementation of BlogApi.
#[derive(Clone)]
pub struct HttpBlogApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpBlogApi {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create with an explicit client (useful for testing / DI).
    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn fetch_json(&self, request: reqwest::RequestBuilder) -> Result<Value, AppError> {
        let response = ensure_success(request.send().await?).await?;
        Ok(response.json::<Value>().await?)
    }

    async fn post_multipart(&self, url: String, form: Form) -> Result<(), AppError> {
        tracing::debug!(%url, "POST multipart");
        ensure_success(self.client.post(url).multipart(form).send().await?).await?;
        Ok(())
    }
}

/// Build the multipart body shared by create and update.
fn multipart_body(blog_data: String, file: Option<Attachment>) -> Result<Form, AppError> {
    let mut form = Form::new().text(BLOG_DATA_FIELD, blog_data);
    if let Some(file) = file {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| AppError::Transport(format!("Invalid attachment type: {e}")))?;
        form = form.part(FILE_FIELD, part);
    }
    Ok(form)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl BlogApi for HttpBlogApi {
    async fn list_blogs(&self) -> Result<Vec<BlogRecord>, AppError> {
        let url = self.config.endpoint(COLLECTION_PATH);
        tracing::debug!(%url, "GET blog collection");
        let body = self.fetch_json(self.client.get(url)).await?;
        Ok(normalize_collection(body))
    }

    async fn get_blog(&self, id: BlogId) -> Result<BlogRecord, AppError> {
        let url = self.config.endpoint(RECORD_PATH);
        tracing::debug!(%url, %id, "GET blog post");
        let request = self.client.get(url).query(&[("blog_id", id.as_str())]);
        let body = self.fetch_json(request).await?;
        Ok(normalize_record(&body))
    }

    async fn list_authors(&self) -> Result<Vec<Author>, AppError> {
        let url = self.config.endpoint(AUTHORS_PATH);
        tracing::debug!(%url, "GET authors");
        let body = self.fetch_json(self.client.get(url)).await?;
        Ok(normalize_authors(&body))
    }

    async fn create_blog(
        &self,
        payload: CreatePayload,
        file: Option<Attachment>,
    ) -> Result<(), AppError> {
        let form = multipart_body(serde_json::to_string(&payload)?, file)?;
        self.post_multipart(self.config.endpoint(COLLECTION_PATH), form)
            .await
    }

    async fn update_blog(
        &self,
        id: BlogId,
        payload: Map<String, Value>,
        file: Option<Attachment>,
    ) -> Result<(), AppError> {
        let path = format!("{}{}", COLLECTION_PATH, urlencoding::encode(id.as_str()));
        let form = multipart_body(serde_json::to_string(&payload)?, file)?;
        self.post_multipart(self.config.endpoint(&path), form).await
    }
}
