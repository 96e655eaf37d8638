#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use blog_admin::api::client::HttpBlogApi;
use blog_admin::config::ApiConfig;
use blog_admin::navigation::{Navigator, Route};

/// A canned response for one endpoint of the fake API.
#[derive(Debug, Clone)]
pub enum Canned {
    Json(StatusCode, Value),
    Text(StatusCode, String),
}

impl Canned {
    pub fn ok(body: Value) -> Self {
        Canned::Json(StatusCode::OK, body)
    }

    pub fn status(code: u16, body: Value) -> Self {
        Canned::Json(StatusCode::from_u16(code).expect("valid status"), body)
    }

    pub fn text(code: u16, body: &str) -> Self {
        Canned::Text(
            StatusCode::from_u16(code).expect("valid status"),
            body.to_string(),
        )
    }
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        match self {
            Canned::Json(status, body) => (status, axum::Json(body)).into_response(),
            Canned::Text(status, body) => (status, body).into_response(),
        }
    }
}

/// What each endpoint of the fake API answers.
#[derive(Debug, Clone)]
pub struct FakeResponses {
    pub collection: Canned,
    pub record: Canned,
    pub authors: Canned,
    pub submit: Canned,
}

impl Default for FakeResponses {
    fn default() -> Self {
        Self {
            collection: Canned::ok(json!([])),
            record: Canned::ok(json!({})),
            authors: Canned::ok(json!([{ "id": "a1", "name": "Ada" }])),
            submit: Canned::ok(json!({ "message": "ok" })),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One request as seen by the fake API.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Option<String>,
    /// The `blog_data` multipart field, parsed as JSON.
    pub blog_data: Option<Value>,
    pub file: Option<RecordedFile>,
}

#[derive(Clone)]
struct FakeState {
    responses: FakeResponses,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeState {
    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

/// An in-process stand-in for the external blog API.
///
/// The server task lives as long as this struct.
pub struct FakeApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    server: JoinHandle<()>,
}

impl FakeApi {
    pub async fn start(responses: FakeResponses) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            responses,
            requests: requests.clone(),
        };

        let router = Router::new()
            .route("/blog_posts/", get(list_blogs).post(create_blog))
            .route("/blog_posts/blog_post/", get(get_blog))
            .route("/blog_posts/{id}", axum::routing::post(update_blog))
            .route("/authors", get(list_authors))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake API");
        let addr = listener.local_addr().expect("Failed to get fake API address");
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Fake API crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            server,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url.clone())
    }

    pub fn client(&self) -> HttpBlogApi {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");
        HttpBlogApi::with_client(client, self.config())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Only the POSTs (create/update).
    pub fn submissions(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn list_blogs(State(state): State<FakeState>) -> Canned {
    state.record(get_request("/blog_posts/", None));
    state.responses.collection.clone()
}

async fn get_blog(State(state): State<FakeState>, RawQuery(query): RawQuery) -> Canned {
    state.record(get_request("/blog_posts/blog_post/", query));
    state.responses.record.clone()
}

async fn list_authors(State(state): State<FakeState>) -> Canned {
    state.record(get_request("/authors", None));
    state.responses.authors.clone()
}

async fn create_blog(State(state): State<FakeState>, multipart: Multipart) -> Canned {
    let request = read_multipart("/blog_posts/".to_string(), multipart).await;
    state.record(request);
    state.responses.submit.clone()
}

async fn update_blog(
    State(state): State<FakeState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Canned {
    let request = read_multipart(format!("/blog_posts/{id}"), multipart).await;
    state.record(request);
    state.responses.submit.clone()
}

fn get_request(path: &str, query: Option<String>) -> RecordedRequest {
    RecordedRequest {
        method: "GET",
        path: path.to_string(),
        query,
        blog_data: None,
        file: None,
    }
}

async fn read_multipart(path: String, mut multipart: Multipart) -> RecordedRequest {
    let mut blog_data = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.expect("valid multipart") {
        match field.name().unwrap_or("") {
            "blog_data" => {
                let text = field.text().await.expect("readable blog_data");
                blog_data = Some(serde_json::from_str(&text).expect("blog_data is JSON"));
            }
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.expect("readable file").to_vec();
                file = Some(RecordedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    RecordedRequest {
        method: "POST",
        path,
        query: None,
        blog_data,
        file,
    }
}

/// Navigator that remembers where it was sent.
#[derive(Default)]
pub struct RecordingNavigator {
    pub navigated: RefCell<Vec<Route>>,
    pub opened: RefCell<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.navigated.borrow_mut().push(route.clone());
    }

    fn open_in_new_context(&self, route: &Route) {
        self.opened.borrow_mut().push(route.clone());
    }
}
