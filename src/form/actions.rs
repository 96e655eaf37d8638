use crate::api::client::BlogApi;
use crate::error::AppError;
use crate::form::state::{FormMode, FormState};
use crate::models::blog::{Author, BlogRecord};
use crate::navigation::{Navigator, REDIRECT_DELAY};

/// Results of the fetches a form page makes when it mounts.
#[derive(Debug)]
pub struct MountData {
    /// The mode the fetches were made for.
    pub mode: FormMode,
    pub authors: Result<Vec<Author>, AppError>,
    /// Only fetched in edit mode.
    pub record: Option<Result<BlogRecord, AppError>>,
}

/// Fetch the authors list and, in edit mode, the post being edited.
///
/// Both requests run concurrently; a failure in one does not affect the other.
pub async fn fetch_for_mode(api: &dyn BlogApi, mode: &FormMode) -> MountData {
    let record = async {
        match mode {
            FormMode::Edit(id) => Some(api.get_blog(id.clone()).await),
            FormMode::Create => None,
        }
    };
    let (authors, record) = futures::join!(api.list_authors(), record);
    MountData {
        mode: mode.clone(),
        authors,
        record,
    }
}

impl FormState {
    /// Apply mount results. Results fetched for another mode are dropped.
    pub fn apply_mount(&mut self, data: MountData) {
        if &data.mode != self.mode() {
            tracing::debug!(fetched = ?data.mode, current = ?self.mode(), "Dropping stale form data");
            return;
        }
        self.apply_authors(data.authors);
        if let Some(record) = data.record {
            self.apply_loaded(record);
        }
    }
}

/// Load everything the form needs.
pub async fn mount(state: &mut FormState, api: &dyn BlogApi) {
    let data = fetch_for_mode(api, state.mode()).await;
    state.apply_mount(data);
}

/// Validate, send, and record the outcome; on success schedule the redirect.
///
/// Returns `true` when the post was saved.
pub async fn submit(state: &mut FormState, api: &dyn BlogApi, nav: &dyn Navigator) -> bool {
    let Some(submission) = state.begin_submit() else {
        return false;
    };
    let result = submission.clone().send(api).await;
    match state.finish_submit(&submission, result) {
        Some(route) => {
            nav.navigate_after(&route, REDIRECT_DELAY);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockBlogApi;
    use crate::form::state::FormField;
    use crate::models::blog::{Attachment, BlogId};
    use crate::navigation::Route;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        visited: RefCell<Vec<Route>>,
    }

    impl Navigator for Recorder {
        fn navigate(&self, route: &Route) {
            self.visited.borrow_mut().push(route.clone());
        }

        fn open_in_new_context(&self, route: &Route) {
            self.visited.borrow_mut().push(route.clone());
        }
    }

    fn fill(state: &mut FormState) {
        state.update(FormField::Title, "First post");
        state.update(FormField::Description, "desc");
        state.update(FormField::Content, "body");
        state.update(FormField::PublishedDate, "2024-06-01");
        state.update(FormField::ReadTime, "3 min");
        state.update(FormField::AuthorId, "a1");
    }

    fn record() -> BlogRecord {
        crate::models::normalize::normalize_record(&json!({
            "id": "9",
            "title": "Old",
            "slug": "old",
            "description": "old desc",
            "content": "old body",
            "status": "Draft",
            "tags": "a, b ,c",
            "author_id": "a1",
            "published_date": "2024-01-01T00:00:00Z",
            "read_time": "2 min"
        }))
    }

    #[tokio::test]
    async fn test_mount_create_skips_record_fetch() {
        let mut api = MockBlogApi::new();
        api.expect_list_authors().times(1).returning(|| {
            Ok(vec![Author {
                id: "a1".into(),
                name: "Ada".into(),
            }])
        });
        api.expect_get_blog().never();

        let mut state = FormState::new(FormMode::Create);
        mount(&mut state, &api).await;

        assert_eq!(state.authors().len(), 1);
        assert!(state.authors_error().is_none());
    }

    #[tokio::test]
    async fn test_mount_edit_with_failed_authors() {
        let mut api = MockBlogApi::new();
        api.expect_list_authors()
            .returning(|| Err(AppError::Transport("refused".into())));
        api.expect_get_blog()
            .withf(|id| id.as_str() == "9")
            .returning(|_| Ok(record()));

        let mut state = FormState::new(FormMode::Edit(BlogId::new("9")));
        mount(&mut state, &api).await;

        assert!(state.authors_error().is_some());
        assert_eq!(state.values().title, "Old");
        assert_eq!(state.values().tags, "a, b, c");
        assert!(state.changes().is_empty());
    }

    #[tokio::test]
    async fn test_mount_data_for_previous_mode_is_dropped() {
        let mut api = MockBlogApi::new();
        api.expect_list_authors().returning(|| Ok(Vec::new()));
        api.expect_get_blog().returning(|_| Ok(record()));

        let stale = fetch_for_mode(&api, &FormMode::Edit(BlogId::new("9"))).await;

        // The query lost its id while the edit fetch was in flight.
        let mut state = FormState::new(FormMode::Create);
        state.apply_mount(stale);

        assert_eq!(state.values().title, "");
        assert!(state.changes().is_empty());
        assert_eq!(state.mode(), &FormMode::Create);

        let current = fetch_for_mode(&api, &FormMode::Create).await;
        state.apply_mount(current);
        assert!(state.authors_error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_submit_makes_no_request() {
        let mut api = MockBlogApi::new();
        api.expect_create_blog().never();
        api.expect_update_blog().never();
        let nav = Recorder::default();

        let mut state = FormState::new(FormMode::Create);
        fill(&mut state);
        state.update(FormField::Description, "");

        assert!(!submit(&mut state, &api, &nav).await);
        assert_eq!(
            state.field_errors().keys().copied().collect::<Vec<_>>(),
            vec![FormField::Description]
        );
        assert!(nav.visited.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_create_submit_sends_full_payload_and_redirects() {
        let mut api = MockBlogApi::new();
        api.expect_create_blog()
            .withf(|payload, file| {
                payload.slug == "first-post"
                    && payload.tags.is_empty()
                    && !payload.is_archived
                    && file.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let nav = Recorder::default();

        let mut state = FormState::new(FormMode::Create);
        fill(&mut state);

        assert!(submit(&mut state, &api, &nav).await);
        assert_eq!(*nav.visited.borrow(), vec![Route::Home]);
        assert_eq!(state.success_message(), Some("Blog post created successfully!"));
    }

    #[tokio::test]
    async fn test_edit_submit_sends_only_description() {
        let mut api = MockBlogApi::new();
        api.expect_update_blog()
            .withf(|id, payload, file| {
                id.as_str() == "9"
                    && serde_json::Value::Object(payload.clone())
                        == json!({ "description": "fresh", "is_archived": false })
                    && file.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let nav = Recorder::default();

        let mut state = FormState::new(FormMode::Edit(BlogId::new("9")));
        state.apply_loaded(Ok(record()));
        state.update(FormField::Description, "fresh");

        assert!(submit(&mut state, &api, &nav).await);
        assert!(state.changes().is_empty());
    }

    #[tokio::test]
    async fn test_edit_file_only_update_still_sent() {
        let mut api = MockBlogApi::new();
        api.expect_update_blog()
            .withf(|_, payload, file| {
                serde_json::Value::Object(payload.clone()) == json!({ "is_archived": false })
                    && file.as_ref().map(|f| f.file_name.as_str()) == Some("cover.jpg")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        let nav = Recorder::default();

        let mut state = FormState::new(FormMode::Edit(BlogId::new("9")));
        state.apply_loaded(Ok(record()));
        state.select_file(Some(Attachment::new("cover.jpg", vec![0xFF, 0xD8])));

        assert!(submit(&mut state, &api, &nav).await);
    }

    #[tokio::test]
    async fn test_failed_submit_shows_api_message_and_stays() {
        let mut api = MockBlogApi::new();
        api.expect_update_blog().returning(|_, _, _| {
            Err(AppError::Status {
                status: 400,
                message: Some("Slug taken".into()),
            })
        });
        let nav = Recorder::default();

        let mut state = FormState::new(FormMode::Edit(BlogId::new("9")));
        state.apply_loaded(Ok(record()));
        state.update(FormField::Slug, "taken");

        assert!(!submit(&mut state, &api, &nav).await);
        assert_eq!(state.submit_error(), Some("Slug taken"));
        assert!(state.changes().contains(FormField::Slug));
        assert!(nav.visited.borrow().is_empty());
    }
}
