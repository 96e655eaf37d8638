use std::time::Duration;

use crate::models::blog::BlogId;

/// Delay between a successful submit and the redirect home.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Path of the blog form page.
pub const FORM_PATH: &str = "/create-blog";

/// Places the admin pages can send the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// The form in create mode.
    CreateBlog,
    /// The form in edit mode for one post.
    EditBlog(BlogId),
    /// The public detail page, keyed by slug (or id when there is no slug).
    ViewBlog(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::CreateBlog => FORM_PATH.to_string(),
            Route::EditBlog(id) => {
                format!("{FORM_PATH}?id={}", urlencoding::encode(id.as_str()))
            }
            Route::ViewBlog(key) => format!("/blog/{}", urlencoding::encode(key)),
        }
    }
}

/// Route transitions, abstracted so page logic can run without a browser.
pub trait Navigator {
    /// Transition the current view to `route`.
    fn navigate(&self, route: &Route);

    /// Open `route` in a new browsing context (tab/window).
    fn open_in_new_context(&self, route: &Route);

    /// Transition after `delay`. Implementations without timers navigate
    /// immediately.
    fn navigate_after(&self, route: &Route, delay: Duration) {
        let _ = delay;
        self.navigate(route);
    }
}

/// Navigator backed by the Leptos router.
///
/// Must be created inside a component rendered under `<Router>`.
#[derive(Clone)]
pub struct RouterNavigator {
    navigate: std::rc::Rc<dyn Fn(&str, leptos_router::NavigateOptions)>,
}

impl RouterNavigator {
    pub fn from_router() -> Self {
        let navigate = leptos_router::hooks::use_navigate();
        Self {
            navigate: std::rc::Rc::new(navigate),
        }
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, route: &Route) {
        (self.navigate)(&route.path(), Default::default());
    }

    fn open_in_new_context(&self, route: &Route) {
        let path = route.path();
        #[cfg(feature = "csr")]
        {
            let opened = web_sys::window()
                .map(|window| window.open_with_url_and_target(&path, "_blank"));
            if !matches!(opened, Some(Ok(_))) {
                tracing::warn!("Could not open {path} in a new window");
            }
        }
        #[cfg(not(feature = "csr"))]
        tracing::warn!("Opening {path} in a new window needs a browser");
    }

    fn navigate_after(&self, route: &Route, delay: Duration) {
        #[cfg(feature = "csr")]
        {
            let navigate = self.navigate.clone();
            let path = route.path();
            leptos::prelude::set_timeout(move || navigate(&path, Default::default()), delay);
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = delay;
            self.navigate(route);
        }
    }
}
