use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::api::client::{BlogApi, HttpBlogApi};
use crate::components::blog_form::BlogFormPage;
use crate::components::blog_list::BlogListPage;
use crate::config::ApiConfig;

/// Root component. Provides the API client and its configuration to every page.
#[component]
pub fn App(config: ApiConfig) -> impl IntoView {
    provide_meta_context();

    let api: Arc<dyn BlogApi> = Arc::new(HttpBlogApi::new(config.clone()));
    provide_context(api);
    provide_context(config);

    view! {
        <Title text="Blog Admin"/>

        <Router>
            <main class="min-h-screen bg-base-200">
                <Routes fallback=|| view! { "Page not found." }.into_view()>
                    <Route path=path!("/") view=BlogListPage/>
                    <Route path=path!("/blog") view=BlogListPage/>
                    <Route path=path!("/create-blog") view=BlogFormPage/>
                </Routes>
            </main>
        </Router>
    }
}
