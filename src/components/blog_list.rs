use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::client::BlogApi;
use crate::config::ApiConfig;
use crate::listing::{BlogCard, BlogListing, ListingAction};
use crate::navigation::RouterNavigator;

/// Listing page: every post as a card with edit/view actions.
#[component]
pub fn BlogListPage() -> impl IntoView {
    let api = expect_context::<Arc<dyn BlogApi>>();
    let config = expect_context::<ApiConfig>();
    let nav = StoredValue::new_local(RouterNavigator::from_router());
    let listing = RwSignal::new(BlogListing::new());

    spawn_local(async move {
        let result = api.list_blogs().await;
        listing.try_update(|l| l.apply_fetch(result));
    });

    let create = move |_| nav.with_value(|n| ListingAction::Create.dispatch(n));

    view! {
        <div class="container mx-auto px-4 py-8">
            <div class="flex items-center justify-between mb-8">
                <div>
                    <h1 class="text-3xl font-bold">"Blog Posts"</h1>
                    <p class="text-base-content/70">"Manage and edit your blog content"</p>
                </div>
                <button class="btn btn-primary" on:click=create>
                    "Create New Blog"
                </button>
            </div>

            {move || listing.with(|l| l.error().map(|e| {
                let e = e.to_string();
                view! {
                    <div class="alert alert-error mb-6">
                        <span>{e}</span>
                    </div>
                }
            }))}

            {move || {
                let state = listing.get();
                if state.is_loading() {
                    view! {
                        <div class="flex justify-center py-12">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }.into_any()
                } else if state.records().is_empty() {
                    view! {
                        <div class="text-center py-16">
                            <h3 class="text-lg font-semibold">"No blogs yet"</h3>
                            <p class="text-base-content/70 mb-4">"Get started by creating your first blog post."</p>
                            <button class="btn btn-primary" on:click=create>
                                "Create First Blog"
                            </button>
                        </div>
                    }.into_any()
                } else {
                    let cards = state.cards(&config);
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            {cards.into_iter().map(|card| {
                                view! { <BlogCardView card=card nav=nav /> }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Card for one post in the listing grid.
#[component]
fn BlogCardView(card: BlogCard, nav: StoredValue<RouterNavigator, LocalStorage>) -> impl IntoView {
    let BlogCard {
        title,
        description,
        status_label,
        badge_class,
        is_top_rated,
        image_src,
        visible_tags,
        more_tags,
        published,
        read_time,
        edit,
        view: open,
    } = card;

    let image = image_src.map(|src| {
        let alt = title.clone();
        view! {
            <figure class="h-48 overflow-hidden">
                <img src=src alt=alt class="w-full h-full object-cover" />
            </figure>
        }
    });

    let tags = (!visible_tags.is_empty()).then(|| {
        view! {
            <div class="flex flex-wrap gap-1">
                {visible_tags.into_iter().map(|tag| view! {
                    <span class="badge badge-outline badge-sm">{tag}</span>
                }).collect_view()}
                {more_tags.map(|more| view! {
                    <span class="badge badge-ghost badge-sm">{more}</span>
                })}
            </div>
        }
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            {image}
            <div class="card-body">
                <div class="flex items-center gap-2">
                    <span class=format!("badge {badge_class}")>{status_label}</span>
                    {is_top_rated.then(|| view! { <span class="badge badge-accent">"Top rated"</span> })}
                </div>
                <h2 class="card-title line-clamp-2">{title}</h2>
                <p class="text-sm text-base-content/70 line-clamp-3">{description}</p>
                {tags}
                <div class="flex gap-4 text-xs text-base-content/60">
                    <span>{published}</span>
                    {read_time.map(|t| view! { <span>{t}</span> })}
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm btn-primary"
                        on:click=move |_| nav.with_value(|n| edit.dispatch(n))>
                        "Edit"
                    </button>
                    <button class="btn btn-sm btn-ghost" title="View blog post"
                        on:click=move |_| nav.with_value(|n| open.dispatch(n))>
                        "View"
                    </button>
                </div>
            </div>
        </div>
    }
}
