use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

use crate::api::client::BlogApi;
use crate::form::actions::fetch_for_mode;
use crate::form::state::{FormField, FormMode, FormState};
use crate::models::blog::BlogStatus;
use crate::navigation::{Navigator, RouterNavigator, REDIRECT_DELAY};

/// Create/edit page. Edit mode is selected by the `id` query parameter.
#[component]
pub fn BlogFormPage() -> impl IntoView {
    let api = expect_context::<Arc<dyn BlogApi>>();
    let nav = StoredValue::new_local(RouterNavigator::from_router());

    let query = use_query_map();
    let mode = Memo::new(move |_| FormMode::from_query(query.with(|q| q.get("id")).as_deref()));
    let state = RwSignal::new(FormState::new(mode.get_untracked()));

    // Reset and refetch whenever the `id` query switches the mode.
    let mount_api = api.clone();
    Effect::new(move |_| {
        let mode = mode.get();
        if state.with_untracked(|s| s.mode() != &mode) {
            state.set(FormState::new(mode.clone()));
        }
        let api = mount_api.clone();
        spawn_local(async move {
            let data = fetch_for_mode(api.as_ref(), &mode).await;
            state.try_update(|s| s.apply_mount(data));
        });
    });

    let fetching = Memo::new(move |_| state.with(|s| s.is_fetching()));
    let heading = move || {
        if state.with(|s| s.mode().is_edit()) {
            "Update Blog Post"
        } else {
            "Create New Blog Post"
        }
    };

    view! {
        <div class="container mx-auto max-w-4xl px-4 py-8">
            <Show
                when=move || !fetching.get()
                fallback=|| view! {
                    <div class="flex flex-col items-center py-16 gap-4">
                        <span class="loading loading-spinner loading-lg"></span>
                        <p>"Loading blog post..."</p>
                    </div>
                }
            >
                <h1 class="text-3xl font-bold mb-6">{heading}</h1>

                {move || state.with(|s| s.success_message().map(|m| {
                    let m = m.to_string();
                    view! { <div class="alert alert-success mb-4"><span>{m}</span></div> }
                }))}
                {move || state.with(|s| s.submit_error().map(|e| {
                    let e = e.to_string();
                    view! { <div class="alert alert-error mb-4"><span>{e}</span></div> }
                }))}

                <FormBody state=state api=api.clone() nav=nav />
            </Show>
        </div>
    }
}

#[component]
fn FormBody(
    state: RwSignal<FormState>,
    api: Arc<dyn BlogApi>,
    nav: StoredValue<RouterNavigator, LocalStorage>,
) -> impl IntoView {
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(submission) = state.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            let result = submission.clone().send(api.as_ref()).await;
            let next = state
                .try_update(|s| s.finish_submit(&submission, result))
                .flatten();
            if let Some(route) = next {
                nav.try_with_value(|n| n.navigate_after(&route, REDIRECT_DELAY));
            }
        });
    };

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
            <div class="card-body space-y-4">
                <TextInput state=state field=FormField::Title label="Blog Title" placeholder="Enter an engaging blog title" />
                <TextInput state=state field=FormField::Slug label="URL Slug" placeholder="auto-generated-from-title" />
                <TextArea state=state field=FormField::Description label="Description" rows=3 placeholder="Write a compelling description..." />
                <TextArea state=state field=FormField::Content label="Content" rows=12 placeholder="Write your full blog content here..." />

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="form-control">
                        <label class="label" for="status">
                            <span class="label-text font-semibold">"Status"</span>
                        </label>
                        <select
                            id="status"
                            name="status"
                            class="select select-bordered w-full"
                            on:change=move |ev| state.update(|s| s.update(FormField::Status, event_target_value(&ev)))
                        >
                            {BlogStatus::SELECTABLE.iter().map(|status| {
                                let value = status.as_str().to_string();
                                let label = value.clone();
                                let selected = is_selected(state, FormField::Status, value.clone());
                                view! { <option value=value selected=selected>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label" for="author_id">
                            <span class="label-text font-semibold">"Author"</span>
                        </label>
                        <select
                            id="author_id"
                            name="author_id"
                            class="select select-bordered w-full"
                            on:change=move |ev| state.update(|s| s.update(FormField::AuthorId, event_target_value(&ev)))
                        >
                            <option value="" selected=is_selected(state, FormField::AuthorId, String::new())>
                                "Select an author"
                            </option>
                            {move || state.with(|s| s.authors().iter().map(|author| {
                                let id = author.id.clone();
                                let name = author.name.clone();
                                let selected = is_selected(state, FormField::AuthorId, id.clone());
                                view! { <option value=id selected=selected>{name}</option> }
                            }).collect_view())}
                        </select>
                        <FieldError state=state field=FormField::AuthorId />
                        {move || state.with(|s| s.authors_error().map(|e| {
                            let e = e.to_string();
                            view! { <p class="text-warning text-sm mt-1">{e}</p> }
                        }))}
                    </div>
                </div>

                <TextInput state=state field=FormField::Tags label="Tags" placeholder="e.g. rust, web, tutorial (comma separated)" />

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <TextInput state=state field=FormField::PublishedDate label="Published Date" input_type="date" />
                    <TextInput state=state field=FormField::ReviewedAt label="Reviewed At" input_type="date" />
                    <TextInput state=state field=FormField::ReadTime label="Read Time" placeholder="e.g. 5 min read" />
                </div>

                <div class="form-control">
                    <label class="label cursor-pointer justify-start gap-3">
                        <input
                            type="checkbox"
                            name="isTopRated"
                            class="checkbox checkbox-primary"
                            prop:checked=move || state.with(|s| s.values().is_top_rated)
                            on:change=move |ev| state.update(|s| s.update(FormField::IsTopRated, event_target_checked(&ev)))
                        />
                        <span class="label-text font-semibold">"Mark as top rated"</span>
                    </label>
                </div>

                <div class="form-control">
                    <label class="label" for="file">
                        <span class="label-text font-semibold">"Banner Image"</span>
                    </label>
                    <input
                        type="file"
                        id="file"
                        accept="image/*"
                        class="file-input file-input-bordered w-full"
                        on:change=move |ev| pick_file(ev, state)
                    />
                    {move || state.with(|s| s.file().map(|f| {
                        let name = f.file_name.clone();
                        view! { <p class="text-sm text-base-content/70 mt-1">"Selected: " {name}</p> }
                    }))}
                </div>

                <div class="card-actions justify-end pt-4">
                    <button
                        type="submit"
                        class="btn btn-primary"
                        prop:disabled=move || state.with(|s| s.is_submitting())
                    >
                        {move || state.with(submit_label)}
                    </button>
                </div>
            </div>
        </form>
    }
}

/// Reactive `selected` flag for one `<option>` of a select bound to `field`.
fn is_selected(
    state: RwSignal<FormState>,
    field: FormField,
    value: String,
) -> impl Fn() -> bool + Send + Sync + Clone + 'static {
    move || state.with(|s| s.values().text(field) == value)
}

fn submit_label(state: &FormState) -> &'static str {
    match (state.mode().is_edit(), state.is_submitting()) {
        (true, true) => "Updating...",
        (true, false) => "Update Blog",
        (false, true) => "Publishing...",
        (false, false) => "Publish Blog",
    }
}

#[component]
fn TextInput(
    state: RwSignal<FormState>,
    field: FormField,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=field.key()>
                <span class="label-text font-semibold">{label}</span>
            </label>
            <input
                type=input_type
                id=field.key()
                name=field.key()
                class="input input-bordered w-full"
                placeholder=placeholder
                prop:value=move || state.with(|s| s.values().text(field))
                on:input=move |ev| state.update(|s| s.update(field, event_target_value(&ev)))
            />
            <FieldError state=state field=field />
        </div>
    }
}

#[component]
fn TextArea(
    state: RwSignal<FormState>,
    field: FormField,
    label: &'static str,
    rows: u32,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=field.key()>
                <span class="label-text font-semibold">{label}</span>
            </label>
            <textarea
                id=field.key()
                name=field.key()
                rows=rows.to_string()
                class="textarea textarea-bordered w-full"
                placeholder=placeholder
                prop:value=move || state.with(|s| s.values().text(field))
                on:input=move |ev| state.update(|s| s.update(field, event_target_value(&ev)))
            ></textarea>
            <FieldError state=state field=field />
        </div>
    }
}

#[component]
fn FieldError(state: RwSignal<FormState>, field: FormField) -> impl IntoView {
    move || {
        state.with(|s| {
            s.field_error(field).map(|e| {
                let e = e.to_string();
                view! { <p class="text-error text-sm mt-1">{e}</p> }
            })
        })
    }
}

#[cfg(feature = "csr")]
fn pick_file(ev: leptos::ev::Event, state: RwSignal<FormState>) {
    use wasm_bindgen::JsCast;

    let Some(input) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return;
    };
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };
    spawn_local(async move {
        match crate::browser::read_file(&file).await {
            Ok(attachment) => {
                state.try_update(|s| s.select_file(Some(attachment)));
            }
            Err(e) => tracing::warn!("Could not read selected file: {e}"),
        }
    });
}

#[cfg(not(feature = "csr"))]
fn pick_file(_ev: leptos::ev::Event, _state: RwSignal<FormState>) {
    tracing::warn!("File selection needs a browser");
}
