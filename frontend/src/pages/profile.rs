use crate::components::icons::{Check, Pencil, Shield, UserRound, XMark};
use crate::session::{update_profile, use_session};
use crate::use_api;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let user = session.user_signal();

    let (is_editing, set_is_editing) = signal(false);
    let (draft_name, set_draft_name) = signal(String::new());
    let (is_saving, set_is_saving) = signal(false);
    // (message, is_error)
    let (feedback, set_feedback) = signal(Option::<(String, bool)>::None);

    let start_editing = move |_| {
        set_draft_name.set(user.get_untracked().map(|u| u.name).unwrap_or_default());
        set_feedback.set(None);
        set_is_editing.set(true);
    };

    let cancel_editing = move |_| {
        set_is_editing.set(false);
        set_feedback.set(None);
    };

    let on_save = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let name = draft_name.get_untracked().trim().to_string();
            if name.is_empty() {
                set_feedback.set(Some(("Name cannot be empty.".to_string(), true)));
                return;
            }

            set_is_saving.set(true);
            let api = api.clone();
            spawn_local(async move {
                match update_profile(&session, &api, &name).await {
                    Ok(message) => {
                        set_feedback.set(Some((message, false)));
                        set_is_editing.set(false);
                    }
                    Err(message) => set_feedback.set(Some((message, true))),
                }
                set_is_saving.set(false);
            });
        }
    };

    view! {
        <div class="w-full max-w-2xl mx-auto">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center gap-3 border-b border-base-200 pb-4 mb-2">
                        <UserRound attr:class="h-8 w-8 text-primary" />
                        <h2 class="text-3xl font-bold">"My profile"</h2>
                    </div>

                    <Show when=move || feedback.get().is_some()>
                        <div
                            role="alert"
                            class=move || {
                                let (_, is_err) = feedback.get().unwrap_or_default();
                                if is_err {
                                    "alert alert-error text-sm py-2"
                                } else {
                                    "alert alert-success text-sm py-2"
                                }
                            }
                        >
                            <span>{move || feedback.get().map(|(m, _)| m).unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <form class="space-y-4" on:submit=on_save>
                        <div class="form-control">
                            <label class="label" for="profile-name">
                                <span class="label-text">"Full name"</span>
                            </label>
                            <Show
                                when=move || is_editing.get()
                                fallback=move || {
                                    view! {
                                        <div class="input input-bordered bg-base-200 flex items-center">
                                            {move || user.get().map(|u| u.name).unwrap_or_default()}
                                        </div>
                                    }
                                }
                            >
                                <input
                                    id="profile-name"
                                    type="text"
                                    on:input=move |ev| set_draft_name.set(event_target_value(&ev))
                                    prop:value=draft_name
                                    class="input input-bordered"
                                />
                            </Show>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Email"</span>
                            </label>
                            // Email is the account identity and cannot be changed here
                            <div class="input input-bordered bg-base-200 flex items-center text-base-content/70">
                                {move || user.get().map(|u| u.email).unwrap_or_default()}
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Role"</span>
                            </label>
                            <div>
                                {move || {
                                    if user.get().is_some_and(|u| u.is_admin) {
                                        view! {
                                            <span class="badge badge-primary gap-1">
                                                <Shield attr:class="h-3 w-3" />
                                                "Administrator"
                                            </span>
                                        }
                                            .into_any()
                                    } else {
                                        view! { <span class="badge badge-ghost">"Member"</span> }
                                            .into_any()
                                    }
                                }}
                            </div>
                        </div>

                        <div class="flex justify-end gap-2 pt-2">
                            <Show
                                when=move || is_editing.get()
                                fallback=move || {
                                    view! {
                                        <button
                                            type="button"
                                            class="btn btn-primary gap-2"
                                            on:click=start_editing
                                        >
                                            <Pencil attr:class="h-4 w-4" />
                                            "Edit name"
                                        </button>
                                    }
                                }
                            >
                                <button
                                    type="button"
                                    class="btn btn-ghost gap-2"
                                    on:click=cancel_editing
                                >
                                    <XMark attr:class="h-4 w-4" />
                                    "Cancel"
                                </button>
                                <button
                                    type="submit"
                                    class="btn btn-success gap-2"
                                    disabled=move || is_saving.get()
                                >
                                    {move || if is_saving.get() {
                                        view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                    } else {
                                        view! { <Check attr:class="h-4 w-4" /> "Save" }.into_any()
                                    }}
                                </button>
                            </Show>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
