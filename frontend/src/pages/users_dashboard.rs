use crate::components::confirm_modal::ConfirmationModal;
use crate::components::icons::{
    AlertTriangle, Check, Plus, Search, Shield, Trash2, UserCog, Users,
};
use crate::hooks::admin_users::{AdminUsers, filter_users};
use crate::session::use_session;
use crate::use_api;
use kudos_shared::{CreateUserRequest, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

/// Which confirmation is currently on screen. Only one action can be
/// pending at a time; the modal serializes them.
#[derive(Clone, Copy, PartialEq)]
enum PendingAction {
    Delete { user_id: i64 },
    ToggleAdmin { user_id: i64, new_status: bool },
}

impl PendingAction {
    fn title(&self) -> &'static str {
        match self {
            PendingAction::Delete { .. } => "Delete user",
            PendingAction::ToggleAdmin { .. } => "Change admin status",
        }
    }

    fn message(&self, users: &[User]) -> String {
        let user_id = match self {
            PendingAction::Delete { user_id } | PendingAction::ToggleAdmin { user_id, .. } => {
                *user_id
            }
        };
        let name = users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "this user".to_string());

        match self {
            PendingAction::Delete { .. } => format!(
                "Delete {}? This removes the account permanently and cannot be undone.",
                name
            ),
            PendingAction::ToggleAdmin {
                new_status: true, ..
            } => format!("Grant administrator privileges to {}?", name),
            PendingAction::ToggleAdmin {
                new_status: false, ..
            } => format!("Revoke administrator privileges from {}?", name),
        }
    }

    fn confirm_text(&self) -> &'static str {
        match self {
            PendingAction::Delete { .. } => "Delete",
            PendingAction::ToggleAdmin { .. } => "Confirm",
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, PendingAction::Delete { .. })
    }
}

#[component]
pub fn UsersDashboardPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();
    let current_user_id = Signal::derive(move || session.user_signal().get().map(|u| u.id));

    let store = AdminUsers::new();
    let (search, set_search) = signal(String::new());
    let (pending, set_pending) = signal(Option::<PendingAction>::None);
    // Row whose action is currently on the wire; its controls stay disabled
    let (in_flight, set_in_flight) = signal(Option::<i64>::None);
    // (message, is_error)
    let (action_msg, set_action_msg) = signal(Option::<(String, bool)>::None);
    let show_create = RwSignal::new(false);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                store.fetch(&api).await;
            });
        }
    });

    // Action feedback clears itself after a few seconds
    let announce = move |message: String, is_error: bool| {
        set_action_msg.set(Some((message, is_error)));
        set_timeout(move || set_action_msg.set(None), Duration::from_secs(5));
    };

    let on_confirm = {
        let api = api.clone();
        move |_: ()| {
            let Some(action) = pending.get_untracked() else {
                return;
            };
            set_pending.set(None);
            let api = api.clone();
            spawn_local(async move {
                let outcome = match action {
                    PendingAction::Delete { user_id } => {
                        set_in_flight.set(Some(user_id));
                        store.delete(&api, user_id).await
                    }
                    PendingAction::ToggleAdmin {
                        user_id,
                        new_status,
                    } => {
                        set_in_flight.set(Some(user_id));
                        store.toggle_admin(&api, user_id, new_status).await
                    }
                };
                set_in_flight.set(None);
                match outcome {
                    Ok(message) => announce(message, false),
                    Err(message) => announce(message, true),
                }
            });
        }
    };

    let visible_users =
        Signal::derive(move || store.users.with(|list| filter_users(list, &search.get())));

    view! {
        <div class="w-full max-w-5xl mx-auto space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div class="flex items-center gap-3">
                    <Users attr:class="h-8 w-8 text-primary" />
                    <h2 class="text-3xl font-bold">"User management"</h2>
                </div>
                <button
                    class="btn btn-primary btn-sm gap-2"
                    on:click=move |_| show_create.update(|v| *v = !*v)
                >
                    <Plus attr:class="h-4 w-4" />
                    {move || if show_create.get() { "Close form" } else { "New user" }}
                </button>
            </div>

            <Show when=move || action_msg.get().is_some()>
                <div
                    role="alert"
                    class=move || {
                        let (_, is_err) = action_msg.get().unwrap_or_default();
                        if is_err { "alert alert-error text-sm" } else { "alert alert-success text-sm" }
                    }
                >
                    <span>{move || action_msg.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || show_create.get()>
                <CreateUserForm
                    store=store
                    on_done=Callback::new(move |message: String| {
                        show_create.set(false);
                        announce(message, false);
                    })
                />
            </Show>

            <label class="input input-bordered flex items-center gap-2 max-w-sm">
                <Search attr:class="h-4 w-4 text-base-content/50" />
                <input
                    type="text"
                    class="grow"
                    placeholder="Search by name or email"
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    prop:value=search
                />
            </label>

            <Show when=move || store.error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <AlertTriangle attr:class="h-5 w-5" />
                    <span>{move || store.error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || store.is_loading.get()>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !store.is_loading.get() && store.error.get().is_none()>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || visible_users.get()
                                    key=|user| user.id
                                    children=move |user| {
                                        view! {
                                            <UserRow
                                                user=user
                                                current_user_id=current_user_id
                                                in_flight=in_flight
                                                on_request=Callback::new(move |action| {
                                                    set_pending.set(Some(action))
                                                })
                                            />
                                        }
                                    }
                                />
                            </tbody>
                        </table>

                        <Show when=move || visible_users.with(Vec::is_empty)>
                            <p class="text-center text-sm text-base-content/60 italic py-8">
                                "No users match your search."
                            </p>
                        </Show>
                    </div>
                </div>
            </Show>

            <ConfirmationModal
                open=Signal::derive(move || pending.get().is_some())
                title=Signal::derive(move || {
                    pending.get().map(|a| a.title().to_string()).unwrap_or_default()
                })
                message=Signal::derive(move || {
                    pending
                        .get()
                        .map(|a| store.users.with(|list| a.message(list)))
                        .unwrap_or_default()
                })
                confirm_text=Signal::derive(move || {
                    pending.get().map(|a| a.confirm_text().to_string()).unwrap_or_default()
                })
                cancel_text="Cancel".to_string()
                destructive=Signal::derive(move || {
                    pending.get().is_some_and(|a| a.is_destructive())
                })
                on_confirm=on_confirm
                on_cancel=move |_: ()| set_pending.set(None)
            />
        </div>
    }
}

#[component]
fn UserRow(
    user: User,
    current_user_id: Signal<Option<i64>>,
    in_flight: ReadSignal<Option<i64>>,
    on_request: Callback<PendingAction>,
) -> impl IntoView {
    let user_id = user.id;
    let is_admin = user.is_admin;
    // Admins cannot delete or demote their own account, and a row with an
    // action on the wire takes no further input
    let locked = move || {
        current_user_id.get() == Some(user_id) || in_flight.get() == Some(user_id)
    };

    view! {
        <tr>
            <td class="font-semibold">{user.name.clone()}</td>
            <td class="text-base-content/70">{user.email.clone()}</td>
            <td>
                {if is_admin {
                    view! {
                        <span class="badge badge-primary gap-1">
                            <Shield attr:class="h-3 w-3" />
                            "Admin"
                        </span>
                    }
                        .into_any()
                } else {
                    view! { <span class="badge badge-ghost">"Member"</span> }.into_any()
                }}
            </td>
            <td class="text-right">
                <div class="flex justify-end gap-1">
                    <button
                        class="btn btn-ghost btn-xs gap-1"
                        title=if is_admin { "Revoke admin" } else { "Make admin" }
                        disabled=locked
                        on:click=move |_| {
                            on_request
                                .run(PendingAction::ToggleAdmin {
                                    user_id,
                                    new_status: !is_admin,
                                })
                        }
                    >
                        <UserCog attr:class="h-4 w-4" />
                    </button>
                    <button
                        class="btn btn-ghost btn-xs text-error gap-1"
                        title="Delete user"
                        disabled=locked
                        on:click=move |_| on_request.run(PendingAction::Delete { user_id })
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </div>
            </td>
        </tr>
    }
}

#[component]
fn CreateUserForm(store: AdminUsers, on_done: Callback<String>) -> impl IntoView {
    let api = use_api();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_admin, set_is_admin) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_form_error.set(None);
        set_is_submitting.set(true);

        let payload = CreateUserRequest {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            is_admin: is_admin.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            match store.create(&api, payload).await {
                Ok(message) => {
                    set_name.set(String::new());
                    set_email.set(String::new());
                    set_password.set(String::new());
                    set_is_admin.set(false);
                    on_done.run(message);
                }
                Err(message) => set_form_error.set(Some(message)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl border border-primary/20">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title text-lg">"Create a new user"</h3>

                <Show when=move || form_error.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || form_error.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <input
                        type="text"
                        placeholder="Full name"
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        prop:value=name
                        class="input input-bordered"
                        required
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        class="input input-bordered"
                        required
                    />
                    <input
                        type="password"
                        placeholder="Initial password"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                        required
                    />
                </div>

                <label class="label cursor-pointer justify-start gap-2">
                    <input
                        type="checkbox"
                        class="checkbox checkbox-primary checkbox-sm"
                        prop:checked=is_admin
                        on:change=move |ev| {
                            set_is_admin.set(event_target_checked(&ev));
                        }
                    />
                    <span class="label-text">"Grant administrator privileges"</span>
                </label>

                <div class="card-actions justify-end">
                    <button class="btn btn-primary gap-2" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                        } else {
                            view! { <Check attr:class="h-4 w-4" /> "Create user" }.into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_prompts_are_named_and_destructive() {
        let users = vec![User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@corp.com".to_string(),
            is_admin: false,
        }];
        let action = PendingAction::Delete { user_id: 7 };
        assert!(action.message(&users).contains("Ana"));
        assert!(action.is_destructive());
        assert_eq!(action.confirm_text(), "Delete");
    }

    #[test]
    fn toggle_prompt_wording_follows_direction() {
        let users = vec![User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@corp.com".to_string(),
            is_admin: false,
        }];
        let grant = PendingAction::ToggleAdmin {
            user_id: 7,
            new_status: true,
        };
        let revoke = PendingAction::ToggleAdmin {
            user_id: 7,
            new_status: false,
        };
        assert!(grant.message(&users).starts_with("Grant"));
        assert!(revoke.message(&users).starts_with("Revoke"));
        assert!(!grant.is_destructive());
    }

    #[test]
    fn unknown_user_falls_back_to_a_generic_prompt() {
        let action = PendingAction::Delete { user_id: 99 };
        assert!(action.message(&[]).contains("this user"));
    }
}
