use crate::components::icons::{Sparkles, UserPlus};
use crate::components::password_field::PasswordField;
use crate::session::signup;
use crate::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn SignupPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    // (message, is_error)
    let (feedback, set_feedback) = signal(Option::<(String, bool)>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_feedback.set(None);

        // Client-side check: no network call on mismatch
        if password.get() != confirm.get() {
            set_feedback.set(Some(("Passwords do not match.".to_string(), true)));
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_local(async move {
            match signup(
                &api,
                &name.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
            )
            .await
            {
                Ok(message) => {
                    set_feedback.set(Some((message, false)));
                    // Signup never auto-logs-in; hand the user to the login page
                    set_timeout(
                        move || router.navigate_to(AppRoute::Login),
                        Duration::from_secs(2),
                    );
                }
                Err(message) => set_feedback.set(Some((message, true))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Sparkles attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create an account"</h1>
                        <p class="text-base-content/70">
                            "Join the team and start recognizing"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
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

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Full name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <PasswordField id="password" value=password set_value=set_password />
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm-password">
                                <span class="label-text">"Confirm password"</span>
                            </label>
                            <PasswordField id="confirm-password" value=confirm set_value=set_confirm />
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary gap-2" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    view! { <UserPlus attr:class="h-4 w-4" /> "Sign up" }.into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Already have an account? "
                            <a
                                class="link link-primary font-semibold"
                                on:click=move |_| router.navigate_to(AppRoute::Login)
                            >
                                "Sign in here"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
