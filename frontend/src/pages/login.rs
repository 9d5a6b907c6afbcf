use crate::components::icons::{LogIn, Sparkles};
use crate::components::password_field::PasswordField;
use crate::session::{login, use_session};
use crate::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match login(
                &session,
                &api,
                &email.get_untracked(),
                &password.get_untracked(),
            )
            .await
            {
                // Navigation is handled by the router's auth effect, which
                // also restores the originally requested destination.
                Ok(()) => {}
                Err(msg) => set_error_msg.set(Some(msg)),
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
                        <h1 class="text-3xl font-bold">"Kudos"</h1>
                        <p class="text-base-content/70">
                            "Sign in to send and receive recognitions"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="name@company.com"
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
                            <PasswordField
                                id="password"
                                value=password
                                set_value=set_password
                                placeholder="••••••••"
                            />
                        </div>

                        <div class="flex justify-end text-sm">
                            <a
                                class="link link-primary"
                                on:click=move |_| router.navigate_to(AppRoute::ForgotPassword)
                            >
                                "Forgot my password"
                            </a>
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary gap-2" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    view! { <LogIn attr:class="h-4 w-4" /> "Sign in" }.into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "New to the team? "
                            <a
                                class="link link-primary font-semibold"
                                on:click=move |_| router.navigate_to(AppRoute::Signup)
                            >
                                "Sign up here"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
