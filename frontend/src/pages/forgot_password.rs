use crate::components::icons::{Mail, Sparkles};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use std::time::Duration;

/// Password-recovery request form. The reset endpoint does not exist yet,
/// so this acknowledges without making a network call.
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (message, set_message) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);
        set_is_submitting.set(true);

        set_timeout(
            move || {
                set_is_submitting.set(false);
                set_message.set(Some(
                    "If your email is registered, you will receive a reset link.".to_string(),
                ));
                set_email.set(String::new());
            },
            Duration::from_secs(2),
        );
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-warning/10 rounded-2xl text-warning">
                            <Sparkles attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Forgot my password"</h1>
                        <p class="text-base-content/70">
                            "Enter your email to receive a recovery link"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || message.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || message.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Registered email"</span>
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

                        <div class="form-control mt-4">
                            <button class="btn btn-warning gap-2" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                                } else {
                                    view! { <Mail attr:class="h-4 w-4" /> "Send link" }.into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm text-base-content/70 mt-2">
                            <a
                                class="link link-primary font-semibold"
                                on:click=move |_| router.navigate_to(AppRoute::Login)
                            >
                                "Back to sign in"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
