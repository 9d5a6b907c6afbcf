//! Password input with a visibility toggle.

use crate::components::icons::{Eye, EyeOff};
use leptos::prelude::*;

#[component]
pub fn PasswordField(
    #[prop(into)] id: String,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    #[prop(into, optional)] placeholder: String,
) -> impl IntoView {
    let (visible, set_visible) = signal(false);

    view! {
        <div class="relative">
            <input
                id=id
                type=move || if visible.get() { "text" } else { "password" }
                placeholder=placeholder
                on:input=move |ev| set_value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full pr-10"
                required
            />
            <button
                type="button"
                tabindex="-1"
                class="absolute right-2 top-1/2 -translate-y-1/2 text-base-content/50 hover:text-base-content"
                on:click=move |_| set_visible.update(|v| *v = !*v)
            >
                <Show
                    when=move || visible.get()
                    fallback=|| view! { <Eye attr:class="h-5 w-5" /> }
                >
                    <EyeOff attr:class="h-5 w-5" />
                </Show>
            </button>
        </div>
    }
}
