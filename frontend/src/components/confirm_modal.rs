//! Confirmation dialog used by every destructive or privilege-changing
//! admin action. The action only reaches the network after an explicit
//! confirm click.

use leptos::prelude::*;

#[component]
pub fn ConfirmationModal(
    /// Whether the modal is visible
    #[prop(into)]
    open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] confirm_text: Signal<String>,
    #[prop(into)] cancel_text: Signal<String>,
    /// Styles the confirm button as destructive (red)
    #[prop(into, optional)]
    destructive: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_class = move || {
        if destructive.get() {
            "btn btn-error"
        } else {
            "btn btn-primary"
        }
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <h3 class="font-bold text-lg">{move || title.get()}</h3>
                    <p class="py-4">{move || message.get()}</p>
                    <div class="modal-action">
                        <button class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                            {move || cancel_text.get()}
                        </button>
                        <button class=confirm_class on:click=move |_| on_confirm.run(())>
                            {move || confirm_text.get()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
