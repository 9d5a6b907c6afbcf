use crate::api::{self, ApiError};
use crate::components::confirm_modal::ConfirmationModal;
use crate::components::icons::{AlertTriangle, ImageIcon, Trash2, Upload};
use crate::use_api;
use kudos_shared::ImageAsset;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::FormData;

const MAX_IMAGE_BYTES: f64 = 2.0 * 1024.0 * 1024.0;

/// Client-side gate run before any upload request is made.
fn validate_upload(size_bytes: f64, mime_type: &str) -> Result<(), String> {
    if !mime_type.starts_with("image/") {
        return Err("Only image files can be uploaded.".to_string());
    }
    if size_bytes > MAX_IMAGE_BYTES {
        return Err("Image is too large. Maximum size: 2MB.".to_string());
    }
    Ok(())
}

#[component]
pub fn UploadImagesPage() -> impl IntoView {
    let api = use_api();

    let (images, set_images) = signal(Vec::<ImageAsset>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    let (alt_text, set_alt_text) = signal(String::new());
    let (is_uploading, set_is_uploading) = signal(false);
    // (message, is_error)
    let (status, set_status) = signal(Option::<(String, bool)>::None);
    let (pending_delete, set_pending_delete) = signal(Option::<i64>::None);

    let file_input = NodeRef::<leptos::html::Input>::new();

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api::admin::list_admin_images(&api).await {
                    Ok(list) => {
                        set_images.set(list);
                        set_load_error.set(None);
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => set_load_error.set(Some(e.to_string())),
                }
                set_is_loading.set(false);
            });
        }
    });

    let on_upload = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_status.set(None);

            let Some(input) = file_input.get() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                set_status.set(Some(("Choose an image file first.".to_string(), true)));
                return;
            };

            if let Err(message) = validate_upload(file.size(), &file.type_()) {
                set_status.set(Some((message, true)));
                return;
            }

            let Ok(form) = FormData::new() else {
                return;
            };
            if form.append_with_blob("image", &file).is_err() {
                set_status.set(Some(("Could not prepare the upload.".to_string(), true)));
                return;
            }
            let _ = form.append_with_str("alt", alt_text.get_untracked().trim());

            set_is_uploading.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api::admin::upload_image(&api, form).await {
                    Ok(uploaded) => {
                        // Newest uploads show first
                        set_images.update(|list| list.insert(0, uploaded));
                        set_alt_text.set(String::new());
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                        set_status.set(Some(("Image uploaded.".to_string(), false)));
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => set_status.set(Some((e.to_string(), true))),
                }
                set_is_uploading.set(false);
            });
        }
    };

    let on_confirm_delete = {
        let api = api.clone();
        move |_: ()| {
            let Some(image_id) = pending_delete.get_untracked() else {
                return;
            };
            set_pending_delete.set(None);
            let api = api.clone();
            spawn_local(async move {
                match api::admin::delete_image(&api, image_id).await {
                    Ok(()) => {
                        set_images.update(|list| list.retain(|img| img.id != image_id));
                        set_status.set(Some(("Image deleted.".to_string(), false)));
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => set_status.set(Some((e.to_string(), true))),
                }
            });
        }
    };

    view! {
        <div class="w-full max-w-5xl mx-auto space-y-6">
            <div class="flex items-center gap-3">
                <ImageIcon attr:class="h-8 w-8 text-primary" />
                <h2 class="text-3xl font-bold">"Recognition images"</h2>
            </div>

            <Show when=move || status.get().is_some()>
                <div
                    role="alert"
                    class=move || {
                        let (_, is_err) = status.get().unwrap_or_default();
                        if is_err { "alert alert-error text-sm" } else { "alert alert-success text-sm" }
                    }
                >
                    <span>{move || status.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_upload>
                    <h3 class="card-title text-lg">"Upload a new image"</h3>
                    <p class="text-sm text-base-content/60">
                        "Images are available to everyone when sending a recognition. Max 2MB."
                    </p>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <input
                            type="file"
                            accept="image/*"
                            node_ref=file_input
                            class="file-input file-input-bordered"
                            required
                        />
                        <input
                            type="text"
                            placeholder="Description (alt text, optional)"
                            on:input=move |ev| set_alt_text.set(event_target_value(&ev))
                            prop:value=alt_text
                            class="input input-bordered"
                        />
                    </div>

                    <div class="card-actions justify-end">
                        <button class="btn btn-primary gap-2" disabled=move || is_uploading.get()>
                            {move || if is_uploading.get() {
                                view! { <span class="loading loading-spinner"></span> "Uploading..." }.into_any()
                            } else {
                                view! { <Upload attr:class="h-4 w-4" /> "Upload image" }.into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>

            <Show when=move || load_error.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <AlertTriangle attr:class="h-5 w-5" />
                    <span>{move || load_error.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || is_loading.get()>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || !is_loading.get() && load_error.get().is_none()>
                <Show
                    when=move || !images.with(Vec::is_empty)
                    fallback=|| {
                        view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body items-center text-center py-12">
                                    <ImageIcon attr:class="h-12 w-12 text-base-content/30" />
                                    <p class="text-base-content/70">
                                        "The image library is empty. Upload the first image above."
                                    </p>
                                </div>
                            </div>
                        }
                    }
                >
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <For
                            each=move || images.get()
                            key=|image| image.id
                            children=move |image| {
                                let image_id = image.id;
                                view! {
                                    <div class="card bg-base-100 shadow group">
                                        <figure class="aspect-square overflow-hidden">
                                            <img
                                                src=image.url.clone()
                                                alt=image.caption().to_string()
                                                class="w-full h-full object-cover"
                                            />
                                        </figure>
                                        <div class="card-body p-3 flex-row items-center justify-between">
                                            <span class="text-xs truncate text-base-content/70">
                                                {image.caption().to_string()}
                                            </span>
                                            <button
                                                class="btn btn-ghost btn-xs text-error"
                                                title="Delete image"
                                                on:click=move |_| set_pending_delete.set(Some(image_id))
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <ConfirmationModal
                open=Signal::derive(move || pending_delete.get().is_some())
                title="Delete image".to_string()
                message="Delete this image? Recognitions that already used it keep their copy, but it can no longer be selected.".to_string()
                confirm_text="Delete".to_string()
                cancel_text="Cancel".to_string()
                destructive=true
                on_confirm=on_confirm_delete
                on_cancel=move |_: ()| set_pending_delete.set(None)
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_files_over_two_megabytes() {
        assert!(validate_upload(MAX_IMAGE_BYTES + 1.0, "image/png").is_err());
        assert!(validate_upload(MAX_IMAGE_BYTES, "image/png").is_ok());
    }

    #[test]
    fn rejects_non_image_mime_types() {
        let err = validate_upload(10.0, "application/pdf").unwrap_err();
        assert!(err.contains("image"));
        assert!(validate_upload(10.0, "image/jpeg").is_ok());
    }
}
