use crate::api::{self, ApiError};
use crate::components::icons::{AlertTriangle, ImageIcon, Mail, Send, Smile, XMark};
use crate::session::use_session;
use crate::use_api;
use kudos_shared::{CreateRecognitionRequest, ImageAsset};
use leptos::prelude::*;
use leptos::task::spawn_local;

const AVAILABLE_EMOJIS: [&str; 8] = ["😀", "🥳", "🔥", "👏", "🌟", "🚀", "💡", "💖"];
const DEFAULT_SUBJECT: &str = "You received an amazing recognition!";
const RECOGNITION_TYPES: [&str; 3] = ["recognition", "coin", "voucher"];

/// Minimal recipient check, the equivalent of `^[^\s@]+@[^\s@]+\.[^\s@]+$`:
/// one `@`, a dot in the domain, no whitespace.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Comma-separated CC field → trimmed, non-empty list.
fn parse_cc_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Insert `insert` into `text` at a UTF-16 caret position (what the DOM
/// reports). Returns the new text and the caret position after the insert.
fn insert_at_utf16(text: &str, pos: u32, insert: &str) -> (String, u32) {
    let units: Vec<u16> = text.encode_utf16().collect();
    let pos = (pos as usize).min(units.len());
    let inserted: Vec<u16> = insert.encode_utf16().collect();
    let caret = (pos + inserted.len()) as u32;

    let mut spliced = Vec::with_capacity(units.len() + inserted.len());
    spliced.extend_from_slice(&units[..pos]);
    spliced.extend_from_slice(&inserted);
    spliced.extend_from_slice(&units[pos..]);

    (String::from_utf16_lossy(&spliced), caret)
}

/// User-facing text for AI generation failures, keyed on the HTTP status.
/// A 401 never reaches here; the interceptor already forced a logout.
fn ai_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(503) => {
            "The AI system is overloaded right now (503). Wait a few seconds and try generating again!"
                .to_string()
        }
        Some(400) => err.to_string(),
        Some(403) => "Authentication or permission error with the AI API.".to_string(),
        _ => "Failed to generate a message. Check the AI endpoint configuration.".to_string(),
    }
}

/// 表单状态：数据持有、重置与请求对象转换。
#[derive(Clone, Copy)]
struct RecognitionForm {
    recipient_email: RwSignal<String>,
    cc_emails: RwSignal<String>,
    subject: RwSignal<String>,
    message: RwSignal<String>,
    selected_image_id: RwSignal<Option<i64>>,
}

impl RecognitionForm {
    fn new() -> Self {
        Self {
            recipient_email: RwSignal::new(String::new()),
            cc_emails: RwSignal::new(String::new()),
            subject: RwSignal::new(DEFAULT_SUBJECT.to_string()),
            message: RwSignal::new(String::new()),
            selected_image_id: RwSignal::new(None),
        }
    }

    fn reset(&self) {
        self.recipient_email.set(String::new());
        self.cc_emails.set(String::new());
        self.subject.set(DEFAULT_SUBJECT.to_string());
        self.message.set(String::new());
        self.selected_image_id.set(None);
    }

    fn to_request(&self, sender_id: i64) -> CreateRecognitionRequest {
        CreateRecognitionRequest {
            sender_id,
            recipient_email: self.recipient_email.get(),
            cc_emails: parse_cc_list(&self.cc_emails.get()),
            subject: self.subject.get(),
            message: self.message.get(),
            image_id: self.selected_image_id.get(),
        }
    }
}

#[component]
pub fn SendRecognitionPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let user = session.user_signal();

    let form = RecognitionForm::new();
    let message_ref = NodeRef::<leptos::html::Textarea>::new();

    // (message, is_error)
    let (status, set_status) = signal(Option::<(String, bool)>::None);
    let (is_sending, set_is_sending) = signal(false);

    let (images, set_images) = signal(Vec::<ImageAsset>::new());
    let (images_loading, set_images_loading) = signal(true);
    let (images_error, set_images_error) = signal(Option::<String>::None);

    let ai_open = RwSignal::new(false);

    // 挂载时加载可选图片
    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api::images::list_images(&api).await {
                    Ok(list) => {
                        set_images.set(list);
                        set_images_error.set(None);
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => {
                        set_images_error.set(Some(e.to_string()));
                        set_images.set(Vec::new());
                    }
                }
                set_images_loading.set(false);
            });
        }
    });

    // 在光标处插入 emoji 并恢复焦点
    let insert_emoji = move |emoji: &'static str| {
        let current = form.message.get_untracked();
        let caret = message_ref
            .get()
            .and_then(|area| area.selection_start().ok().flatten())
            .unwrap_or(current.encode_utf16().count() as u32);

        let (updated, new_caret) = insert_at_utf16(&current, caret, emoji);
        form.message.set(updated);

        if let Some(area) = message_ref.get() {
            let _ = area.focus();
            let _ = area.set_selection_range(new_caret, new_caret);
        }
    };

    let toggle_image = move |image_id: i64| {
        form.selected_image_id.update(|selected| {
            *selected = if *selected == Some(image_id) {
                None
            } else {
                Some(image_id)
            };
        });
    };

    let on_cancel = move |_| {
        form.reset();
        set_status.set(Some(("Sending cancelled. Form cleared.".to_string(), false)));
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_status.set(None);

            // Validation failures never reach the network
            if !is_valid_email(&form.recipient_email.get_untracked()) {
                set_status.set(Some((
                    "Please enter a valid recipient email.".to_string(),
                    true,
                )));
                return;
            }
            let Some(sender_id) = user.get_untracked().map(|u| u.id) else {
                return;
            };

            set_is_sending.set(true);
            let api = api.clone();
            spawn_local(async move {
                let payload = form.to_request(sender_id);
                let recipient = payload.recipient_email.clone();
                match api::recognitions::create_recognition(&api, &payload).await {
                    Ok(()) => {
                        set_status.set(Some((
                            format!("Recognition sent to {}!", recipient),
                            false,
                        )));
                        form.reset();
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => set_status.set(Some((e.to_string(), true))),
                }
                set_is_sending.set(false);
            });
        }
    };

    view! {
        <div class="w-full max-w-4xl mx-auto">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center gap-3 border-b border-base-200 pb-4 mb-2">
                        <Mail attr:class="h-8 w-8 text-primary" />
                        <h2 class="text-3xl font-bold">"Send recognition"</h2>
                    </div>

                    <Show when=move || status.get().is_some()>
                        <div
                            role="alert"
                            class=move || {
                                let (_, is_err) = status.get().unwrap_or_default();
                                if is_err {
                                    "alert alert-error text-sm"
                                } else {
                                    "alert alert-success text-sm"
                                }
                            }
                        >
                            <span>{move || status.get().map(|(m, _)| m).unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <form class="space-y-6" on:submit=on_submit>
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <div class="form-control">
                                <label class="label" for="recipient">
                                    <span class="label-text">"To (recipient email)"</span>
                                </label>
                                <input
                                    id="recipient"
                                    type="email"
                                    placeholder="name@company.com"
                                    on:input=move |ev| form.recipient_email.set(event_target_value(&ev))
                                    prop:value=form.recipient_email
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label">
                                    <span class="label-text">"From"</span>
                                </label>
                                <div class="input input-bordered bg-base-200 flex items-center truncate text-sm">
                                    {move || {
                                        user.get()
                                            .map(|u| format!("{} ({})", u.name, u.email))
                                            .unwrap_or_default()
                                    }}
                                </div>
                            </div>
                            <div class="form-control">
                                <label class="label" for="cc">
                                    <span class="label-text">"CC (comma-separated emails)"</span>
                                </label>
                                <input
                                    id="cc"
                                    type="text"
                                    placeholder="one@company.com, two@company.com"
                                    on:input=move |ev| form.cc_emails.set(event_target_value(&ev))
                                    prop:value=form.cc_emails
                                    class="input input-bordered"
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="subject">
                                <span class="label-text">"Email subject"</span>
                            </label>
                            <input
                                id="subject"
                                type="text"
                                on:input=move |ev| form.subject.set(event_target_value(&ev))
                                prop:value=form.subject
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="p-4 border border-dashed border-base-300 rounded-lg bg-base-200/50 space-y-4">
                            <p class="text-sm font-semibold">"Personalize your recognition:"</p>

                            <div>
                                <div class="flex items-center gap-2 text-sm mb-2">
                                    <Smile attr:class="h-4 w-4" />
                                    "Click to insert an emoji into the message:"
                                </div>
                                <div class="flex flex-wrap gap-1">
                                    {AVAILABLE_EMOJIS
                                        .into_iter()
                                        .map(|emoji| {
                                            view! {
                                                <button
                                                    type="button"
                                                    class="text-2xl p-2 rounded-full hover:bg-base-300"
                                                    on:click=move |_| insert_emoji(emoji)
                                                >
                                                    {emoji}
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            </div>

                            <div>
                                <div class="flex items-center gap-2 text-sm mb-2">
                                    <ImageIcon attr:class="h-4 w-4" />
                                    "Pick an image (optional):"
                                </div>

                                <Show when=move || images_loading.get()>
                                    <div class="flex items-center gap-2 text-primary text-sm">
                                        <span class="loading loading-spinner loading-sm"></span>
                                        "Loading images..."
                                    </div>
                                </Show>
                                <Show when=move || images_error.get().is_some()>
                                    <div class="flex items-center gap-2 text-error text-sm">
                                        <AlertTriangle attr:class="h-4 w-4" />
                                        {move || images_error.get().unwrap_or_default()}
                                    </div>
                                </Show>

                                <div class="flex flex-wrap gap-3">
                                    <For
                                        each=move || images.get()
                                        key=|image| image.id
                                        children=move |image| {
                                            let image_id = image.id;
                                            let selected =
                                                move || form.selected_image_id.get() == Some(image_id);
                                            view! {
                                                <div
                                                    class=move || {
                                                        if selected() {
                                                            "w-24 h-24 rounded-lg overflow-hidden cursor-pointer ring-4 ring-success shadow-lg"
                                                        } else {
                                                            "w-24 h-24 rounded-lg overflow-hidden cursor-pointer opacity-70 hover:opacity-100 border border-base-300"
                                                        }
                                                    }
                                                    on:click=move |_| toggle_image(image_id)
                                                >
                                                    <img
                                                        src=image.url.clone()
                                                        alt=image.caption().to_string()
                                                        class="w-full h-full object-cover"
                                                    />
                                                </div>
                                            }
                                        }
                                    />
                                </div>

                                <Show when=move || {
                                    !images_loading.get()
                                        && images_error.get().is_none()
                                        && images.with(Vec::is_empty)
                                }>
                                    <p class="text-sm text-base-content/60 italic">
                                        "No recognition images available. Ask an administrator to upload some."
                                    </p>
                                </Show>
                            </div>
                        </div>

                        <div>
                            <button
                                type="button"
                                class="btn btn-secondary btn-sm gap-2"
                                on:click=move |_| ai_open.set(true)
                            >
                                <Send attr:class="h-4 w-4" />
                                "Use the AI assistant for the message"
                            </button>
                        </div>

                        <div class="form-control">
                            <label class="label" for="message">
                                <span class="label-text">
                                    "Recognition message (say what the person did that was amazing!)"
                                </span>
                            </label>
                            <textarea
                                id="message"
                                node_ref=message_ref
                                rows="8"
                                placeholder="Your recognition message..."
                                on:input=move |ev| form.message.set(event_target_value(&ev))
                                prop:value=form.message
                                class="textarea textarea-bordered resize-none"
                                required
                            ></textarea>
                        </div>

                        <div class="flex justify-end gap-4 pt-2">
                            <button type="button" class="btn btn-ghost gap-2" on:click=on_cancel>
                                <XMark attr:class="h-4 w-4" />
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                class="btn btn-success gap-2"
                                disabled=move || is_sending.get()
                            >
                                {move || if is_sending.get() {
                                    view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                                } else {
                                    view! { <Send attr:class="h-4 w-4" /> "Send recognition" }.into_any()
                                }}
                            </button>
                        </div>
                    </form>

                    <AiAssistantModal open=ai_open form=form />
                </div>
            </div>
        </div>
    }
}

/// AI 文案助手弹窗：选择类型、填写关键词、生成并插入主消息。
/// 错误只显示在弹窗内部，不污染主表单的状态条。
#[component]
fn AiAssistantModal(open: RwSignal<bool>, form: RecognitionForm) -> impl IntoView {
    let api = use_api();

    let (recognition_type, set_recognition_type) = signal(RECOGNITION_TYPES[0].to_string());
    let (qualities, set_qualities) = signal(String::new());
    let (generated, set_generated) = signal(String::new());
    let (is_generating, set_is_generating) = signal(false);
    let (ai_error, set_ai_error) = signal(Option::<String>::None);

    let on_close = move |_| {
        open.set(false);
        set_ai_error.set(None);
    };

    let on_generate = {
        let api = api.clone();
        move |_| {
            set_generated.set(String::new());
            set_ai_error.set(None);

            if qualities.get_untracked().trim().is_empty() {
                set_ai_error.set(Some(
                    "Please enter qualities or praises for the AI to write about.".to_string(),
                ));
                return;
            }

            set_is_generating.set(true);
            let api = api.clone();
            spawn_local(async move {
                match api::ai::generate_message(
                    &api,
                    &recognition_type.get_untracked(),
                    &qualities.get_untracked(),
                )
                .await
                {
                    Ok(text) => set_generated.set(text),
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => set_ai_error.set(Some(ai_error_message(&e))),
                }
                set_is_generating.set(false);
            });
        }
    };

    let on_insert = move |_| {
        let text = generated.get_untracked();
        form.message.update(|message| {
            if message.is_empty() {
                *message = text.clone();
            } else {
                *message = format!("{}\n\n{}", message, text);
            }
        });
        open.set(false);
        set_generated.set(String::new());
        set_qualities.set(String::new());
        set_recognition_type.set(RECOGNITION_TYPES[0].to_string());
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal modal-open">
                <div class="modal-box max-w-2xl">
                    <div class="flex items-center justify-between border-b border-base-200 pb-3 mb-4">
                        <h3 class="text-xl font-bold flex items-center gap-2">
                            <Smile attr:class="h-6 w-6 text-secondary" />
                            "Recognition message assistant (AI)"
                        </h3>
                        <button class="btn btn-ghost btn-sm btn-circle" on:click=on_close>
                            <XMark attr:class="h-5 w-5" />
                        </button>
                    </div>

                    <div class="space-y-5">
                        <Show when=move || ai_error.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm">
                                <AlertTriangle attr:class="h-4 w-4 shrink-0" />
                                <span>{move || ai_error.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div>
                            <label class="label">
                                <span class="label-text">"1. Which kind of reward is being sent?"</span>
                            </label>
                            <div class="flex gap-2">
                                {RECOGNITION_TYPES
                                    .into_iter()
                                    .map(|kind| {
                                        view! {
                                            <button
                                                type="button"
                                                class=move || {
                                                    if recognition_type.get() == kind {
                                                        "btn btn-sm btn-secondary capitalize"
                                                    } else {
                                                        "btn btn-sm btn-outline capitalize"
                                                    }
                                                }
                                                on:click=move |_| set_recognition_type.set(kind.to_string())
                                            >
                                                {kind}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="qualities">
                                <span class="label-text">
                                    "2. Which qualities or praises do you want to mention? (comma-separated)"
                                </span>
                            </label>
                            <textarea
                                id="qualities"
                                rows="3"
                                placeholder="e.g. 'Leadership', 'Proactivity', 'Customer care', 'Project delivery'"
                                on:input=move |ev| set_qualities.set(event_target_value(&ev))
                                prop:value=qualities
                                class="textarea textarea-bordered resize-none"
                            ></textarea>
                        </div>

                        <button
                            type="button"
                            class="btn btn-success w-full gap-2"
                            disabled=move || {
                                is_generating.get() || qualities.get().trim().is_empty()
                            }
                            on:click=on_generate.clone()
                        >
                            {move || if is_generating.get() {
                                view! { <span class="loading loading-spinner"></span> "Generating text..." }.into_any()
                            } else {
                                view! { <Send attr:class="h-4 w-4" /> "Generate message with AI" }.into_any()
                            }}
                        </button>

                        <Show when=move || !generated.get().is_empty()>
                            <div class="p-4 bg-base-200 border border-secondary/30 rounded-lg space-y-3">
                                <h4 class="font-semibold">"Suggested message:"</h4>
                                <div class="whitespace-pre-wrap p-3 bg-base-100 border border-base-300 rounded max-h-60 overflow-y-auto">
                                    {move || generated.get()}
                                </div>
                                <button
                                    type="button"
                                    class="btn btn-primary w-full gap-2"
                                    on:click=on_insert
                                >
                                    <Mail attr:class="h-4 w-4" />
                                    "Insert into the message field"
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_matches_the_simple_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn cc_list_trims_and_drops_empties() {
        assert_eq!(
            parse_cc_list(" a@x.com , ,b@y.com,"),
            vec!["a@x.com".to_string(), "b@y.com".to_string()]
        );
        assert!(parse_cc_list("").is_empty());
        assert!(parse_cc_list(" , ,").is_empty());
    }

    #[test]
    fn caret_insert_counts_utf16_units() {
        // "🥳" is two UTF-16 units; caret after it is 2.
        let (text, caret) = insert_at_utf16("ab", 1, "🥳");
        assert_eq!(text, "a🥳b");
        assert_eq!(caret, 3);

        // Inserting after an existing surrogate pair.
        let (text, caret) = insert_at_utf16("🥳x", 2, "!");
        assert_eq!(text, "🥳!x");
        assert_eq!(caret, 3);
    }

    #[test]
    fn caret_insert_clamps_out_of_range_positions() {
        let (text, caret) = insert_at_utf16("ab", 99, "c");
        assert_eq!(text, "abc");
        assert_eq!(caret, 3);
    }

    #[test]
    fn ai_errors_map_by_status() {
        let overloaded = ApiError::Status {
            status: 503,
            message: "busy".into(),
        };
        assert!(ai_error_message(&overloaded).contains("overloaded"));

        let validation = ApiError::Status {
            status: 400,
            message: "qualities required".into(),
        };
        assert_eq!(ai_error_message(&validation), "qualities required");

        let forbidden = ApiError::Status {
            status: 403,
            message: "forbidden".into(),
        };
        assert!(ai_error_message(&forbidden).contains("permission"));
        assert!(
            ai_error_message(&ApiError::Network("down".into())).contains("Failed to generate")
        );
    }
}
