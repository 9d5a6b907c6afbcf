use crate::api::{self, ApiError};
use crate::components::icons::{AlertTriangle, Award, CalendarDays, Send, Trophy};
use crate::use_api;
use kudos_shared::date::month_name;
use kudos_shared::{RankingEntry, RankingsResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Podium marker for the first three places.
fn medal(rank: usize) -> Option<&'static str> {
    match rank {
        0 => Some("🥇"),
        1 => Some("🥈"),
        2 => Some("🥉"),
        _ => None,
    }
}

/// Year choices for the filter: the current year and the two before it.
fn year_options(current_year: i32) -> Vec<i32> {
    (current_year - 2..=current_year).rev().collect()
}

#[component]
pub fn RankingPage() -> impl IntoView {
    let api = use_api();

    let now = js_sys::Date::new_0();
    let current_year = now.get_full_year() as i32;
    // get_month() is zero-based
    let (month, set_month) = signal(now.get_month() + 1);
    let (year, set_year) = signal(current_year);

    let (rankings, set_rankings) = signal(RankingsResponse::default());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 过滤条件变化即重新拉取
    Effect::new({
        let api = api.clone();
        move |_| {
            let month = month.get();
            let year = year.get();
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api::recognitions::fetch_rankings(&api, month, year).await {
                    Ok(data) => {
                        set_rankings.set(data);
                        set_error_msg.set(None);
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => {
                        // Stale lists would contradict the error banner
                        set_rankings.set(RankingsResponse::default());
                        set_error_msg.set(Some(e.to_string()));
                    }
                }
                set_is_loading.set(false);
            });
        }
    });

    let period_label = move || {
        month_name(month.get())
            .map(|name| format!("{} {}", name, year.get()))
            .unwrap_or_default()
    };

    view! {
        <div class="w-full max-w-5xl mx-auto space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="flex items-center gap-3">
                    <Trophy attr:class="h-8 w-8 text-warning" />
                    <div>
                        <h2 class="text-3xl font-bold">"Monthly ranking"</h2>
                        <p class="text-base-content/70">{period_label}</p>
                    </div>
                </div>

                <div class="flex items-center gap-2">
                    <CalendarDays attr:class="h-4 w-4 text-base-content/60" />
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                                set_month.set(m);
                            }
                        }
                        prop:value=move || month.get().to_string()
                    >
                        {(1u32..=12)
                            .map(|m| {
                                view! {
                                    <option value=m.to_string() selected=move || month.get() == m>
                                        {month_name(m).unwrap_or_default()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            if let Ok(y) = event_target_value(&ev).parse::<i32>() {
                                set_year.set(y);
                            }
                        }
                        prop:value=move || year.get().to_string()
                    >
                        {year_options(current_year)
                            .into_iter()
                            .map(|y| {
                                view! {
                                    <option value=y.to_string() selected=move || year.get() == y>
                                        {y}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <AlertTriangle attr:class="h-5 w-5" />
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || is_loading.get()>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || {
                !is_loading.get() && error_msg.get().is_none() && rankings.with(RankingsResponse::is_empty)
            }>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center py-16">
                        <Trophy attr:class="h-12 w-12 text-base-content/30" />
                        <p class="text-lg text-base-content/70">
                            "No recognitions were sent in this period yet. Be the first!"
                        </p>
                    </div>
                </div>
            </Show>

            <Show when=move || {
                !is_loading.get() && error_msg.get().is_none() && !rankings.with(RankingsResponse::is_empty)
            }>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <RankingColumn
                        title="Top senders"
                        accent="text-primary"
                        entries=Signal::derive(move || rankings.get().top_senders)
                    >
                        <Send attr:class="h-6 w-6" />
                    </RankingColumn>
                    <RankingColumn
                        title="Top receivers"
                        accent="text-secondary"
                        entries=Signal::derive(move || rankings.get().top_receivers)
                    >
                        <Award attr:class="h-6 w-6" />
                    </RankingColumn>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn RankingColumn(
    title: &'static str,
    accent: &'static str,
    entries: Signal<Vec<RankingEntry>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class=format!("card-title {}", accent)>
                    {children()}
                    {title}
                </h3>
                <Show
                    when=move || !entries.with(Vec::is_empty)
                    fallback=|| {
                        view! {
                            <p class="text-sm text-base-content/60 italic py-4">
                                "No entries for this period."
                            </p>
                        }
                    }
                >
                    <ul class="space-y-2">
                        {move || {
                            entries
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(rank, entry)| view! { <RankingRow rank=rank entry=entry /> })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn RankingRow(rank: usize, entry: RankingEntry) -> impl IntoView {
    let initials = entry.initials();
    let display_name = entry.name.clone().unwrap_or_else(|| entry.email.clone());
    let row_class = if rank < 3 {
        "flex items-center gap-3 p-3 rounded-lg bg-warning/10"
    } else {
        "flex items-center gap-3 p-3 rounded-lg bg-base-200/60"
    };

    view! {
        <li class=row_class>
            <span class="w-8 text-center text-lg font-bold">
                {match medal(rank) {
                    Some(m) => m.to_string(),
                    None => format!("{}.", rank + 1),
                }}
            </span>
            <div class="avatar placeholder">
                <div class="bg-neutral text-neutral-content w-10 rounded-full">
                    <span class="text-sm">{initials}</span>
                </div>
            </div>
            <div class="flex-1 min-w-0">
                <p class="font-semibold truncate">{display_name}</p>
                <p class="text-xs text-base-content/60 truncate">{entry.email.clone()}</p>
            </div>
            <span class="badge badge-neutral badge-lg">{entry.count}</span>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_podium_gets_medals() {
        assert_eq!(medal(0), Some("🥇"));
        assert_eq!(medal(1), Some("🥈"));
        assert_eq!(medal(2), Some("🥉"));
        assert_eq!(medal(3), None);
        assert_eq!(medal(10), None);
    }

    #[test]
    fn year_filter_covers_three_years_newest_first() {
        assert_eq!(year_options(2026), vec![2026, 2025, 2024]);
    }
}
