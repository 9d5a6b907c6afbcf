use crate::api::{self, ApiError};
use crate::components::icons::{AlertTriangle, Award, LayoutDashboard, Send, TrendingUp, Users};
use crate::components::monthly_chart::MonthlyBarChart;
use crate::use_api;
use kudos_shared::{DashboardData, MonthKey, MonthlyCount, MonthlyRankingEntry, RankingKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Chart input: one `(label, count)` pair per month, oldest first so the
/// bars read left to right. Months with unparseable keys keep the raw key.
fn chart_series(monthly: &[MonthlyCount]) -> Vec<(String, u32)> {
    let mut rows: Vec<(Option<MonthKey>, String, u32)> = monthly
        .iter()
        .map(|m| {
            let key = MonthKey::parse(&m.month);
            let label = key.map(|k| k.short_label()).unwrap_or_else(|| m.month.clone());
            (key, label, m.count)
        })
        .collect();
    rows.sort_by_key(|(key, _, _)| *key);
    rows.into_iter().map(|(_, label, count)| (label, count)).collect()
}

/// One month's historical podium, split by direction.
struct MonthGroup {
    label: String,
    senders: Vec<MonthlyRankingEntry>,
    receivers: Vec<MonthlyRankingEntry>,
}

/// Regroup the flattened ranking rows by month, newest month first.
/// Row order within a month is preserved (the server already ranks them).
fn group_rankings(rows: &[MonthlyRankingEntry]) -> Vec<MonthGroup> {
    let mut months: Vec<(Option<MonthKey>, String)> = Vec::new();
    for row in rows {
        if !months.iter().any(|(_, m)| *m == row.month) {
            months.push((MonthKey::parse(&row.month), row.month.clone()));
        }
    }
    months.sort_by_key(|(key, _)| std::cmp::Reverse(*key));

    months
        .into_iter()
        .map(|(key, month)| {
            let label = key.map(|k| k.label()).unwrap_or_else(|| month.clone());
            let (senders, receivers) = rows
                .iter()
                .filter(|row| row.month == month)
                .cloned()
                .partition(|row| row.kind == RankingKind::Sender);
            MonthGroup {
                label,
                senders,
                receivers,
            }
        })
        .collect()
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_api();

    let (dashboard, set_dashboard) = signal(DashboardData::default());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new({
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api::recognitions::fetch_dashboard(&api).await {
                    Ok(data) => {
                        set_dashboard.set(data);
                        set_error_msg.set(None);
                    }
                    Err(ApiError::Unauthorized) => {}
                    Err(e) => set_error_msg.set(Some(e.to_string())),
                }
                set_is_loading.set(false);
            });
        }
    });

    let series = Signal::derive(move || dashboard.with(|d| chart_series(&d.monthly_data)));

    view! {
        <div class="w-full max-w-6xl mx-auto space-y-6">
            <div class="flex items-center gap-3">
                <LayoutDashboard attr:class="h-8 w-8 text-primary" />
                <h2 class="text-3xl font-bold">"Admin dashboard"</h2>
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

            <Show when=move || !is_loading.get() && error_msg.get().is_none()>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <div class="stat bg-base-100 rounded-xl shadow">
                        <div class="stat-figure text-primary">
                            <Users attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Registered users"</div>
                        <div class="stat-value text-primary">
                            {move || dashboard.with(|d| d.users_count)}
                        </div>
                    </div>
                    <div class="stat bg-base-100 rounded-xl shadow">
                        <div class="stat-figure text-secondary">
                            <Send attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Recognitions sent"</div>
                        <div class="stat-value text-secondary">
                            {move || dashboard.with(|d| d.recognitions_count)}
                        </div>
                    </div>
                    <div class="stat bg-base-100 rounded-xl shadow">
                        <div class="stat-figure text-accent">
                            <TrendingUp attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Average per month"</div>
                        <div class="stat-value text-accent">
                            {move || dashboard.with(DashboardData::monthly_average)}
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Recognitions per month"</h3>
                        <Show
                            when=move || series.with(|s| !s.is_empty())
                            fallback=|| {
                                view! {
                                    <p class="text-sm text-base-content/60 italic py-6">
                                        "No monthly activity recorded yet."
                                    </p>
                                }
                            }
                        >
                            <MonthlyBarChart data=series />
                        </Show>
                    </div>
                </div>

                <div class="space-y-4">
                    <h3 class="text-xl font-bold">"Ranking history"</h3>
                    {move || {
                        let groups = dashboard.with(|d| group_rankings(&d.monthly_rankings));
                        if groups.is_empty() {
                            view! {
                                <p class="text-sm text-base-content/60 italic">
                                    "No past rankings to show."
                                </p>
                            }
                                .into_any()
                        } else {
                            groups
                                .into_iter()
                                .map(|group| {
                                    view! {
                                        <div class="card bg-base-100 shadow">
                                            <div class="card-body">
                                                <h4 class="font-bold text-lg">{group.label}</h4>
                                                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                                    <HistoryList
                                                        title="Senders"
                                                        entries=group.senders
                                                    >
                                                        <Send attr:class="h-4 w-4 text-primary" />
                                                    </HistoryList>
                                                    <HistoryList
                                                        title="Receivers"
                                                        entries=group.receivers
                                                    >
                                                        <Award attr:class="h-4 w-4 text-secondary" />
                                                    </HistoryList>
                                                </div>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn HistoryList(
    title: &'static str,
    entries: Vec<MonthlyRankingEntry>,
    children: Children,
) -> impl IntoView {
    view! {
        <div>
            <div class="flex items-center gap-2 text-sm font-semibold mb-2">
                {children()}
                {title}
            </div>
            {if entries.is_empty() {
                view! { <p class="text-xs text-base-content/50 italic">"None"</p> }.into_any()
            } else {
                view! {
                    <ol class="space-y-1">
                        {entries
                            .into_iter()
                            .enumerate()
                            .map(|(rank, entry)| {
                                let label =
                                    entry.name.clone().unwrap_or_else(|| entry.email.clone());
                                view! {
                                    <li class="flex items-center justify-between text-sm p-2 rounded bg-base-200/60">
                                        <span class="truncate">
                                            {format!("{}. {}", rank + 1, label)}
                                        </span>
                                        <span class="badge badge-sm badge-neutral">
                                            {entry.count}
                                        </span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ol>
                }
                .into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(month: &str, count: u32) -> MonthlyCount {
        MonthlyCount {
            month: month.to_string(),
            count,
        }
    }

    fn row(month: &str, kind: RankingKind, email: &str, n: u32) -> MonthlyRankingEntry {
        MonthlyRankingEntry {
            month: month.to_string(),
            kind,
            name: None,
            email: email.to_string(),
            count: n,
        }
    }

    #[test]
    fn chart_series_sorts_oldest_first_with_short_labels() {
        let series = chart_series(&[
            count("2026-01", 4),
            count("2025-11", 9),
            count("2025-12", 2),
        ]);
        assert_eq!(
            series,
            vec![
                ("Nov 2025".to_string(), 9),
                ("Dec 2025".to_string(), 2),
                ("Jan 2026".to_string(), 4),
            ]
        );
    }

    #[test]
    fn chart_series_keeps_unparseable_keys_verbatim() {
        let series = chart_series(&[count("garbage", 1)]);
        assert_eq!(series, vec![("garbage".to_string(), 1)]);
    }

    #[test]
    fn rankings_group_by_month_newest_first() {
        let rows = vec![
            row("2025-11", RankingKind::Sender, "a@x.com", 5),
            row("2025-12", RankingKind::Receiver, "b@x.com", 3),
            row("2025-11", RankingKind::Receiver, "c@x.com", 2),
            row("2025-12", RankingKind::Sender, "d@x.com", 7),
        ];
        let groups = group_rankings(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "December 2025");
        assert_eq!(groups[0].senders.len(), 1);
        assert_eq!(groups[0].senders[0].email, "d@x.com");
        assert_eq!(groups[0].receivers[0].email, "b@x.com");
        assert_eq!(groups[1].label, "November 2025");
        assert_eq!(groups[1].senders[0].email, "a@x.com");
    }

    #[test]
    fn row_order_within_a_month_is_preserved() {
        let rows = vec![
            row("2025-12", RankingKind::Sender, "first@x.com", 9),
            row("2025-12", RankingKind::Sender, "second@x.com", 4),
        ];
        let groups = group_rankings(&rows);
        let emails: Vec<&str> = groups[0].senders.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, ["first@x.com", "second@x.com"]);
    }
}
