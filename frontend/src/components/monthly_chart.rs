//! Monthly recognitions bar chart, rendered as plain flex bars.

use leptos::prelude::*;

/// Bar height as a percentage of the tallest bar. Non-zero counts get a
/// visible floor of 4% so a single recognition still shows up.
fn bar_height_pct(count: u32, max: u32) -> u32 {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * 100) / max).max(4)
}

#[component]
pub fn MonthlyBarChart(
    /// (label, count) pairs in chronological order
    #[prop(into)]
    data: Signal<Vec<(String, u32)>>,
) -> impl IntoView {
    let max = move || data.with(|d| d.iter().map(|(_, c)| *c).max().unwrap_or(0));

    view! {
        <div class="flex items-end gap-3 h-64 w-full pt-4">
            <For
                each=move || data.get()
                key=|(label, _)| label.clone()
                children=move |(label, count)| {
                    let height = move || format!("height: {}%", bar_height_pct(count, max()));
                    view! {
                        <div class="flex flex-col items-center justify-end flex-1 h-full gap-1">
                            <span class="text-xs font-semibold">{count}</span>
                            <div
                                class="w-full bg-primary rounded-t"
                                style=height
                                title=format!("{}: {}", label, count)
                            ></div>
                            <span class="text-xs text-base-content/60">{label.clone()}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::bar_height_pct;

    #[test]
    fn scales_relative_to_the_tallest_bar() {
        assert_eq!(bar_height_pct(10, 10), 100);
        assert_eq!(bar_height_pct(5, 10), 50);
    }

    #[test]
    fn small_counts_keep_a_visible_floor() {
        assert_eq!(bar_height_pct(1, 100), 4);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(bar_height_pct(0, 10), 0);
        assert_eq!(bar_height_pct(0, 0), 0);
    }
}
