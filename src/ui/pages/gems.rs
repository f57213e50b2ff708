use dioxus::prelude::*;

use crate::{
    app::{run_bulk_load, Engine, SharedProgress},
    domain::{format_price, AppState, DisplayMode},
    ui::components::{
        detail_panel::DetailPanel,
        gem_table::{GemRow, GemTable},
        toast::{push_toast, ToastKind, ToastMessage},
    },
    ui::theme,
};

#[component]
pub fn GemsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let engine = use_context::<Signal<Option<Engine>>>();
    let progress_handle = use_context::<SharedProgress>();

    let snapshot = state();
    let mode = snapshot.display_mode;
    let rate = snapshot.divine_rate;
    let fmt = move |amount: f64| format_price(amount, mode, rate);

    let rows: Vec<GemRow> = snapshot
        .profits
        .iter()
        .map(|profit| {
            let ev = snapshot.ev_estimates.get(&profit.gem_name);
            GemRow {
                gem_name: profit.gem_name.clone(),
                short_name: profit
                    .gem_name
                    .strip_prefix("Awakened ")
                    .unwrap_or(&profit.gem_name)
                    .to_string(),
                l1_cost: fmt(profit.input_cost),
                level_cost: fmt(profit.leveling_cost),
                quality_cost: fmt(profit.quality_cost),
                total_cost: fmt(profit.total_cost),
                l5_price: fmt(profit.sale_value),
                profit_label: fmt(profit.profit),
                profit: profit.profit,
                profit_pct: profit.profit_pct,
                corrupt_ev: ev.map(|ev| fmt(ev.expected_profit)).unwrap_or_default(),
                corrupt_pct: ev
                    .map(|ev| format!("{:.1}%", ev.expected_profit_pct))
                    .unwrap_or_default(),
                source_low: profit.source_low,
                source_high: profit.source_high,
            }
        })
        .collect();

    let loading = !snapshot.progress.complete && !snapshot.progress.status.is_empty();

    let on_refresh = {
        let state = state.clone();
        let toasts = toasts.clone();
        let engine = engine.clone();
        let progress_handle = progress_handle.clone();
        move |_| {
            let Some(engine) = engine() else {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Still detecting the active league; try again in a moment.",
                );
                return;
            };
            spawn(run_bulk_load(
                engine,
                state.clone(),
                toasts.clone(),
                progress_handle.clone(),
                true,
            ));
        }
    };

    let on_select = {
        let mut state = state.clone();
        let engine = engine.clone();
        move |name: String| {
            let already_selected =
                state.with(|s| s.selected_gem.as_deref() == Some(name.as_str()));
            if already_selected {
                state.with_mut(|s| s.select_gem(None));
                return;
            }
            state.with_mut(|s| {
                s.select_gem(Some(name.clone()));
                s.detail_loading = true;
            });

            let (profit, vaal_cost) =
                state.with(|s| (s.profit_for(&name).cloned(), s.currency.vaal));
            let (Some(engine), Some(profit)) = (engine(), profit) else {
                state.with_mut(|s| s.detail_loading = false);
                return;
            };
            let mut state = state.clone();
            spawn(async move {
                let ev = engine.price_corruption(&profit, vaal_cost).await;
                state.with_mut(|s| {
                    // A click on another row may have raced this fetch.
                    if s.selected_gem.as_deref() == Some(ev.gem_name.as_str()) {
                        s.detail_ev = Some(ev);
                        s.detail_loading = false;
                    }
                });
            });
        }
    };

    let detail = snapshot
        .selected_gem
        .as_ref()
        .and_then(|name| snapshot.profit_for(name).cloned());

    rsx! {
        div { class: "space-y-6",
            header {
                class: "flex flex-wrap items-start justify-between gap-4",
                div {
                    h1 { class: "text-2xl font-semibold text-slate-100", "Leveling Profits" }
                    p { class: "text-sm {theme::TEXT_MUTED}",
                        "Buy L1 Q0, level to L5, quality to 20, sell. Click a row for live corruption pricing."
                    }
                }
                div { class: "flex items-center gap-2",
                    DisplayToggle { state: state.clone(), mode }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        disabled: loading,
                        onclick: on_refresh,
                        if loading { "Refreshing…" } else { "Refresh" }
                    }
                }
            }

            CurrencyBar { state: state.clone() }

            if loading {
                ProgressBar { state: state.clone() }
            }

            GemTable {
                rows,
                selected_gem: snapshot.selected_gem.clone(),
                on_select,
            }

            if let Some(profit) = detail {
                DetailPanel {
                    profit,
                    ev: snapshot.detail_ev.clone(),
                    loading: snapshot.detail_loading,
                    mode,
                    divine_rate: rate,
                    on_close: {
                        let mut state = state.clone();
                        move |_| state.with_mut(|s| s.select_gem(None))
                    },
                }
            }
        }
    }
}

#[component]
fn DisplayToggle(state: Signal<AppState>, mode: DisplayMode) -> Element {
    let mut state_chaos = state.clone();
    let mut state_divine = state.clone();
    let chaos_class = toggle_class(mode == DisplayMode::Chaos);
    let divine_class = toggle_class(mode == DisplayMode::Divine);
    rsx! {
        div { class: "flex gap-1",
            button {
                class: "{chaos_class}",
                onclick: move |_| state_chaos.with_mut(|s| s.display_mode = DisplayMode::Chaos),
                "Chaos"
            }
            button {
                class: "{divine_class}",
                onclick: move |_| state_divine.with_mut(|s| s.display_mode = DisplayMode::Divine),
                "Divine"
            }
        }
    }
}

fn toggle_class(active: bool) -> &'static str {
    if active {
        theme::BTN_TOGGLE_ACTIVE
    } else {
        theme::BTN_TOGGLE_INACTIVE
    }
}

#[component]
fn CurrencyBar(state: Signal<AppState>) -> Element {
    let (currency, rate) = state.with(|s| (s.currency, s.divine_rate));
    rsx! {
        div { class: "{theme::PANEL} flex flex-wrap gap-6 px-4 py-3 text-sm",
            CurrencyStat { label: "Divine", value: format!("{rate:.0}c") }
            CurrencyStat { label: "GCP", value: format!("{:.1}c", currency.gcp) }
            CurrencyStat { label: "Vaal Orb", value: format!("{:.1}c", currency.vaal) }
            CurrencyStat { label: "Brambleback", value: format!("{:.1}c", currency.brambleback) }
        }
    }
}

#[component]
fn CurrencyStat(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            span { class: "{theme::LABEL}", "{label}" }
            span { class: "{theme::TEXT_SECONDARY}", "{value}" }
        }
    }
}

#[component]
fn ProgressBar(state: Signal<AppState>) -> Element {
    let progress = state.with(|s| s.progress.clone());
    let pct = if progress.total > 0 {
        progress.current as f64 / progress.total as f64 * 100.0
    } else {
        0.0
    };
    rsx! {
        div { class: "{theme::PANEL} px-4 py-3",
            div { class: "flex justify-between text-xs {theme::TEXT_MUTED}",
                span { "{progress.status}" }
                span { "{progress.current}/{progress.total}" }
            }
            div { class: "mt-2 h-1.5 w-full rounded bg-slate-800",
                div {
                    class: "h-1.5 rounded bg-amber-500 transition-all",
                    style: "width: {pct}%",
                }
            }
        }
    }
}
