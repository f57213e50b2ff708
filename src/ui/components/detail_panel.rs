use dioxus::prelude::*;

use crate::domain::{
    format_price, CorruptionEv, CorruptionOutcome, DisplayMode, LevelingProfit,
};
use crate::ui::theme;

/// Sticky bottom card with the full cost breakdown and the live-priced
/// corruption EV for the selected gem.
#[component]
pub fn DetailPanel(
    profit: LevelingProfit,
    ev: Option<CorruptionEv>,
    loading: bool,
    mode: DisplayMode,
    divine_rate: f64,
    on_close: EventHandler<()>,
) -> Element {
    let fmt = move |amount: f64| format_price(amount, mode, divine_rate);

    rsx! {
        div {
            class: "fixed inset-x-0 bottom-0 z-50 border-t-2 border-slate-700 bg-slate-950/95 backdrop-blur px-6 py-4 max-h-[24rem] overflow-y-auto",
            div { class: "mx-auto max-w-6xl",
                div { class: "flex items-center justify-between mb-3",
                    h3 { class: "text-base font-semibold {theme::TEXT_PRIMARY}",
                        "{profit.gem_name}"
                        span { class: "ml-3 text-xs font-normal {theme::TEXT_MUTED}",
                            "L1 via {profit.source_low.label()} · L5 via {profit.source_high.label()}"
                        }
                    }
                    button {
                        class: "{theme::BTN_SECONDARY}",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                    // Left: deterministic leveling economics.
                    div { class: "{theme::PANEL} p-4",
                        h4 { class: "mb-2 text-sm font-semibold {theme::TEXT_SECONDARY}", "Base Profit" }
                        p { class: "text-sm {theme::TEXT_MUTED}",
                            "L1: {fmt(profit.input_cost)} + Level: {fmt(profit.leveling_cost)} + Quality: {fmt(profit.quality_cost)}"
                        }
                        p { class: "mt-1 text-sm font-semibold {theme::TEXT_SECONDARY}",
                            "= Total: {fmt(profit.total_cost)}"
                        }
                        hr { class: "my-2 border-slate-800" }
                        p { class: "text-sm {theme::TEXT_MUTED}", "L5 Price: {fmt(profit.sale_value)}" }
                        p {
                            class: "mt-1 text-sm font-semibold {theme::profit_text(profit.profit)}",
                            {format!("Profit: {} ({:.1}%)", fmt(profit.profit), profit.profit_pct)}
                        }
                    }
                    // Right: probability-weighted corruption outcomes.
                    div { class: "{theme::PANEL} p-4",
                        h4 { class: "mb-2 text-sm font-semibold {theme::TEXT_SECONDARY}", "Corruption EV" }
                        if loading {
                            p { class: "text-sm {theme::TEXT_MUTED}", "Fetching live corrupted listings…" }
                        } else if let Some(ev) = ev {
                            CorruptionBreakdown { ev, mode, divine_rate }
                        } else {
                            p { class: "text-sm {theme::TEXT_MUTED}", "Select a gem to price its corruption outcomes." }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CorruptionBreakdown(ev: CorruptionEv, mode: DisplayMode, divine_rate: f64) -> Element {
    let fmt = move |amount: f64| format_price(amount, mode, divine_rate);
    let outcome_lines = CorruptionOutcome::ALL
        .into_iter()
        .filter_map(|outcome| {
            let price = ev.outcomes.get(&outcome)?;
            let pct = (outcome.probability() * 100.0).round();
            let marker = if price.estimated { " (est.)" } else { "" };
            Some(format!(
                "• {} ({pct:.0}%): {}{marker}",
                outcome.label(),
                fmt(price.chaos)
            ))
        })
        .collect::<Vec<_>>();
    let delta_label = if ev.delta_vs_baseline >= 0.0 {
        format!("vs base: +{}", fmt(ev.delta_vs_baseline))
    } else {
        format!("vs base: -{}", fmt(-ev.delta_vs_baseline))
    };

    rsx! {
        p { class: "text-xs {theme::TEXT_MUTED}", "Vaal Orb: {fmt(ev.vaal_cost)}" }
        if ev.is_estimate {
            p { class: "mt-1 text-xs text-amber-400", "Some outcomes use multiplier estimates, not live asks." }
        }
        ul { class: "mt-2 space-y-0.5",
            for line in outcome_lines {
                li { class: "text-sm {theme::TEXT_SECONDARY}", "{line}" }
            }
        }
        hr { class: "my-2 border-slate-800" }
        p {
            class: "text-sm font-semibold {theme::profit_text(ev.expected_profit)}",
            {format!("EV: {} ({:.1}%)", fmt(ev.expected_profit), ev.expected_profit_pct)}
        }
        p { class: "text-xs {theme::profit_text(ev.delta_vs_baseline)}", "{delta_label}" }
    }
}
