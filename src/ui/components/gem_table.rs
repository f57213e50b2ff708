use dioxus::prelude::*;

use crate::domain::PriceOrigin;
use crate::ui::theme;

/// One preformatted table row; the page renders amounts in the active
/// display mode before building rows.
#[derive(Clone, PartialEq)]
pub struct GemRow {
    pub gem_name: String,
    pub short_name: String,
    pub l1_cost: String,
    pub level_cost: String,
    pub quality_cost: String,
    pub total_cost: String,
    pub l5_price: String,
    pub profit_label: String,
    pub profit: f64,
    pub profit_pct: f64,
    pub corrupt_ev: String,
    pub corrupt_pct: String,
    pub source_low: PriceOrigin,
    pub source_high: PriceOrigin,
}

#[component]
pub fn GemTable(
    rows: Vec<GemRow>,
    selected_gem: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    let is_empty = rows.is_empty();
    let rendered_rows = rows
        .into_iter()
        .map(|row| {
            let selected = selected_gem.as_ref().is_some_and(|name| name == &row.gem_name);
            (row, selected)
        })
        .collect::<Vec<_>>();

    rsx! {
        div {
            class: "{theme::TABLE_CONTAINER}",
            table {
                class: "min-w-full {theme::TABLE_DIVIDER} text-sm",
                thead {
                    class: "{theme::TABLE_HEADER} text-left tracking-wide",
                    tr {
                        th { class: "px-3 py-3 font-medium", "Gem" }
                        th { class: "px-3 py-3 font-medium text-right", "L1 Cost" }
                        th { class: "px-3 py-3 font-medium text-right", "Level Cost" }
                        th { class: "px-3 py-3 font-medium text-right", "Quality Cost" }
                        th { class: "px-3 py-3 font-medium text-right", "Total Cost" }
                        th { class: "px-3 py-3 font-medium text-right", "L5 Price" }
                        th { class: "px-3 py-3 font-medium text-right", "Profit" }
                        th { class: "px-3 py-3 font-medium text-right", "Profit %" }
                        th { class: "px-3 py-3 font-medium text-right", "Corrupt EV" }
                        th { class: "px-3 py-3 font-medium text-right", "Corrupt %" }
                    }
                }
                tbody {
                    class: "{theme::TABLE_DIVIDER}",
                    for (row, selected) in rendered_rows {
                        GemRowView { row, selected, on_select: on_select.clone() }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "px-3 py-6 text-center text-sm {theme::TEXT_MUTED}",
                                colspan: "10",
                                "No priceable gems yet. Waiting for the first refresh."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GemRowView(row: GemRow, selected: bool, on_select: EventHandler<String>) -> Element {
    let tint = theme::row_tint(row.profit, row.profit_pct);
    let row_class = format!(
        "cursor-pointer transition-colors {}",
        if selected { "bg-amber-500/10" } else { tint }
    );
    let select_name = row.gem_name.clone();
    // A trade-sourced price is marked so users know it's a live ask.
    let live_marker = if row.source_high == PriceOrigin::Live { "●" } else { "" };

    rsx! {
        tr {
            class: row_class,
            onclick: move |_| on_select.call(select_name.clone()),
            td {
                class: "px-3 py-2.5 font-medium {theme::TEXT_SECONDARY}",
                title: "priced via {row.source_low.label()} / {row.source_high.label()}",
                span { class: "mr-1 text-rose-400 text-[10px]", "{live_marker}" }
                "{row.short_name}"
            }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_SECONDARY}", "{row.l1_cost}" }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_MUTED}", "{row.level_cost}" }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_MUTED}", "{row.quality_cost}" }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_SECONDARY}", "{row.total_cost}" }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_SECONDARY}", "{row.l5_price}" }
            td {
                class: "px-3 py-2.5 text-right font-semibold {theme::profit_text(row.profit)}",
                "{row.profit_label}"
            }
            td {
                class: "px-3 py-2.5 text-right {theme::profit_text(row.profit)}",
                {format!("{:.1}%", row.profit_pct)}
            }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_SECONDARY}", "{row.corrupt_ev}" }
            td { class: "px-3 py-2.5 text-right {theme::TEXT_MUTED}", "{row.corrupt_pct}" }
        }
    }
}
