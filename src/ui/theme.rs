//! Shared Tailwind class strings so pages stay visually consistent.

// ============================================
// BUTTON STYLES
// ============================================

pub const BTN_PRIMARY: &str =
    "rounded-lg bg-amber-600 px-4 py-2 text-sm font-semibold text-white hover:bg-amber-500 disabled:opacity-50 disabled:cursor-not-allowed";

pub const BTN_SECONDARY: &str =
    "rounded-lg px-4 py-2 text-sm text-slate-400 border border-slate-700 hover:border-slate-600 hover:text-slate-200";

pub const BTN_TOGGLE_ACTIVE: &str =
    "rounded px-2 py-1 text-xs font-semibold bg-amber-500/20 text-amber-300 border border-amber-500/40";

pub const BTN_TOGGLE_INACTIVE: &str =
    "rounded px-2 py-1 text-xs text-slate-500 border border-slate-700 hover:border-amber-600 hover:text-amber-300";

// ============================================
// PANEL / CONTAINER STYLES
// ============================================

pub const PANEL: &str = "rounded-xl border border-slate-800 bg-slate-900/40";

pub const TABLE_CONTAINER: &str =
    "rounded-xl border border-slate-800 bg-slate-900/40 overflow-hidden";

pub const TABLE_HEADER: &str =
    "border-b border-slate-800 bg-slate-900/60 text-xs uppercase text-slate-500";

pub const TABLE_DIVIDER: &str = "divide-y divide-slate-800";

// ============================================
// TEXT STYLES
// ============================================

pub const TEXT_PRIMARY: &str = "text-amber-300";
pub const TEXT_SECONDARY: &str = "text-slate-300";
pub const TEXT_MUTED: &str = "text-slate-500";

pub const LABEL: &str = "block text-xs font-semibold uppercase text-slate-500";

// ============================================
// VALUE COLORING
// ============================================

/// Row tint by profitability, mirroring the old conditional table styling.
pub fn row_tint(profit: f64, profit_pct: f64) -> &'static str {
    if profit < 0.0 {
        "bg-rose-950/40"
    } else if profit_pct > 50.0 {
        "bg-emerald-950/40"
    } else if profit_pct > 20.0 {
        "bg-yellow-950/30"
    } else {
        ""
    }
}

pub fn profit_text(value: f64) -> &'static str {
    if value > 0.0 {
        "text-emerald-400"
    } else if value < 0.0 {
        "text-rose-400"
    } else {
        "text-slate-400"
    }
}
