//! Chaos/divine conversion and price display formatting.

use super::entities::{CurrencyUnit, PriceQuote};

/// Chaos per divine when the currency overview cannot be reached.
pub const DEFAULT_DIVINE_RATE: f64 = 100.0;

/// Which denomination the UI renders prices in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Chaos,
    Divine,
}

impl DisplayMode {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Chaos => "Chaos",
            DisplayMode::Divine => "Divine",
        }
    }
}

/// Normalizes a quote to chaos using the batch's divine rate.
pub fn to_chaos(quote: PriceQuote, divine_rate: f64) -> f64 {
    match quote.unit {
        CurrencyUnit::Chaos => quote.amount,
        CurrencyUnit::Divine => quote.amount * divine_rate,
    }
}

/// Formats a chaos amount for display. Divine mode falls back to chaos below
/// one full divine so users never see meaningless fractions like "0.03d".
pub fn format_price(amount_chaos: f64, mode: DisplayMode, divine_rate: f64) -> String {
    if mode == DisplayMode::Divine && divine_rate > 0.0 {
        let divine_value = amount_chaos / divine_rate;
        if divine_value >= 1.0 {
            return format!("{divine_value:.2}d");
        }
    }
    format!("{amount_chaos:.1}c")
}
