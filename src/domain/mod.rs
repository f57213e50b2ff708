//! Domain logic for gem valuation lives here.

pub mod app_state;
pub mod currency;
pub mod entities;
pub mod valuation;

#[allow(unused_imports)]
pub use app_state::AppState;
#[allow(unused_imports)]
pub use currency::{format_price, to_chaos, DisplayMode, DEFAULT_DIVINE_RATE};
#[allow(unused_imports)]
pub use entities::{
    CorruptionEv, CorruptionOutcome, CurrencyPrices, CurrencyUnit, GemVariant, LevelingProfit,
    LoadProgress, OutcomePrice, PriceOrigin, PriceQuote,
};
#[allow(unused_imports)]
pub use valuation::{
    average_lowest, ListingQuery, PriceSource, ValuationEngine, ValuationError, SEARCH_LIMIT,
};
