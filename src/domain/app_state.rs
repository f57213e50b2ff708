use std::collections::HashMap;

use super::currency::{DisplayMode, DEFAULT_DIVINE_RATE};
use super::entities::{CorruptionEv, CurrencyPrices, LevelingProfit, LoadProgress};

/// Process-wide UI state. Owned by the application root and handed to pages
/// through a signal; list updates are whole-sale replacements, never
/// incremental edits visible mid-update.
#[derive(Clone, Debug)]
pub struct AppState {
    pub league: String,
    pub display_mode: DisplayMode,
    /// Bulk pricing results, sorted by profit percentage descending.
    pub profits: Vec<LevelingProfit>,
    /// Multiplier-based corruption estimates for the table, by gem name.
    pub ev_estimates: HashMap<String, CorruptionEv>,
    pub currency: CurrencyPrices,
    pub divine_rate: f64,
    /// Wall-clock label of the last successful refresh.
    pub last_update: Option<String>,
    pub progress: LoadProgress,
    /// Gem selected for the live-priced detail panel.
    pub selected_gem: Option<String>,
    /// Live corruption EV for the selected gem, once fetched.
    pub detail_ev: Option<CorruptionEv>,
    pub detail_loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            league: "Standard".to_string(),
            display_mode: DisplayMode::default(),
            profits: Vec::new(),
            ev_estimates: HashMap::new(),
            currency: CurrencyPrices::default(),
            divine_rate: DEFAULT_DIVINE_RATE,
            last_update: None,
            progress: LoadProgress::default(),
            selected_gem: None,
            detail_ev: None,
            detail_loading: false,
        }
    }
}

impl AppState {
    /// Atomically swaps in a fresh batch of results. Estimates for gems that
    /// dropped out of the batch are discarded with it.
    pub fn replace_results(
        &mut self,
        profits: Vec<LevelingProfit>,
        ev_estimates: HashMap<String, CorruptionEv>,
        currency: CurrencyPrices,
        divine_rate: f64,
        last_update: String,
    ) {
        self.profits = profits;
        self.ev_estimates = ev_estimates;
        self.currency = currency;
        self.divine_rate = divine_rate;
        self.last_update = Some(last_update);
    }

    pub fn profit_for(&self, gem_name: &str) -> Option<&LevelingProfit> {
        self.profits.iter().find(|p| p.gem_name == gem_name)
    }

    pub fn select_gem(&mut self, gem_name: Option<String>) {
        if self.selected_gem != gem_name {
            self.detail_ev = None;
        }
        self.selected_gem = gem_name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GemVariant, PriceOrigin};

    fn profit(name: &str) -> LevelingProfit {
        LevelingProfit::new(
            GemVariant::new(name, 1, 0, false),
            GemVariant::new(name, 5, 20, false),
            50.0,
            40.0,
            20.0,
            150.0,
            PriceOrigin::Market,
            PriceOrigin::Market,
        )
    }

    #[test]
    fn replace_results_swaps_the_whole_batch() {
        let mut state = AppState::default();
        state.replace_results(
            vec![profit("Awakened Melee Physical Damage Support")],
            HashMap::new(),
            CurrencyPrices::default(),
            180.0,
            "12:00:00".to_string(),
        );

        assert_eq!(state.profits.len(), 1);
        assert_eq!(state.divine_rate, 180.0);
        assert_eq!(state.last_update.as_deref(), Some("12:00:00"));

        state.replace_results(
            Vec::new(),
            HashMap::new(),
            CurrencyPrices::default(),
            185.0,
            "12:05:00".to_string(),
        );
        assert!(state.profits.is_empty());
    }

    #[test]
    fn selecting_a_different_gem_drops_stale_detail() {
        let mut state = AppState::default();
        state.selected_gem = Some("A".to_string());
        state.detail_ev = None;
        state.select_gem(Some("B".to_string()));
        assert_eq!(state.selected_gem.as_deref(), Some("B"));
        assert!(state.detail_ev.is_none());
    }
}
