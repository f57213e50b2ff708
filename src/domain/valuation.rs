//! The pricing/valuation engine.
//!
//! Combines the poe.ninja snapshot and live trade listings into leveling
//! profit records and corruption expected values. All remote failures are
//! contained at the [`PriceSource`] boundary; this layer only ever returns
//! typed absence ([`ValuationError::PriceUnavailable`]) or flagged estimates.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Mutex,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::infra::cache::{ResultCache, RESULT_TTL};

use super::entities::{
    CorruptionEv, CorruptionOutcome, CurrencyPrices, GemVariant, LevelingProfit, LoadProgress,
    OutcomePrice, PriceOrigin,
};

/// How many trade listings to fetch detail for per search.
pub const SEARCH_LIMIT: usize = 10;

/// How many of the cheapest listings feed the average. Biases toward the
/// realistic buy-it-now price and discards outlier high asks.
const AVERAGE_DEPTH: usize = 5;

/// One filtered trade-site search: exact type plus level/quality window and
/// corruption state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    pub gem_name: String,
    pub level: u8,
    pub quality_min: u8,
    pub quality_max: u8,
    pub corrupted: bool,
}

impl ListingQuery {
    /// Exact-match query for an uncorrupted/corrupted variant as-is.
    pub fn exact(variant: &GemVariant) -> Self {
        Self {
            gem_name: variant.name.clone(),
            level: variant.level,
            quality_min: variant.quality,
            quality_max: variant.quality,
            corrupted: variant.corrupted,
        }
    }

    /// Query for the corrupted variant a corruption outcome produces from
    /// the leveled gem.
    pub fn outcome(leveled: &GemVariant, outcome: CorruptionOutcome) -> Self {
        let (quality_min, quality_max) = outcome.quality_range(leveled.quality);
        Self {
            gem_name: leveled.name.clone(),
            level: outcome.level(leveled.level),
            quality_min,
            quality_max,
            corrupted: true,
        }
    }
}

/// Boundary over the two upstream price services. Implementations must fail
/// softly: transport errors become empty results or documented defaults,
/// never propagated errors.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Aggregate snapshot keyed by [`GemVariant::snapshot_key`], in chaos.
    /// Empty on transport failure.
    async fn gem_snapshot(&self) -> HashMap<String, f64>;

    /// Chaos per divine; `DEFAULT_DIVINE_RATE` on failure.
    async fn divine_rate(&self) -> f64;

    /// Consumable prices; `CurrencyPrices::default()` on failure.
    async fn currency_prices(&self) -> CurrencyPrices;

    /// Chaos amounts of matching live listings, sorted ascending. Empty on
    /// zero matches or transport failure.
    async fn search_listings(&self, query: &ListingQuery, limit: usize) -> Vec<f64>;
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValuationError {
    #[error("no price available for {} L{} Q{}", .variant.name, .variant.level, .variant.quality)]
    PriceUnavailable { variant: GemVariant },
}

/// Averages the cheapest `depth` listings, fewer if fewer are available.
pub fn average_lowest(prices: &[f64], depth: usize) -> Option<f64> {
    let mut sorted: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|price| price.is_finite() && *price > 0.0)
        .collect();
    if sorted.is_empty() || depth == 0 {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let take = sorted.len().min(depth);
    Some(sorted[..take].iter().sum::<f64>() / take as f64)
}

pub struct ValuationEngine<S> {
    source: S,
    /// Keyed by both endpoints of the leveling run; the same gem priced
    /// toward a different level/quality target is a different computation.
    base_cache: ResultCache<(String, String), LevelingProfit>,
    /// Keyed by the leveled variant plus the vaal cost (as bits, so the
    /// key stays hashable).
    ev_cache: ResultCache<(String, u64), CorruptionEv>,
}

impl<S: PriceSource> ValuationEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            base_cache: ResultCache::new(),
            ev_cache: ResultCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drops all memoized results so the next request re-prices everything.
    pub fn clear_caches(&self) {
        self.base_cache.clear();
        self.ev_cache.clear();
    }

    /// Prices leveling one gem from `low` to `high`: live listings preferred,
    /// snapshot fallback per side. Fails with `PriceUnavailable` when neither
    /// source can price a side; a fabricated zero is never returned.
    pub async fn price_leveling(
        &self,
        low: &GemVariant,
        high: &GemVariant,
        catalyst_cost: f64,
        refinement_unit_cost: f64,
        refinement_units: u32,
    ) -> Result<LevelingProfit, ValuationError> {
        let key = (low.snapshot_key(), high.snapshot_key());
        if let Some(hit) = self.base_cache.get_if_fresh(&key, RESULT_TTL) {
            return Ok(hit);
        }

        let snapshot = self.source.gem_snapshot().await;
        let (input_cost, source_low) = self
            .resolve_price(low, &snapshot)
            .await
            .ok_or_else(|| ValuationError::PriceUnavailable {
                variant: low.clone(),
            })?;
        let (sale_value, source_high) = self
            .resolve_price(high, &snapshot)
            .await
            .ok_or_else(|| ValuationError::PriceUnavailable {
                variant: high.clone(),
            })?;

        let result = LevelingProfit::new(
            low.clone(),
            high.clone(),
            input_cost,
            catalyst_cost,
            refinement_unit_cost * refinement_units as f64,
            sale_value,
            source_low,
            source_high,
        );
        self.base_cache.store(key, result.clone());
        Ok(result)
    }

    /// Prices the five corruption outcomes from live listings, substituting
    /// the documented multiplier of the sale value for any outcome the trade
    /// site cannot price. Never fails; worst case is a fully estimated EV.
    pub async fn price_corruption(&self, base: &LevelingProfit, vaal_cost: f64) -> CorruptionEv {
        let key = (base.high.snapshot_key(), vaal_cost.to_bits());
        if let Some(hit) = self.ev_cache.get_if_fresh(&key, RESULT_TTL) {
            return hit;
        }

        let mut outcomes = HashMap::new();
        for outcome in CorruptionOutcome::ALL {
            let query = ListingQuery::outcome(&base.high, outcome);
            let listings = self.source.search_listings(&query, SEARCH_LIMIT).await;
            let price = match average_lowest(&listings, AVERAGE_DEPTH) {
                Some(chaos) => OutcomePrice {
                    chaos,
                    estimated: false,
                },
                None => OutcomePrice {
                    chaos: base.sale_value * outcome.fallback_multiplier(),
                    estimated: true,
                },
            };
            outcomes.insert(outcome, price);
        }

        let ev = corruption_ev(base, vaal_cost, outcomes);
        self.ev_cache.store(key, ev.clone());
        ev
    }

    /// Multiplier-only EV for the bulk table; no network calls.
    pub fn estimate_corruption(&self, base: &LevelingProfit, vaal_cost: f64) -> CorruptionEv {
        let outcomes = CorruptionOutcome::ALL
            .into_iter()
            .map(|outcome| {
                (
                    outcome,
                    OutcomePrice {
                        chaos: base.sale_value * outcome.fallback_multiplier(),
                        estimated: true,
                    },
                )
            })
            .collect();
        corruption_ev(base, vaal_cost, outcomes)
    }

    /// Prices every gem family found in the snapshot, reporting progress
    /// through the shared counter. Gems that cannot be priced on either side
    /// are skipped rather than rendered with fabricated numbers.
    pub async fn price_all(
        &self,
        costs: &CurrencyPrices,
        target_quality: u8,
        progress: &Mutex<LoadProgress>,
    ) -> Vec<LevelingProfit> {
        let snapshot = self.source.gem_snapshot().await;
        let names: BTreeSet<String> = snapshot
            .keys()
            .filter_map(|key| key.rsplit_once("_L").map(|(name, _)| name.to_string()))
            .collect();

        set_progress(progress, 0, names.len(), "Starting bulk pricing", false);

        let mut results = Vec::new();
        for (index, name) in names.iter().enumerate() {
            set_progress(
                progress,
                index,
                names.len(),
                format!("Pricing {name}"),
                false,
            );

            let low = GemVariant::new(name.clone(), 1, 0, false);
            let high = GemVariant::new(name.clone(), 5, target_quality, false);
            match self
                .price_leveling(
                    &low,
                    &high,
                    costs.brambleback,
                    costs.gcp,
                    target_quality as u32,
                )
                .await
            {
                Ok(profit) => results.push(profit),
                Err(err) => println!("[loader] skipping {name}: {err}"),
            }
        }

        results.sort_by(|a, b| b.profit_pct.partial_cmp(&a.profit_pct).unwrap());
        set_progress(progress, names.len(), names.len(), "Done", true);
        results
    }

    async fn resolve_price(
        &self,
        variant: &GemVariant,
        snapshot: &HashMap<String, f64>,
    ) -> Option<(f64, PriceOrigin)> {
        let listings = self
            .source
            .search_listings(&ListingQuery::exact(variant), SEARCH_LIMIT)
            .await;
        if let Some(average) = average_lowest(&listings, AVERAGE_DEPTH) {
            return Some((average, PriceOrigin::Live));
        }
        snapshot
            .get(&variant.snapshot_key())
            .copied()
            .filter(|value| *value > 0.0)
            .map(|value| (value, PriceOrigin::Market))
    }
}

fn set_progress(
    progress: &Mutex<LoadProgress>,
    current: usize,
    total: usize,
    status: impl Into<String>,
    complete: bool,
) {
    let mut state = progress.lock().expect("progress mutex poisoned");
    *state = LoadProgress {
        current,
        total,
        status: status.into(),
        complete,
    };
}

fn corruption_ev(
    base: &LevelingProfit,
    vaal_cost: f64,
    outcomes: HashMap<CorruptionOutcome, OutcomePrice>,
) -> CorruptionEv {
    let expected_revenue: f64 = CorruptionOutcome::ALL
        .iter()
        .map(|outcome| outcome.probability() * outcomes[outcome].chaos)
        .sum();
    let expected_cost = base.total_cost + vaal_cost;
    let expected_profit = expected_revenue - expected_cost;
    let expected_profit_pct = if expected_cost > 0.0 {
        expected_profit / expected_cost * 100.0
    } else {
        0.0
    };
    let is_estimate = outcomes.values().any(|price| price.estimated);

    CorruptionEv {
        gem_name: base.gem_name.clone(),
        vaal_cost,
        outcomes,
        expected_revenue,
        expected_cost,
        expected_profit,
        expected_profit_pct,
        baseline_profit: base.profit,
        delta_vs_baseline: expected_profit - base.profit,
        is_estimate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubSource {
        snapshot: HashMap<String, f64>,
        listings: HashMap<ListingQuery, Vec<f64>>,
        snapshot_calls: AtomicUsize,
        search_calls: AtomicUsize,
    }

    impl StubSource {
        fn with_snapshot(entries: &[(&str, f64)]) -> Self {
            Self {
                snapshot: entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), *value))
                    .collect(),
                ..Self::default()
            }
        }

        fn add_listings(&mut self, query: ListingQuery, prices: Vec<f64>) {
            self.listings.insert(query, prices);
        }
    }

    #[async_trait]
    impl PriceSource for StubSource {
        async fn gem_snapshot(&self) -> HashMap<String, f64> {
            self.snapshot_calls.fetch_add(1, Ordering::Relaxed);
            self.snapshot.clone()
        }

        async fn divine_rate(&self) -> f64 {
            100.0
        }

        async fn currency_prices(&self) -> CurrencyPrices {
            CurrencyPrices::default()
        }

        async fn search_listings(&self, query: &ListingQuery, _limit: usize) -> Vec<f64> {
            self.search_calls.fetch_add(1, Ordering::Relaxed);
            self.listings.get(query).cloned().unwrap_or_default()
        }
    }

    fn gem(level: u8, quality: u8) -> GemVariant {
        GemVariant::new("Awakened Spell Echo Support", level, quality, false)
    }

    fn base_profit() -> LevelingProfit {
        // input 50 + catalyst 40 + refinement 20×1 = 110 total, sale 150.
        LevelingProfit::new(
            gem(1, 0),
            gem(5, 20),
            50.0,
            40.0,
            20.0,
            150.0,
            PriceOrigin::Market,
            PriceOrigin::Market,
        )
    }

    #[test]
    fn outcome_probabilities_sum_to_one() {
        let sum: f64 = CorruptionOutcome::ALL
            .iter()
            .map(|outcome| outcome.probability())
            .sum();
        // The decimal encoding (0.3333 + 4×0.1667 = 1.0001) must fail here.
        assert!((sum - 1.0).abs() < 1e-12, "probabilities drifted: {sum}");
    }

    #[test]
    fn profit_ratio_guards_division_by_zero() {
        let free = LevelingProfit::new(
            gem(1, 0),
            gem(5, 20),
            0.0,
            0.0,
            0.0,
            150.0,
            PriceOrigin::Market,
            PriceOrigin::Market,
        );
        assert_eq!(free.total_cost, 0.0);
        assert_eq!(free.profit_pct, 0.0);
    }

    #[test]
    fn leveling_profit_invariants_hold() {
        let profit = base_profit();
        assert_eq!(profit.total_cost, 110.0);
        assert_eq!(profit.profit, 40.0);
        assert!((profit.profit_pct - 40.0 / 110.0 * 100.0).abs() < 1e-9);
        assert!((profit.profit_pct - 36.36).abs() < 0.01);
    }

    #[test]
    fn average_lowest_takes_cheapest_five() {
        let prices = [90.0, 10.0, 30.0, 20.0, 50.0, 40.0, 600.0];
        assert_eq!(average_lowest(&prices, 5), Some(30.0));
        // Fewer than five available: average what exists.
        assert_eq!(average_lowest(&[10.0, 20.0], 5), Some(15.0));
        assert_eq!(average_lowest(&[], 5), None);
        // Non-positive and non-finite entries never count.
        assert_eq!(average_lowest(&[0.0, -5.0, f64::NAN], 5), None);
    }

    #[tokio::test]
    async fn live_listings_win_over_snapshot() {
        let mut source = StubSource::with_snapshot(&[
            ("Awakened Spell Echo Support_L1_Q0", 45.0),
            ("Awakened Spell Echo Support_L5_Q20", 140.0),
        ]);
        source.add_listings(ListingQuery::exact(&gem(1, 0)), vec![50.0]);
        source.add_listings(ListingQuery::exact(&gem(5, 20)), vec![150.0]);

        let engine = ValuationEngine::new(source);
        let profit = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await
            .unwrap();

        assert_eq!(profit.input_cost, 50.0);
        assert_eq!(profit.sale_value, 150.0);
        assert_eq!(profit.source_low, PriceOrigin::Live);
        assert_eq!(profit.source_high, PriceOrigin::Live);
        assert_eq!(profit.total_cost, 110.0);
        assert_eq!(profit.profit, 40.0);
    }

    #[tokio::test]
    async fn snapshot_fallback_is_tagged_market() {
        let source = StubSource::with_snapshot(&[
            ("Awakened Spell Echo Support_L1_Q0", 45.0),
            ("Awakened Spell Echo Support_L5_Q20", 140.0),
        ]);
        let engine = ValuationEngine::new(source);
        let profit = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await
            .unwrap();

        assert_eq!(profit.source_low, PriceOrigin::Market);
        assert_eq!(profit.source_high, PriceOrigin::Market);
        assert_eq!(profit.input_cost, 45.0);
        assert_eq!(profit.sale_value, 140.0);
    }

    #[tokio::test]
    async fn missing_both_sources_is_typed_absence() {
        let engine = ValuationEngine::new(StubSource::default());
        let result = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await;
        assert!(matches!(
            result,
            Err(ValuationError::PriceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn zero_snapshot_value_is_not_a_price() {
        // An unpriced sentinel in the snapshot must not become sale_value=0.
        let source = StubSource::with_snapshot(&[
            ("Awakened Spell Echo Support_L1_Q0", 45.0),
            ("Awakened Spell Echo Support_L5_Q20", 0.0),
        ]);
        let engine = ValuationEngine::new(source);
        let result = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn repeated_pricing_within_ttl_hits_cache() {
        let source = StubSource::with_snapshot(&[
            ("Awakened Spell Echo Support_L1_Q0", 45.0),
            ("Awakened Spell Echo Support_L5_Q20", 140.0),
        ]);
        let engine = ValuationEngine::new(source);

        let first = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await
            .unwrap();
        let second = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(engine.source().snapshot_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn cached_results_are_scoped_to_the_variant_pair() {
        let source = StubSource::with_snapshot(&[
            ("Awakened Spell Echo Support_L1_Q0", 45.0),
            ("Awakened Spell Echo Support_L5_Q20", 150.0),
            ("Awakened Spell Echo Support_L5_Q0", 60.0),
        ]);
        let engine = ValuationEngine::new(source);

        let toward_q20 = engine
            .price_leveling(&gem(1, 0), &gem(5, 20), 40.0, 1.0, 20)
            .await
            .unwrap();
        // Same gem, different target: must re-price, not replay the Q20 record.
        let toward_q0 = engine
            .price_leveling(&gem(1, 0), &gem(5, 0), 40.0, 1.0, 0)
            .await
            .unwrap();

        assert_eq!(toward_q20.sale_value, 150.0);
        assert_eq!(toward_q0.sale_value, 60.0);
        assert_eq!(toward_q0.high.quality, 0);
    }

    #[tokio::test]
    async fn ev_cache_distinguishes_vaal_cost() {
        let engine = ValuationEngine::new(StubSource::default());
        let base = base_profit();

        let cheap = engine.price_corruption(&base, 5.0).await;
        let pricey = engine.price_corruption(&base, 25.0).await;

        assert_eq!(cheap.expected_cost, 115.0);
        assert_eq!(pricey.expected_cost, 135.0);
        assert_eq!(cheap.vaal_cost, 5.0);
        assert_eq!(pricey.vaal_cost, 25.0);
    }

    #[tokio::test]
    async fn expected_value_weighs_live_outcome_prices() {
        let mut source = StubSource::default();
        let leveled = gem(5, 20);
        source.add_listings(
            ListingQuery::outcome(&leveled, CorruptionOutcome::NoChange),
            vec![100.0],
        );
        source.add_listings(
            ListingQuery::outcome(&leveled, CorruptionOutcome::LevelUp),
            vec![300.0],
        );
        source.add_listings(
            ListingQuery::outcome(&leveled, CorruptionOutcome::LevelDown),
            vec![40.0],
        );
        source.add_listings(
            ListingQuery::outcome(&leveled, CorruptionOutcome::QualityUp),
            vec![120.0],
        );
        source.add_listings(
            ListingQuery::outcome(&leveled, CorruptionOutcome::QualityDown),
            vec![60.0],
        );

        let engine = ValuationEngine::new(source);
        let ev = engine.price_corruption(&base_profit(), 5.0).await;

        let expected = 100.0 / 3.0 + (300.0 + 40.0 + 120.0 + 60.0) / 6.0;
        assert!((ev.expected_revenue - expected).abs() < 1e-9);
        assert_eq!(ev.expected_cost, 115.0);
        assert!((ev.expected_profit - (expected - 115.0)).abs() < 1e-9);
        assert!(!ev.is_estimate);
        assert_eq!(ev.baseline_profit, 40.0);
        assert!((ev.delta_vs_baseline - (ev.expected_profit - 40.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn swapping_two_outcome_prices_shifts_revenue_by_probability_gap() {
        let leveled = gem(5, 20);
        let prices = |no_change: f64, level_up: f64| {
            let mut source = StubSource::default();
            source.add_listings(
                ListingQuery::outcome(&leveled, CorruptionOutcome::NoChange),
                vec![no_change],
            );
            source.add_listings(
                ListingQuery::outcome(&leveled, CorruptionOutcome::LevelUp),
                vec![level_up],
            );
            source.add_listings(
                ListingQuery::outcome(&leveled, CorruptionOutcome::LevelDown),
                vec![40.0],
            );
            source.add_listings(
                ListingQuery::outcome(&leveled, CorruptionOutcome::QualityUp),
                vec![120.0],
            );
            source.add_listings(
                ListingQuery::outcome(&leveled, CorruptionOutcome::QualityDown),
                vec![60.0],
            );
            source
        };

        let base = base_profit();
        let original = ValuationEngine::new(prices(100.0, 300.0))
            .price_corruption(&base, 5.0)
            .await;
        let swapped = ValuationEngine::new(prices(300.0, 100.0))
            .price_corruption(&base, 5.0)
            .await;

        let p_gap = CorruptionOutcome::NoChange.probability()
            - CorruptionOutcome::LevelUp.probability();
        let price_gap = 300.0 - 100.0;
        assert!(
            (swapped.expected_revenue - original.expected_revenue - p_gap * price_gap).abs()
                < 1e-9
        );
    }

    #[tokio::test]
    async fn unpriceable_corruption_is_fully_estimated_never_an_error() {
        let engine = ValuationEngine::new(StubSource::default());
        let base = base_profit();
        let ev = engine.price_corruption(&base, 5.0).await;

        assert!(ev.is_estimate);
        for outcome in CorruptionOutcome::ALL {
            let price = ev.outcomes[&outcome];
            assert!(price.estimated);
            assert!(
                (price.chaos - base.sale_value * outcome.fallback_multiplier()).abs() < 1e-9
            );
        }
    }

    #[test]
    fn table_estimate_matches_multipliers() {
        let engine = ValuationEngine::new(StubSource::default());
        let base = base_profit();
        let ev = engine.estimate_corruption(&base, 5.0);

        let expected = 150.0
            * (0.95 / 3.0 + 1.5 / 6.0 + 0.4 / 6.0 + 1.1 / 6.0 + 0.6 / 6.0);
        assert!((ev.expected_revenue - expected).abs() < 1e-9);
        assert!(ev.is_estimate);
        // No remote traffic for the table path.
        assert_eq!(engine.source().search_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn bulk_pricing_skips_unpriceable_gems_and_completes_progress() {
        let source = StubSource::with_snapshot(&[
            ("Awakened Spell Echo Support_L1_Q0", 45.0),
            ("Awakened Spell Echo Support_L5_Q20", 140.0),
            ("Awakened Multistrike Support_L1_Q0", 30.0),
            // No L5 entry for Multistrike: the row must be skipped.
        ]);
        let engine = ValuationEngine::new(source);
        let progress = Mutex::new(LoadProgress::default());

        let results = engine
            .price_all(&CurrencyPrices::default(), 20, &progress)
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].gem_name, "Awakened Spell Echo Support");
        let state = progress.lock().unwrap();
        assert!(state.complete);
        assert_eq!(state.total, 2);
        assert_eq!(state.current, 2);
    }

    #[test]
    fn outcome_queries_target_documented_ranges() {
        let leveled = gem(5, 20);
        let up = ListingQuery::outcome(&leveled, CorruptionOutcome::QualityUp);
        assert_eq!((up.quality_min, up.quality_max), (21, 23));
        let down = ListingQuery::outcome(&leveled, CorruptionOutcome::QualityDown);
        assert_eq!((down.quality_min, down.quality_max), (10, 19));
        let level_up = ListingQuery::outcome(&leveled, CorruptionOutcome::LevelUp);
        assert_eq!(level_up.level, 6);
        assert!(level_up.corrupted);
        let level_down = ListingQuery::outcome(&leveled, CorruptionOutcome::LevelDown);
        assert_eq!(level_down.level, 4);
    }
}
