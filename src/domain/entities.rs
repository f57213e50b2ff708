use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One priceable gem configuration. Two variants describe the same market
/// entity iff all four fields match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GemVariant {
    pub name: String,
    pub level: u8,
    /// Quality percentage, 0–23 (23 only reachable through corruption).
    pub quality: u8,
    pub corrupted: bool,
}

impl GemVariant {
    pub fn new(name: impl Into<String>, level: u8, quality: u8, corrupted: bool) -> Self {
        Self {
            name: name.into(),
            level,
            quality,
            corrupted,
        }
    }

    /// Key used by the poe.ninja snapshot, e.g. `"Awakened Spell Echo Support_L5_Q20"`.
    pub fn snapshot_key(&self) -> String {
        format!("{}_L{}_Q{}", self.name, self.level, self.quality)
    }
}

/// The two nested currency denominations gems are listed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrencyUnit {
    Chaos,
    Divine,
}

/// A raw price as quoted by an upstream source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceQuote {
    pub amount: f64,
    pub unit: CurrencyUnit,
}

impl PriceQuote {
    pub fn chaos(amount: f64) -> Self {
        Self {
            amount,
            unit: CurrencyUnit::Chaos,
        }
    }

    pub fn divine(amount: f64) -> Self {
        Self {
            amount,
            unit: CurrencyUnit::Divine,
        }
    }

    /// Explicit "unpriced" sentinel. Never treated as a real zero price.
    pub fn unknown() -> Self {
        Self::chaos(0.0)
    }

    pub fn is_known(&self) -> bool {
        self.amount > 0.0
    }
}

/// Which upstream actually supplied a price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceOrigin {
    /// poe.ninja aggregate snapshot.
    Market,
    /// pathofexile.com trade search.
    Live,
}

impl PriceOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            PriceOrigin::Market => "poe.ninja",
            PriceOrigin::Live => "trade",
        }
    }
}

/// Chaos prices for the consumables that drive leveling cost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrencyPrices {
    /// Gemcutter's Prism, per point of quality.
    pub gcp: f64,
    /// Vaal Orb, one per corruption attempt.
    pub vaal: f64,
    /// Wild Brambleback, one per leveling run.
    pub brambleback: f64,
}

impl Default for CurrencyPrices {
    fn default() -> Self {
        Self {
            gcp: 1.0,
            vaal: 1.0,
            brambleback: 10.0,
        }
    }
}

/// Deterministic cost/revenue record for leveling one gem from `low` to
/// `high`. Immutable once computed; a fresher request supersedes it.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelingProfit {
    pub gem_name: String,
    pub low: GemVariant,
    pub high: GemVariant,
    /// Chaos cost of the low-tier gem.
    pub input_cost: f64,
    /// Chaos cost of the leveling catalyst (one Brambleback).
    pub leveling_cost: f64,
    /// Chaos cost of quality refinement (GCP × target quality).
    pub quality_cost: f64,
    pub total_cost: f64,
    /// Chaos sale value of the leveled gem.
    pub sale_value: f64,
    pub profit: f64,
    pub profit_pct: f64,
    pub source_low: PriceOrigin,
    pub source_high: PriceOrigin,
}

impl LevelingProfit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        low: GemVariant,
        high: GemVariant,
        input_cost: f64,
        leveling_cost: f64,
        quality_cost: f64,
        sale_value: f64,
        source_low: PriceOrigin,
        source_high: PriceOrigin,
    ) -> Self {
        let total_cost = input_cost + leveling_cost + quality_cost;
        let profit = sale_value - total_cost;
        let profit_pct = if total_cost > 0.0 {
            profit / total_cost * 100.0
        } else {
            0.0
        };
        Self {
            gem_name: low.name.clone(),
            low,
            high,
            input_cost,
            leveling_cost,
            quality_cost,
            total_cost,
            sale_value,
            profit,
            profit_pct,
            source_low,
            source_high,
        }
    }
}

/// The five possible results of Vaal-corrupting a leveled gem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorruptionOutcome {
    NoChange,
    LevelUp,
    LevelDown,
    QualityUp,
    QualityDown,
}

impl CorruptionOutcome {
    pub const ALL: [CorruptionOutcome; 5] = [
        CorruptionOutcome::NoChange,
        CorruptionOutcome::LevelUp,
        CorruptionOutcome::LevelDown,
        CorruptionOutcome::QualityUp,
        CorruptionOutcome::QualityDown,
    ];

    /// Outcome probability as an exact fraction. The decimal encodings seen
    /// in the wild (0.3333 / 0.1667) drift and must not be used.
    pub fn probability(&self) -> f64 {
        match self {
            CorruptionOutcome::NoChange => 1.0 / 3.0,
            _ => 1.0 / 6.0,
        }
    }

    /// Multiplier applied to the leveled gem's sale value when no live price
    /// is available for this outcome.
    pub fn fallback_multiplier(&self) -> f64 {
        match self {
            CorruptionOutcome::NoChange => 0.95,
            CorruptionOutcome::LevelUp => 1.5,
            CorruptionOutcome::LevelDown => 0.4,
            CorruptionOutcome::QualityUp => 1.1,
            CorruptionOutcome::QualityDown => 0.6,
        }
    }

    /// Quality window searched on the trade site for this outcome, relative
    /// to the leveled gem's quality.
    pub fn quality_range(&self, base_quality: u8) -> (u8, u8) {
        match self {
            CorruptionOutcome::QualityUp => (21, 23),
            CorruptionOutcome::QualityDown => (10, 19),
            _ => (base_quality, base_quality),
        }
    }

    /// Gem level searched for this outcome, relative to the leveled gem.
    pub fn level(&self, base_level: u8) -> u8 {
        match self {
            CorruptionOutcome::LevelUp => base_level + 1,
            CorruptionOutcome::LevelDown => base_level.saturating_sub(1),
            _ => base_level,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CorruptionOutcome::NoChange => "No Effect",
            CorruptionOutcome::LevelUp => "+1 Level",
            CorruptionOutcome::LevelDown => "-1 Level",
            CorruptionOutcome::QualityUp => "Quality Up",
            CorruptionOutcome::QualityDown => "Quality Down",
        }
    }
}

/// Chaos price resolved for one corruption outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutcomePrice {
    pub chaos: f64,
    /// True when the price is a fallback multiplier, not a live listing.
    pub estimated: bool,
}

/// Probability-weighted expected value of corrupting a leveled gem.
#[derive(Clone, Debug, PartialEq)]
pub struct CorruptionEv {
    pub gem_name: String,
    pub vaal_cost: f64,
    pub outcomes: HashMap<CorruptionOutcome, OutcomePrice>,
    pub expected_revenue: f64,
    /// Base leveling cost plus one Vaal Orb.
    pub expected_cost: f64,
    pub expected_profit: f64,
    pub expected_profit_pct: f64,
    pub baseline_profit: f64,
    pub delta_vs_baseline: f64,
    /// True when at least one outcome price is a fallback estimate.
    pub is_estimate: bool,
}

/// Progress of the background bulk loader, polled by the UI. Readers must
/// tolerate transiently stale values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadProgress {
    pub current: usize,
    pub total: usize,
    pub status: String,
    pub complete: bool,
}
