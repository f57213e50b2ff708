//! Thin asynchronous client for the poe.ninja data API.
//!
//! - Provides typed accessors for the currency, skill gem and beast overviews.
//! - Maintains a simple 5-minute in-memory cache with stale fallbacks.
//! - Public accessors fail softly: the valuation engine must keep working on
//!   defaults when poe.ninja is unreachable.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{CurrencyPrices, DEFAULT_DIVINE_RATE};

const DEFAULT_BASE_URL: &str = "https://poe.ninja/api/data/";
const DEFAULT_TTL: Duration = Duration::from_secs(300);
const USER_AGENT: &str = "gem-profit-scanner/1.0";

/// League names probed in order when none is configured.
const CANDIDATE_LEAGUES: [&str; 5] = ["Keepers", "Settlers", "Affliction", "Ancestor", "Crucible"];

/// Gem family the scanner prices.
pub const GEM_NAME_FILTER: &str = "Awakened";

const DIVINE_ORB: &str = "Divine Orb";
const GEMCUTTERS_PRISM: &str = "Gemcutter's Prism";
const VAAL_ORB: &str = "Vaal Orb";
const LEVELING_BEAST: &str = "Wild Brambleback";

#[derive(Debug, Error)]
pub enum NinjaError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Default)]
struct NinjaCache {
    currency: Option<Cached<Vec<CurrencyLine>>>,
    gems: Option<Cached<Vec<GemLine>>>,
    beasts: Option<Cached<Vec<GemLine>>>,
}

#[derive(Clone)]
pub struct NinjaClient {
    http: Client,
    base_url: Url,
    league: String,
    cache: Arc<Mutex<NinjaCache>>,
    ttl: Duration,
}

impl NinjaClient {
    /// Builds a client for a known league.
    pub fn new(league: impl Into<String>) -> Result<Self, NinjaError> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            league: league.into(),
            cache: Arc::new(Mutex::new(NinjaCache::default())),
            ttl: DEFAULT_TTL,
        })
    }

    /// Builds a client, probing candidate league names when `league` is
    /// `None`. Falls back to `Standard` when nothing answers.
    pub async fn detect(league: Option<String>) -> Result<Self, NinjaError> {
        if let Some(league) = league {
            println!("[ninja] using configured league: {league}");
            return Self::new(league);
        }

        let probe = Self::new("Standard")?;
        for candidate in CANDIDATE_LEAGUES {
            if probe.league_exists(candidate).await {
                println!("[ninja] selected league: {candidate}");
                return Ok(Self {
                    league: candidate.to_string(),
                    ..probe
                });
            }
        }

        println!("[ninja] no challenge league found, using Standard");
        Ok(probe)
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    /// Chaos values for the Awakened gem family keyed by
    /// `"{name}_L{level}_Q{quality}"`. Empty on transport failure.
    pub async fn gem_snapshot(&self) -> HashMap<String, f64> {
        match self.gem_lines().await {
            Ok(lines) => build_snapshot(&lines),
            Err(err) => {
                println!("[ninja] gem overview failed: {err}");
                HashMap::new()
            }
        }
    }

    /// Chaos per divine; `DEFAULT_DIVINE_RATE` when the overview is down.
    pub async fn divine_rate(&self) -> f64 {
        match self.currency_lines().await {
            Ok(lines) => chaos_equivalent(&lines, DIVINE_ORB).unwrap_or(DEFAULT_DIVINE_RATE),
            Err(err) => {
                println!("[ninja] currency overview failed: {err}");
                DEFAULT_DIVINE_RATE
            }
        }
    }

    /// Consumable prices; documented defaults for anything missing.
    pub async fn currency_prices(&self) -> CurrencyPrices {
        let defaults = CurrencyPrices::default();

        let (gcp, vaal) = match self.currency_lines().await {
            Ok(lines) => (
                chaos_equivalent(&lines, GEMCUTTERS_PRISM).unwrap_or(defaults.gcp),
                chaos_equivalent(&lines, VAAL_ORB).unwrap_or(defaults.vaal),
            ),
            Err(err) => {
                println!("[ninja] currency overview failed: {err}");
                (defaults.gcp, defaults.vaal)
            }
        };

        let brambleback = match self.beast_lines().await {
            Ok(lines) => lines
                .iter()
                .find(|line| line.name.contains(LEVELING_BEAST))
                .and_then(|line| line.chaos_value)
                .unwrap_or(defaults.brambleback),
            Err(err) => {
                println!("[ninja] beast overview failed: {err}");
                defaults.brambleback
            }
        };

        CurrencyPrices {
            gcp,
            vaal,
            brambleback,
        }
    }

    pub async fn clear_cache(&self) {
        let mut cache = self.cache.lock().await;
        *cache = NinjaCache::default();
    }

    async fn league_exists(&self, league: &str) -> bool {
        let Ok(url) = self.overview_url("currencyoverview", league, "Currency") else {
            return false;
        };
        matches!(
            self.http.get(url).send().await,
            Ok(response) if response.status().is_success()
        )
    }

    async fn currency_lines(&self) -> Result<Vec<CurrencyLine>, NinjaError> {
        {
            let cache = self.cache.lock().await;
            if let Some(fresh) = cache.currency.as_ref().and_then(|c| c.if_fresh(self.ttl)) {
                return Ok(fresh);
            }
        }

        let url = self.overview_url("currencyoverview", &self.league, "Currency")?;
        match self.fetch::<CurrencyOverview>(url).await {
            Ok(overview) => {
                let mut cache = self.cache.lock().await;
                cache.currency = Some(Cached::now(overview.lines.clone()));
                Ok(overview.lines)
            }
            Err(err) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.currency.as_ref().map(Cached::stale) {
                    println!("[ninja] serving stale currency overview after error: {err}");
                    return Ok(stale);
                }
                Err(err)
            }
        }
    }

    async fn gem_lines(&self) -> Result<Vec<GemLine>, NinjaError> {
        {
            let cache = self.cache.lock().await;
            if let Some(fresh) = cache.gems.as_ref().and_then(|c| c.if_fresh(self.ttl)) {
                return Ok(fresh);
            }
        }

        let url = self.overview_url("itemoverview", &self.league, "SkillGem")?;
        match self.fetch::<ItemOverview>(url).await {
            Ok(overview) => {
                let mut cache = self.cache.lock().await;
                cache.gems = Some(Cached::now(overview.lines.clone()));
                Ok(overview.lines)
            }
            Err(err) => {
                let cache = self.cache.lock().await;
                if let Some(stale) = cache.gems.as_ref().map(Cached::stale) {
                    println!("[ninja] serving stale gem overview after error: {err}");
                    return Ok(stale);
                }
                Err(err)
            }
        }
    }

    async fn beast_lines(&self) -> Result<Vec<GemLine>, NinjaError> {
        {
            let cache = self.cache.lock().await;
            if let Some(fresh) = cache.beasts.as_ref().and_then(|c| c.if_fresh(self.ttl)) {
                return Ok(fresh);
            }
        }

        let url = self.overview_url("itemoverview", &self.league, "Beast")?;
        let overview = self.fetch::<ItemOverview>(url).await?;
        let mut cache = self.cache.lock().await;
        cache.beasts = Some(Cached::now(overview.lines.clone()));
        Ok(overview.lines)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, NinjaError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    fn overview_url(&self, path: &str, league: &str, kind: &str) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut()
            .append_pair("league", league)
            .append_pair("type", kind);
        Ok(url)
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn now(value: T) -> Self {
        Self {
            value,
            fetched_at: SystemTime::now(),
        }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<T> {
        self.fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
            .then(|| self.value.clone())
    }

    fn stale(&self) -> T {
        self.value.clone()
    }
}

#[derive(Clone, Debug, Deserialize)]
struct CurrencyOverview {
    #[serde(default)]
    lines: Vec<CurrencyLine>,
}

#[derive(Clone, Debug, Deserialize)]
struct CurrencyLine {
    #[serde(rename = "currencyTypeName")]
    name: String,
    #[serde(rename = "chaosEquivalent", default)]
    chaos_equivalent: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
struct ItemOverview {
    #[serde(default)]
    lines: Vec<GemLine>,
}

#[derive(Clone, Debug, Deserialize)]
struct GemLine {
    #[serde(default)]
    name: String,
    #[serde(rename = "gemLevel", default)]
    gem_level: Option<u8>,
    #[serde(rename = "gemQuality", default)]
    gem_quality: Option<u8>,
    #[serde(rename = "chaosValue", default)]
    chaos_value: Option<f64>,
    #[serde(default)]
    corrupted: Option<bool>,
}

fn chaos_equivalent(lines: &[CurrencyLine], name: &str) -> Option<f64> {
    lines
        .iter()
        .find(|line| line.name == name)
        .and_then(|line| line.chaos_equivalent)
}

/// Keys uncorrupted Awakened gem lines by `"{name}_L{level}_Q{quality}"`.
/// Corrupted lines are excluded; the snapshot backs uncorrupted lookups only.
fn build_snapshot(lines: &[GemLine]) -> HashMap<String, f64> {
    let mut snapshot = HashMap::new();
    for line in lines {
        if !line.name.contains(GEM_NAME_FILTER) {
            continue;
        }
        if line.corrupted == Some(true) {
            continue;
        }
        let (Some(level), Some(value)) = (line.gem_level, line.chaos_value) else {
            continue;
        };
        let quality = line.gem_quality.unwrap_or(0);
        snapshot.insert(format!("{}_L{}_Q{}", line.name, level, quality), value);
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEM_PAYLOAD: &str = r#"{
        "lines": [
            {"name": "Awakened Spell Echo Support", "gemLevel": 1, "gemQuality": 0, "chaosValue": 45.5},
            {"name": "Awakened Spell Echo Support", "gemLevel": 5, "gemQuality": 20, "chaosValue": 1400.0},
            {"name": "Awakened Spell Echo Support", "gemLevel": 6, "gemQuality": 20, "chaosValue": 3000.0, "corrupted": true},
            {"name": "Spell Echo Support", "gemLevel": 20, "gemQuality": 20, "chaosValue": 5.0},
            {"name": "Awakened Multistrike Support", "chaosValue": 80.0}
        ]
    }"#;

    #[test]
    fn snapshot_keys_follow_name_level_quality() {
        let overview: ItemOverview = serde_json::from_str(GEM_PAYLOAD).unwrap();
        let snapshot = build_snapshot(&overview.lines);

        assert_eq!(
            snapshot.get("Awakened Spell Echo Support_L1_Q0"),
            Some(&45.5)
        );
        assert_eq!(
            snapshot.get("Awakened Spell Echo Support_L5_Q20"),
            Some(&1400.0)
        );
    }

    #[test]
    fn snapshot_filters_family_and_corruption() {
        let overview: ItemOverview = serde_json::from_str(GEM_PAYLOAD).unwrap();
        let snapshot = build_snapshot(&overview.lines);

        // Non-awakened gems and corrupted lines never enter the snapshot.
        assert!(!snapshot.keys().any(|k| k.starts_with("Spell Echo")));
        assert!(!snapshot.contains_key("Awakened Spell Echo Support_L6_Q20"));
        // Lines without a level are unpriceable and dropped.
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn divine_rate_reads_chaos_equivalent() {
        let payload = r#"{
            "lines": [
                {"currencyTypeName": "Gemcutter's Prism", "chaosEquivalent": 1.5},
                {"currencyTypeName": "Divine Orb", "chaosEquivalent": 182.0},
                {"currencyTypeName": "Vaal Orb", "chaosEquivalent": 2.0}
            ]
        }"#;
        let overview: CurrencyOverview = serde_json::from_str(payload).unwrap();
        assert_eq!(chaos_equivalent(&overview.lines, DIVINE_ORB), Some(182.0));
        assert_eq!(
            chaos_equivalent(&overview.lines, GEMCUTTERS_PRISM),
            Some(1.5)
        );
        assert_eq!(chaos_equivalent(&overview.lines, "Mirror of Kalandra"), None);
    }
}
