//! Combined price source backed by poe.ninja and the trade API.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CurrencyPrices, ListingQuery, PriceSource};

use super::ninja::{NinjaClient, NinjaError};
use super::trade::{TradeClient, TradeError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ninja(#[from] NinjaError),
    #[error(transparent)]
    Trade(#[from] TradeError),
}

/// The production [`PriceSource`]: market snapshot and exchange rate from
/// poe.ninja, live listings from pathofexile.com, both scoped to one league.
#[derive(Clone)]
pub struct PoeApi {
    ninja: NinjaClient,
    trade: TradeClient,
}

impl PoeApi {
    /// Builds both clients, auto-detecting the league unless overridden.
    pub async fn detect(league: Option<String>) -> Result<Self, ApiError> {
        let ninja = NinjaClient::detect(league).await?;
        let trade = TradeClient::new(ninja.league())?;
        Ok(Self { ninja, trade })
    }

    pub fn league(&self) -> &str {
        self.ninja.league()
    }

    pub async fn clear_cache(&self) {
        self.ninja.clear_cache().await;
    }
}

#[async_trait]
impl PriceSource for PoeApi {
    async fn gem_snapshot(&self) -> HashMap<String, f64> {
        self.ninja.gem_snapshot().await
    }

    async fn divine_rate(&self) -> f64 {
        self.ninja.divine_rate().await
    }

    async fn currency_prices(&self) -> CurrencyPrices {
        self.ninja.currency_prices().await
    }

    async fn search_listings(&self, query: &ListingQuery, limit: usize) -> Vec<f64> {
        // One rate per search keeps every listing in the batch consistent;
        // the ninja client memoizes it anyway.
        let divine_rate = self.ninja.divine_rate().await;
        self.trade.search_listings(query, limit, divine_rate).await
    }
}
