//! Client for the official pathofexile.com trade search API.
//!
//! Two-step protocol: POST a filtered search to obtain a query id plus result
//! ids, then GET the listing details for a batch of those ids. The trade site
//! throttles aggressively, so the client spaces dependent requests and backs
//! off exponentially on explicit rate-limit responses. All failures collapse
//! to an empty listing set; callers fall back to the market snapshot.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::{to_chaos, ListingQuery, PriceQuote};

const DEFAULT_BASE_URL: &str = "https://www.pathofexile.com/api/trade/";
const USER_AGENT: &str = "gem-profit-scanner/1.0";

/// Pause between the search POST and the dependent fetch GET.
const REQUEST_SPACING: Duration = Duration::from_millis(500);

/// Backoff attempts on a throttled response before giving up.
const MAX_ATTEMPTS: u32 = 3;

/// Mirror-priced listings are jokes, never real asks.
const VANITY_CURRENCY: &str = "mirror";

/// Pure backoff schedule: 1s base, doubling per attempt.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt)
}

#[derive(Debug, Error)]
pub enum TradeError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate limited after {MAX_ATTEMPTS} attempts")]
    Throttled,
}

#[derive(Clone)]
pub struct TradeClient {
    http: Client,
    base_url: Url,
    league: String,
}

impl TradeClient {
    pub fn new(league: impl Into<String>) -> Result<Self, TradeError> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            league: league.into(),
        })
    }

    /// Chaos amounts of up to `limit` matching listings, sorted ascending.
    /// Divine asks are normalized with `divine_rate`; mirror asks are
    /// dropped. Empty on zero matches or any transport failure.
    pub async fn search_listings(
        &self,
        query: &ListingQuery,
        limit: usize,
        divine_rate: f64,
    ) -> Vec<f64> {
        match self.try_search(query, limit, divine_rate).await {
            Ok(amounts) => amounts,
            Err(err) => {
                println!("[trade] search for {} failed: {err}", query.gem_name);
                Vec::new()
            }
        }
    }

    async fn try_search(
        &self,
        query: &ListingQuery,
        limit: usize,
        divine_rate: f64,
    ) -> Result<Vec<f64>, TradeError> {
        let search_url = self.base_url.join(&format!("search/{}", self.league))?;
        let payload = build_search_payload(query);

        let search: SearchResponse = self
            .send_with_backoff(|| self.http.post(search_url.clone()).json(&payload))
            .await?;

        let ids: Vec<String> = search.result.into_iter().take(limit).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        // The fetch depends on the search; give the rate limiter room.
        tokio::time::sleep(REQUEST_SPACING).await;

        let mut fetch_url = self.base_url.join(&format!("fetch/{}", ids.join(",")))?;
        fetch_url
            .query_pairs_mut()
            .append_pair("query", &search.id);

        let fetched: FetchResponse = self
            .send_with_backoff(|| self.http.get(fetch_url.clone()))
            .await?;

        Ok(listing_amounts(&fetched, divine_rate))
    }

    async fn send_with_backoff<T, F>(&self, request: F) -> Result<T, TradeError>
    where
        T: serde::de::DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        for attempt in 0..MAX_ATTEMPTS {
            let response = request().send().await?;
            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                let delay = backoff_delay(attempt);
                println!(
                    "[trade] rate limited, retrying in {}s (attempt {}/{MAX_ATTEMPTS})",
                    delay.as_secs(),
                    attempt + 1
                );
                tokio::time::sleep(delay).await;
                continue;
            }
            return Ok(response.error_for_status()?.json().await?);
        }
        Err(TradeError::Throttled)
    }
}

/// Builds the structured search query the trade API expects: available
/// listings of the exact gem type within the level/quality window, cheapest
/// first.
fn build_search_payload(query: &ListingQuery) -> Value {
    json!({
        "query": {
            "status": { "option": "available" },
            "type": query.gem_name,
            "filters": {
                "misc_filters": {
                    "filters": {
                        "gem_level": { "min": query.level, "max": query.level },
                        "quality": { "min": query.quality_min, "max": query.quality_max },
                        "corrupted": { "option": if query.corrupted { "true" } else { "false" } }
                    }
                }
            }
        },
        "sort": { "price": "asc" }
    })
}

/// Extracts chaos-normalized ask prices from fetched listings, ascending.
fn listing_amounts(fetched: &FetchResponse, divine_rate: f64) -> Vec<f64> {
    let mut amounts: Vec<f64> = fetched
        .result
        .iter()
        .filter_map(|item| {
            let price = item.listing.price.as_ref()?;
            let quote = match price.currency.as_str() {
                VANITY_CURRENCY => return None,
                "chaos" => PriceQuote::chaos(price.amount),
                "divine" => PriceQuote::divine(price.amount),
                _ => return None,
            };
            Some(to_chaos(quote, divine_rate))
        })
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .collect();
    amounts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    amounts
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    id: String,
    #[serde(default)]
    result: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FetchResponse {
    #[serde(default)]
    result: Vec<FetchedItem>,
}

#[derive(Debug, Deserialize)]
struct FetchedItem {
    #[serde(default)]
    listing: Listing,
}

#[derive(Debug, Default, Deserialize)]
struct Listing {
    #[serde(default)]
    price: Option<ListingPrice>,
}

#[derive(Debug, Deserialize)]
struct ListingPrice {
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_one_second() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
    }

    #[test]
    fn search_payload_carries_the_filter_window() {
        let query = ListingQuery {
            gem_name: "Awakened Spell Echo Support".to_string(),
            level: 5,
            quality_min: 21,
            quality_max: 23,
            corrupted: true,
        };
        let payload = build_search_payload(&query);

        assert_eq!(payload["query"]["status"]["option"], "available");
        assert_eq!(payload["query"]["type"], "Awakened Spell Echo Support");
        let filters = &payload["query"]["filters"]["misc_filters"]["filters"];
        assert_eq!(filters["gem_level"]["min"], 5);
        assert_eq!(filters["gem_level"]["max"], 5);
        assert_eq!(filters["quality"]["min"], 21);
        assert_eq!(filters["quality"]["max"], 23);
        assert_eq!(filters["corrupted"]["option"], "true");
        assert_eq!(payload["sort"]["price"], "asc");
    }

    #[test]
    fn listing_amounts_normalize_and_drop_vanity_prices() {
        let payload = r#"{
            "result": [
                {"listing": {"price": {"amount": 120.0, "currency": "chaos"}}},
                {"listing": {"price": {"amount": 1.0, "currency": "mirror"}}},
                {"listing": {"price": {"amount": 0.5, "currency": "divine"}}},
                {"listing": {"price": {"amount": 80.0, "currency": "chaos"}}},
                {"listing": {}}
            ]
        }"#;
        let fetched: FetchResponse = serde_json::from_str(payload).unwrap();
        let amounts = listing_amounts(&fetched, 180.0);

        // Mirror and unpriced listings are gone; divine converted; ascending.
        assert_eq!(amounts, vec![80.0, 90.0, 120.0]);
    }

    #[test]
    fn unknown_currencies_are_ignored() {
        let payload = r#"{
            "result": [
                {"listing": {"price": {"amount": 3.0, "currency": "exalted"}}},
                {"listing": {"price": {"amount": 10.0, "currency": "chaos"}}}
            ]
        }"#;
        let fetched: FetchResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(listing_amounts(&fetched, 180.0), vec![10.0]);
    }
}
