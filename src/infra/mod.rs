//! Clients for the upstream price services and shared caching.

pub mod cache;
pub mod ninja;
pub mod source;
pub mod trade;

#[allow(unused_imports)]
pub use cache::{ResultCache, RESULT_TTL};
#[allow(unused_imports)]
pub use ninja::NinjaClient;
#[allow(unused_imports)]
pub use source::{ApiError, PoeApi};
#[allow(unused_imports)]
pub use trade::TradeClient;
