use std::sync::atomic::{AtomicUsize, Ordering};

pub mod config;

pub const APP_NAME: &str = "Gem Profit Scanner";

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}")
}

/// Wall-clock HH:MM:SS (UTC) label for "last updated" displays.
pub fn clock_label() -> String {
    let now = time::OffsetDateTime::now_utc();
    format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
}
