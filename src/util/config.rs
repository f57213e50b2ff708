//! Environment-driven runtime configuration.

use std::env;

/// Port the hosted (web) variant of the UI listens on.
pub const DEFAULT_PORT: u16 = 10000;

/// Set when running under a managed process supervisor; the bulk load is
/// then deferred until the first user interaction instead of starting at
/// boot.
pub const MANAGED_ENV: &str = "MANAGED";

/// Overrides poe.ninja league auto-detection.
pub const LEAGUE_ENV: &str = "LEAGUE";

pub const PORT_ENV: &str = "PORT";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Defer the background bulk load until the first interaction.
    pub deferred_load: bool,
    pub league: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var(PORT_ENV).ok().as_deref()),
            deferred_load: env::var(MANAGED_ENV).is_ok(),
            league: env::var(LEAGUE_ENV).ok().filter(|l| !l.trim().is_empty()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            deferred_load: false,
            league: None,
        }
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset_or_garbage() {
        assert_eq!(parse_port(None), DEFAULT_PORT);
        assert_eq!(parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(parse_port(Some("")), DEFAULT_PORT);
    }

    #[test]
    fn port_parses_when_valid() {
        assert_eq!(parse_port(Some("8080")), 8080);
        assert_eq!(parse_port(Some(" 3000 ")), 3000);
    }
}
