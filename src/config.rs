//! Run configuration
//!
//! What to fetch is fixed at compile time. Only provider plumbing (base URL,
//! timeout) can be tuned through the environment or a `.env` file.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::warn;

use crate::api::{DataSource, Interval};
use crate::utils::RunError;

pub const SYMBOL: &str = "MBB";
pub const START_DATE: &str = "2026-01-01";
pub const END_DATE: &str = "2026-02-11";
pub const SOURCE: &str = "kbs";
pub const INTERVAL: &str = "1D";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Parsed, validated run parameters
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub source: DataSource,
    pub interval: Interval,
}

impl FetchConfig {
    /// Build the config from the compile-time constants
    pub fn try_new() -> Result<Self, RunError> {
        Self::parse(SYMBOL, START_DATE, END_DATE, SOURCE, INTERVAL)
    }

    pub fn parse(
        symbol: &str,
        start: &str,
        end: &str,
        source: &str,
        interval: &str,
    ) -> Result<Self, RunError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(RunError::Config("Symbol cannot be empty".to_string()));
        }

        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(RunError::Config(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        Ok(Self {
            symbol,
            start,
            end,
            source: source.parse().map_err(RunError::Config)?,
            interval: interval.parse().map_err(RunError::Config)?,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RunError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| RunError::Config(format!("Invalid date '{}': {}", raw, e)))
}

/// Provider connection settings
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Override for the provider host; `None` uses the built-in default
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Read `QUOTE_API_BASE_URL` and `QUOTE_API_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("QUOTE_API_BASE_URL").ok(),
            std::env::var("QUOTE_API_TIMEOUT_SECS").ok(),
        )
    }

    fn from_values(base_url: Option<String>, timeout: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let timeout_secs = match timeout {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "Ignoring QUOTE_API_TIMEOUT_SECS={:?}, using {}s",
                        raw, DEFAULT_TIMEOUT_SECS
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = FetchConfig::try_new().unwrap();
        assert_eq!(config.symbol, "MBB");
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(config.end, NaiveDate::from_ymd_opt(2026, 2, 11).unwrap());
        assert_eq!(config.source, DataSource::Kbs);
        assert_eq!(config.interval, Interval::Day);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = FetchConfig::parse("MBB", "2026-02-11", "2026-01-01", "kbs", "1D").unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
    }

    #[test]
    fn test_bad_inputs_are_config_errors() {
        assert!(FetchConfig::parse("MBB", "2026-13-01", "2026-12-31", "kbs", "1D").is_err());
        assert!(FetchConfig::parse("MBB", "2026-01-01", "2026-01-31", "tcbs", "1D").is_err());
        assert!(FetchConfig::parse("MBB", "2026-01-01", "2026-01-31", "kbs", "5m").is_err());
        assert!(FetchConfig::parse("  ", "2026-01-01", "2026-01-31", "kbs", "1D").is_err());
    }

    #[test]
    fn test_provider_settings_defaults() {
        let settings = ProviderSettings::from_values(None, None);
        assert_eq!(settings.base_url, None);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_provider_settings_overrides() {
        let settings = ProviderSettings::from_values(
            Some("http://127.0.0.1:8080".to_string()),
            Some("5".to_string()),
        );
        assert_eq!(settings.base_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(settings.timeout, Duration::from_secs(5));

        let fallback = ProviderSettings::from_values(Some("  ".to_string()), Some("soon".to_string()));
        assert_eq!(fallback.base_url, None);
        assert_eq!(fallback.timeout, Duration::from_secs(30));
    }
}
