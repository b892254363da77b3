pub mod error;
pub mod kbs;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::PriceRecord;

pub use error::ApiError;
pub use kbs::KbsClient;

/// A provider able to return price history for one symbol.
///
/// The run only talks to this trait so tests can swap in a canned source.
pub trait QuoteSource {
    /// Short identifier used in log lines
    fn name(&self) -> &str;

    /// Fetch rows for `symbol` between `start` and `end` (both inclusive)
    async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PriceRecord>, ApiError>;
}

/// Known quote providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// KB Securities Vietnam
    Kbs,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kbs" => Ok(DataSource::Kbs),
            other => Err(format!("Unknown data source: '{}'. Supported: kbs", other)),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Kbs => write!(f, "kbs"),
        }
    }
}

/// Sampling granularity of the history request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Day,
    Week,
    Month,
}

impl Interval {
    /// Path segment used by the provider (`data_day`, `data_week`, ...)
    pub fn segment(&self) -> &'static str {
        match self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    // Case matters: "1M" is a month, "1m" would be a minute bar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1D" | "D" => Ok(Interval::Day),
            "1W" | "W" => Ok(Interval::Week),
            "1M" | "M" => Ok(Interval::Month),
            other => Err(format!("Unknown interval: '{}'. Supported: 1D, 1W, 1M", other)),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Interval::Day => "1D",
            Interval::Week => "1W",
            Interval::Month => "1M",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_source() {
        assert_eq!("kbs".parse::<DataSource>(), Ok(DataSource::Kbs));
        assert_eq!(" KBS ".parse::<DataSource>(), Ok(DataSource::Kbs));
        assert!("vci".parse::<DataSource>().is_err());
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!("1D".parse::<Interval>(), Ok(Interval::Day));
        assert_eq!("1W".parse::<Interval>(), Ok(Interval::Week));
        assert_eq!("1M".parse::<Interval>(), Ok(Interval::Month));
        assert!("1m".parse::<Interval>().is_err());
        assert_eq!(Interval::Day.to_string(), "1D");
        assert_eq!(Interval::Month.segment(), "month");
    }
}
