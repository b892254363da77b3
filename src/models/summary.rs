//! Summary statistics models

use chrono::NaiveDate;

/// Aggregates printed after a successful fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub min_close: f64,
    pub max_close: f64,
    pub avg_volume: f64,
}
