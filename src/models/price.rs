//! Price history models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single trading-day row as returned by the quote provider.
///
/// Field order is the CSV column order. A missing open/high/low is written
/// as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub time: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: u64,
}

impl PriceRecord {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 6] = ["time", "open", "high", "low", "close", "volume"];

    /// Cell values rendered for the console preview
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.time.to_string(),
            optional_cell(self.open),
            optional_cell(self.high),
            optional_cell(self.low),
            self.close.to_string(),
            self.volume.to_string(),
        ]
    }
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "NaN".to_string())
}
