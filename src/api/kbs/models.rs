use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::ApiError;
use crate::models::PriceRecord;

/// KBS quotes stock prices in VND; rows are kept in thousands of VND.
pub const PRICE_SCALE: f64 = 1000.0;

/// One bar from the `data_<interval>` array of a history response.
/// KBS sends `null` for some open/high/low values; those stay empty.
#[derive(Debug, Clone, Deserialize)]
pub struct KbsBar {
    #[serde(rename = "t")]
    pub time: String,
    #[serde(rename = "o", default)]
    pub open: Option<f64>,
    #[serde(rename = "h", default)]
    pub high: Option<f64>,
    #[serde(rename = "l", default)]
    pub low: Option<f64>,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

/// Parse the bar timestamp. KBS sends `YYYY-MM-DD` (sometimes with a
/// trailing time part) or `DD/MM/YYYY`.
pub fn parse_bar_time(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(head, "%d/%m/%Y"))
        .ok()
}

impl TryFrom<KbsBar> for PriceRecord {
    type Error = ApiError;

    fn try_from(bar: KbsBar) -> Result<Self, Self::Error> {
        let time = parse_bar_time(&bar.time).ok_or_else(|| {
            ApiError::DeserializationError(format!("Unrecognized bar time: '{}'", bar.time))
        })?;

        Ok(PriceRecord {
            time,
            open: bar.open.map(|p| p / PRICE_SCALE),
            high: bar.high.map(|p| p / PRICE_SCALE),
            low: bar.low.map(|p| p / PRICE_SCALE),
            close: bar.close / PRICE_SCALE,
            volume: bar.volume.max(0.0).round() as u64,
        })
    }
}
