use crate::models::{PriceRecord, PriceSummary};
use crate::utils::{format_price, format_thousands};

/// Date span, close range and mean volume; `None` for no rows
pub fn summarize(rows: &[PriceRecord]) -> Option<PriceSummary> {
    let first = rows.first()?;

    let mut summary = PriceSummary {
        first_date: first.time,
        last_date: first.time,
        min_close: first.close,
        max_close: first.close,
        avg_volume: 0.0,
    };
    let mut volume_total = 0.0;

    for row in rows {
        summary.first_date = summary.first_date.min(row.time);
        summary.last_date = summary.last_date.max(row.time);
        summary.min_close = summary.min_close.min(row.close);
        summary.max_close = summary.max_close.max(row.close);
        volume_total += row.volume as f64;
    }
    summary.avg_volume = volume_total / rows.len() as f64;

    Some(summary)
}

/// The indented summary block printed under "Data summary:"
pub fn summary_lines(summary: &PriceSummary) -> Vec<String> {
    vec![
        format!("  Date range: {} to {}", summary.first_date, summary.last_date),
        format!(
            "  Price range: {} - {}",
            format_price(summary.min_close),
            format_price(summary.max_close)
        ),
        format!("  Avg volume: {}", format_thousands(summary.avg_volume)),
    ]
}
