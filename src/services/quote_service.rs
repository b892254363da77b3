use tracing::{info, warn};

use crate::api::{ApiError, QuoteSource};
use crate::config::FetchConfig;
use crate::models::{PriceRecord, PriceSummary};
use crate::services::summary_service::summarize;

/// Fetch the configured history window from `source` and summarize it.
///
/// Rows come back exactly as the provider ordered them. An empty answer is
/// treated as a failed fetch.
pub async fn fetch_history<S: QuoteSource>(
    source: &S,
    config: &FetchConfig,
) -> Result<(Vec<PriceRecord>, PriceSummary), ApiError> {
    info!(
        "📈 Requesting {} {} bars from {} ({} to {})",
        config.symbol,
        config.interval,
        source.name(),
        config.start,
        config.end
    );

    let rows = source
        .history(&config.symbol, config.start, config.end, config.interval)
        .await?;

    let Some(summary) = summarize(&rows) else {
        warn!("{} returned no rows for {}", source.name(), config.symbol);
        return Err(ApiError::NoData {
            symbol: config.symbol.clone(),
            start: config.start.to_string(),
            end: config.end.to_string(),
        });
    };

    info!("Received {} rows from {}", rows.len(), source.name());
    Ok((rows, summary))
}
