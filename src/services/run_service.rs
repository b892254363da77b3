use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::api::QuoteSource;
use crate::config::FetchConfig;
use crate::models::{PriceRecord, RunReport};
use crate::services::export_service::{output_file_name, write_csv};
use crate::services::quote_service::fetch_history;
use crate::services::summary_service::summary_lines;
use crate::utils::{RunError, Table};

/// Rows shown under "Data preview:"
pub const PREVIEW_ROWS: usize = 10;

pub const REMEDIATION_HINT: &str =
    "Make sure the quote provider is reachable (set QUOTE_API_BASE_URL to override the KBS endpoint)";

fn output_error(e: std::io::Error) -> RunError {
    RunError::Output(e.to_string())
}

/// Fetch, write `<symbol>_prices_<timestamp>.csv` into `out_dir`, then
/// print the success block to `out`.
///
/// Nothing is written to disk unless the fetch succeeded.
pub async fn run<S: QuoteSource, W: Write>(
    source: &S,
    config: &FetchConfig,
    out_dir: &Path,
    now: DateTime<Local>,
    out: &mut W,
) -> Result<RunReport, RunError> {
    writeln!(out, "Fetching historical prices for {}...", config.symbol).map_err(output_error)?;
    out.flush().map_err(output_error)?;

    let (rows, summary) = fetch_history(source, config).await?;

    let file_name = output_file_name(&config.symbol, &now);
    let output_path = out_dir.join(&file_name);
    write_csv(&output_path, &rows).map_err(|source| RunError::Write {
        path: file_name.clone(),
        source,
    })?;
    info!("💾 Saved {} rows to {}", rows.len(), output_path.display());

    let mut text = String::new();
    text.push_str(&format!("\n✓ Successfully fetched {} records\n", rows.len()));
    text.push_str(&format!("✓ Saved to: {}\n", file_name));
    text.push_str("\nData preview:\n");
    text.push_str(&render_preview(&rows));
    text.push_str("\n\nData summary:\n");
    for line in summary_lines(&summary) {
        text.push_str(&line);
        text.push('\n');
    }
    out.write_all(text.as_bytes()).map_err(output_error)?;

    Ok(RunReport {
        output_path,
        record_count: rows.len(),
        summary,
    })
}

/// First `PREVIEW_ROWS` rows with a leading positional index
pub fn render_preview(rows: &[PriceRecord]) -> String {
    let mut headers = vec![""];
    headers.extend(PriceRecord::COLUMNS);

    let mut table = Table::new(&headers);
    for (i, row) in rows.iter().take(PREVIEW_ROWS).enumerate() {
        let mut cells = vec![i.to_string()];
        cells.extend(row.cells());
        table.add_row(cells);
    }
    table.render()
}

/// Print the one-line failure message and the fixed hint
pub fn report_failure<W: Write>(err: &RunError, out: &mut W) {
    error!("Run failed: {:?}", err);
    let _ = writeln!(out, "✗ Error: {}", err);
    let _ = writeln!(out, "{}", REMEDIATION_HINT);
}
