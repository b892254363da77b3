use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use chrono::Local;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::{DataSource, KbsClient};
use config::{FetchConfig, ProviderSettings};
use models::RunReport;
use services::run_service;
use utils::RunError;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mbb_prices=info,reqwest=warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout();
    match fetch_and_dump(&mut stdout).await {
        Ok(report) => {
            info!(
                "✅ Done: {} records ({} to {}) in {}",
                report.record_count,
                report.summary.first_date,
                report.summary.last_date,
                report.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            run_service::report_failure(&e, &mut stdout);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn fetch_and_dump<W: Write>(out: &mut W) -> Result<RunReport, RunError> {
    let config = FetchConfig::try_new()?;
    let settings = ProviderSettings::from_env();
    debug!("Run config: {:?}, provider: {:?}", config, settings);

    match config.source {
        DataSource::Kbs => {
            let client = match settings.base_url {
                Some(base_url) => KbsClient::with_base_url(base_url, settings.timeout)?,
                None => KbsClient::new(settings.timeout)?,
            };
            info!("🔌 Using {} at {}", config.source, client.base_url());
            run_service::run(&client, &config, Path::new("."), Local::now(), out).await
        }
    }
}
