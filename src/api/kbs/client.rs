use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER, USER_AGENT};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::KbsBar;
use crate::api::{ApiError, Interval, QuoteSource};
use crate::models::PriceRecord;

/// KB Securities quote-history client
pub struct KbsClient {
    http_client: HttpClient,
    base_url: String,
}

impl KbsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://kbbuddywts.kbsec.com.vn";

    /// Create a client against the production host
    pub fn new(timeout: Duration) -> Result<Self, ApiError> {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string(), timeout)
    }

    /// Create a client with a custom base URL (mirrors, local stubs)
    pub fn with_base_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder()
            .timeout(timeout)
            .default_headers(Self::create_headers());
        // Local stubs must not be routed through an environment proxy
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("mbb-prices/", env!("CARGO_PKG_VERSION"))),
        );
        headers
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // KBS sometimes wraps the reason in {"message": "..."}
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("message")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            404 => ApiError::NotFound(body_text),
            429 => {
                warn!("Rate limited by KBS, retry after {:?} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /iis-server/investment/stocks/{symbol}/data_{interval}
    ///
    /// Retrieves raw bars for a symbol. Dates are sent as `DD-MM-YYYY`.
    ///
    /// # Returns
    /// * `Ok(Vec<KbsBar>)` - Bars in the order KBS returned them (possibly empty)
    /// * `Err(ApiError)` - Transport, status or decoding failure
    pub async fn get_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<KbsBar>, ApiError> {
        let url = format!(
            "{}/iis-server/investment/stocks/{}/data_{}",
            self.base_url,
            symbol.to_uppercase(),
            interval.segment()
        );
        let sdate = start.format("%d-%m-%Y").to_string();
        let edate = end.format("%d-%m-%Y").to_string();
        debug!("GET {} sdate={} edate={}", url, sdate, edate);

        let response = self
            .http_client
            .get(&url)
            .query(&[("sdate", sdate.as_str()), ("edate", edate.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        extract_bars(body, interval)
    }
}

fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

/// Pull the `data_<interval>` array out of a history body.
/// A missing or null key means the provider had nothing for the range.
fn extract_bars(mut body: serde_json::Value, interval: Interval) -> Result<Vec<KbsBar>, ApiError> {
    let key = format!("data_{}", interval.segment());
    match body.get_mut(&key).map(serde_json::Value::take) {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(rows) => serde_json::from_value(rows)
            .map_err(|e| ApiError::DeserializationError(format!("Invalid '{}' rows: {}", key, e))),
    }
}

impl QuoteSource for KbsClient {
    fn name(&self) -> &str {
        "kbs"
    }

    async fn history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PriceRecord>, ApiError> {
        self.get_history(symbol, start, end, interval)
            .await?
            .into_iter()
            .map(PriceRecord::try_from)
            .collect()
    }
}
