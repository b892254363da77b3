use thiserror::Error;

use crate::api::ApiError;
use crate::services::export_service::ExportError;

/// Why a fetch-and-dump run stopped
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("{0}")]
    Fetch(#[from] ApiError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: ExportError,
    },
    #[error("Failed to print output: {0}")]
    Output(String),
}

impl RunError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Fetch(_) => 1,
            RunError::Write { .. } | RunError::Output(_) => 2,
            RunError::Config(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_distinguish_failures() {
        let fetch = RunError::from(ApiError::RequestError("timed out".to_string()));
        let write = RunError::Write {
            path: "mbb_prices_20260211_120000.csv".to_string(),
            source: ExportError::Io("permission denied".to_string()),
        };
        let config = RunError::Config("bad date".to_string());

        assert_eq!(fetch.exit_code(), 1);
        assert_eq!(write.exit_code(), 2);
        assert_eq!(config.exit_code(), 3);
    }

    #[test]
    fn test_fetch_error_displays_provider_message() {
        let err = RunError::from(ApiError::NotFound("unknown symbol".to_string()));
        assert_eq!(err.to_string(), "Not Found: unknown symbol");
    }
}
