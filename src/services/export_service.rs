use std::path::Path;

use chrono::{DateTime, TimeZone};
use tracing::debug;

use crate::models::PriceRecord;

/// Errors raised while writing the CSV output
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            ExportError::Io(e.to_string())
        } else {
            ExportError::Csv(e.to_string())
        }
    }
}

/// `<symbol>_prices_<YYYYMMDD_HHMMSS>.csv`, one-second resolution.
///
/// Two runs inside the same second get the same name and the later one
/// overwrites the earlier file.
pub fn output_file_name<Tz: TimeZone>(symbol: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_prices_{}.csv",
        symbol.to_lowercase(),
        now.format("%Y%m%d_%H%M%S")
    )
}

/// Write every row to `path` with a header and no index column.
/// An existing file is truncated.
pub fn write_csv(path: &Path, rows: &[PriceRecord]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(PriceRecord::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| ExportError::Io(e.to_string()))?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
    use tempfile::TempDir;

    fn rows() -> Vec<PriceRecord> {
        vec![
            PriceRecord {
                time: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
                open: Some(25.0),
                high: Some(25.5),
                low: Some(24.9),
                close: 25.3,
                volume: 1_000_000,
            },
            PriceRecord {
                time: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                open: None,
                high: Some(25.8),
                low: Some(25.2),
                close: 25.75,
                volume: 2_000_000,
            },
        ]
    }

    #[test]
    fn test_output_file_name_format() {
        let now = Utc.with_ymd_and_hms(2026, 2, 11, 9, 5, 7).unwrap();
        assert_eq!(output_file_name("MBB", &now), "mbb_prices_20260211_090507.csv");
    }

    #[test]
    fn test_output_file_name_uses_local_clock() {
        let name = output_file_name("MBB", &Local::now());
        let stamp = name
            .strip_prefix("mbb_prices_")
            .and_then(|s| s.strip_suffix(".csv"))
            .unwrap();
        assert_eq!(stamp.len(), 15);
        assert!(stamp.chars().filter(|c| c.is_ascii_digit()).count() == 14);

        let stamped = NaiveDateTime::parse_from_str(stamp, "%Y%m%d_%H%M%S").unwrap();
        let drift = Local::now().naive_local() - stamped;
        assert!(drift >= chrono::Duration::zero());
        assert!(drift <= chrono::Duration::seconds(5));
    }

    #[test]
    fn test_write_csv_has_header_and_no_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &rows()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "time,open,high,low,close,volume");
        assert_eq!(lines[1], "2026-01-02,25.0,25.5,24.9,25.3,1000000");
        assert_eq!(lines[2], "2026-01-05,,25.8,25.2,25.75,2000000");
    }

    #[test]
    fn test_write_csv_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &rows()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), PriceRecord::COLUMNS);

        let back: Vec<PriceRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, rows());
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mbb_prices_20260211_090507.csv");

        write_csv(&path, &rows()).unwrap();
        write_csv(&path, &rows()[..1]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_csv(&path, &rows()).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
