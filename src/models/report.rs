//! Run outcome models

use std::path::PathBuf;

use super::PriceSummary;

/// What a successful run produced
#[derive(Debug)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub record_count: usize,
    pub summary: PriceSummary,
}
