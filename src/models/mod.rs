//! Data models for the price fetch run
//!
//! Each model is a plain data carrier passed between the quote source,
//! the CSV export and the printed summary.

pub mod price;
pub mod summary;
pub mod report;

pub use price::PriceRecord;
pub use summary::PriceSummary;
pub use report::RunReport;
