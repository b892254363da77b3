pub mod export_service;
pub mod quote_service;
pub mod run_service;
pub mod summary_service;
