pub mod errors;
pub mod format;
pub mod table;

pub use errors::RunError;
pub use format::{format_price, format_thousands};
pub use table::Table;
