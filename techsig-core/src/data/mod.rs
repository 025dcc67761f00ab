//! Market data providers and provider-side validation.

pub mod csv_file;
pub mod provider;
pub mod synthetic;
pub mod validate;

pub use csv_file::CsvProvider;
pub use provider::{DataError, DataProvider, DataSource};
pub use synthetic::SyntheticProvider;
pub use validate::validate_bars;
