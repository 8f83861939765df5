//! Export of a profile's records
//!
//! - CSV: transactions only, for spreadsheets
//! - JSON: every stored row plus monthly totals and metadata
//! - YAML: the JSON content in a human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, MonthTotals, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
