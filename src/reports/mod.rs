//! Terminal reports built from the finance state

pub mod dashboard;
pub mod months;

pub use dashboard::{CardDue, DashboardOptions, DashboardReport};
pub use months::{MonthRow, MonthsReport};
