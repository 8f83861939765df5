//! finboard - terminal personal-finance tracker
//!
//! This library holds the core of the finboard application: records of
//! income, expenses, bills to pay and credit cards, grouped into calendar
//! months and summarized for a monthly dashboard.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, payables, cards, months)
//! - `engine`: Pure monthly aggregation (buckets, summaries, breakdown, trend)
//! - `storage`: JSON file storage with a typed decode boundary
//! - `state`: Finance state snapshot and the commands that change it
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Dashboard and month reports
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `finboard` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finboard::config::{paths::FinboardPaths, settings::Settings};
//! use finboard::storage::Storage;
//! use finboard::state::FinanceState;
//!
//! let paths = FinboardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let state = FinanceState::load(&storage)?;
//! println!("{:?}", state.current_summary());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{FinboardError, FinboardResult};
