//! Configuration module for finboard
//!
//! This module provides configuration management including:
//! - Base directory and per-profile path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinboardPaths;
pub use settings::Settings;
