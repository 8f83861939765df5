//! Audit logging for finboard
//!
//! Every create, update and delete that goes through a service is appended
//! to the active profile's `audit.log` as one JSON line, with the stored row
//! before and after the change.
//!
//! # Example
//!
//! ```rust,ignore
//! use finboard::audit::{AuditEntry, AuditLogger, EntityType, generate_diff};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let diff = generate_diff(&before_row, &after_row);
//! logger.log(&AuditEntry::update(
//!     EntityType::CreditCard,
//!     card.id.to_string(),
//!     Some(card.name.clone()),
//!     &before_row,
//!     &after_row,
//!     diff,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
