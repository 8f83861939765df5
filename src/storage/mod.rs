//! Storage layer for finboard
//!
//! One JSON table per record kind under the active profile's directory,
//! written atomically, plus the profile's audit log.

pub mod file_io;
pub mod records;
pub mod table;

pub use file_io::{read_json, write_json_atomic};
pub use records::{CreditCardRow, DecodeError, PayableRow, StoredRecord, TransactionRow};
pub use table::{LoadReport, RecordTable};

use serde::Serialize;
use tracing::info;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinboardPaths;
use crate::error::FinboardResult;
use crate::models::{CreditCard, DatedPayable, Transaction};

pub type TransactionRepository = RecordTable<Transaction>;
pub type PayableRepository = RecordTable<DatedPayable>;
pub type CreditCardRepository = RecordTable<CreditCard>;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinboardPaths,
    pub transactions: TransactionRepository,
    pub payables: PayableRepository,
    pub credit_cards: CreditCardRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance for the paths' active profile
    pub fn new(paths: FinboardPaths) -> FinboardResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: RecordTable::new(paths.transactions_file()),
            payables: RecordTable::new(paths.payables_file()),
            credit_cards: RecordTable::new(paths.credit_cards_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinboardPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all tables from disk
    ///
    /// Returns how many rows were rejected across all tables.
    pub fn load_all(&self) -> FinboardResult<usize> {
        let rejected = self.transactions.load()?.rejected
            + self.payables.load()?.rejected
            + self.credit_cards.load()?.rejected;
        if rejected > 0 {
            info!(profile = self.paths.profile(), rejected, "some stored rows were skipped");
        }
        Ok(rejected)
    }

    /// Save all tables to disk
    pub fn save_all(&self) -> FinboardResult<()> {
        self.transactions.save()?;
        self.payables.save()?;
        self.credit_cards.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FinboardResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> FinboardResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FinboardResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
