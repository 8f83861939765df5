//! Generic JSON table of stored records
//!
//! Each table is one JSON array of rows. Rows are decoded individually on
//! load; a row that fails to decode is logged and skipped so a single bad
//! record never hides the rest of the file. Insertion order is preserved
//! because the category breakdown breaks ties by first appearance.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FinboardError, FinboardResult};

use super::file_io::{read_json, write_json_atomic};
use super::records::StoredRecord;

/// Outcome of loading a table from disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub rejected: usize,
}

/// Repository over one stored table
pub struct RecordTable<R: StoredRecord> {
    path: PathBuf,
    data: RwLock<Vec<R>>,
}

impl<R: StoredRecord> RecordTable<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> FinboardResult<RwLockReadGuard<'_, Vec<R>>> {
        self.data
            .read()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FinboardResult<RwLockWriteGuard<'_, Vec<R>>> {
        self.data
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load rows from disk, replacing whatever is in memory
    pub fn load(&self) -> FinboardResult<LoadReport> {
        let rows: Vec<Value> = read_json(&self.path)?;
        let mut report = LoadReport::default();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            match R::decode(row) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(path = %self.path.display(), "skipping {}", err);
                    report.rejected += 1;
                }
            }
        }
        report.loaded = records.len();
        debug!(
            kind = R::KIND,
            loaded = report.loaded,
            rejected = report.rejected,
            "loaded table"
        );

        *self.write()? = records;
        Ok(report)
    }

    /// Write all rows back to disk
    pub fn save(&self) -> FinboardResult<()> {
        let data = self.read()?;
        let rows: Vec<R::Row> = data.iter().map(StoredRecord::to_row).collect();
        write_json_atomic(&self.path, &rows)
    }

    pub fn get(&self, id: R::Id) -> FinboardResult<Option<R>> {
        Ok(self.read()?.iter().find(|r| r.id() == id).cloned())
    }

    /// All records in stored order
    pub fn get_all(&self) -> FinboardResult<Vec<R>> {
        Ok(self.read()?.clone())
    }

    /// Find a record by full id, short id or id prefix
    ///
    /// An identifier that matches more than one record is ambiguous and is
    /// reported as a validation error.
    pub fn find(&self, identifier: &str) -> FinboardResult<Option<R>> {
        let data = self.read()?;
        let mut matches = data.iter().filter(|r| r.matches_id(identifier));
        let first = matches.next().cloned();
        if first.is_some() && matches.next().is_some() {
            return Err(FinboardError::Validation(format!(
                "'{}' matches more than one {}; use a longer id",
                identifier,
                R::KIND
            )));
        }
        Ok(first)
    }

    /// Replace the record with the same id, or append a new one
    pub fn upsert(&self, record: R) -> FinboardResult<()> {
        let mut data = self.write()?;
        match data.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => data.push(record),
        }
        Ok(())
    }

    /// Remove a record; returns whether it existed
    pub fn delete(&self, id: R::Id) -> FinboardResult<bool> {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|r| r.id() != id);
        Ok(data.len() != before)
    }

    pub fn count(&self) -> FinboardResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreditCard, Money, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn txn(day: u32, description: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            Money::from_units(10),
            TransactionKind::Expense,
        )
        .described(description, "Food")
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let table: RecordTable<Transaction> = RecordTable::new(temp_dir.path().join("t.json"));
        let report = table.load().unwrap();
        assert_eq!(report, LoadReport::default());
        assert_eq!(table.count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let table: RecordTable<Transaction> = RecordTable::new(path.clone());

        let second = txn(20, "Later but first");
        let first = txn(5, "Earlier but second");
        table.upsert(second.clone()).unwrap();
        table.upsert(first.clone()).unwrap();
        table.save().unwrap();

        let reloaded: RecordTable<Transaction> = RecordTable::new(path);
        assert_eq!(reloaded.load().unwrap().loaded, 2);
        assert_eq!(reloaded.get_all().unwrap(), vec![second, first]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let table: RecordTable<Transaction> = RecordTable::new(temp_dir.path().join("t.json"));
        let a = txn(1, "A");
        let b = txn(2, "B");
        table.upsert(a.clone()).unwrap();
        table.upsert(b.clone()).unwrap();

        let mut edited = a.clone();
        edited.description = "A2".into();
        table.upsert(edited).unwrap();

        let all = table.get_all().unwrap();
        assert_eq!(all[0].description, "A2");
        assert_eq!(all[1].id, b.id);
        assert!(table.delete(a.id).unwrap());
        assert!(!table.delete(a.id).unwrap());
        assert!(table.get(a.id).unwrap().is_none());
    }

    #[test]
    fn test_load_skips_undecodable_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credit_cards.json");
        let rows = json!([
            {"id": "550e8400-e29b-41d4-a716-446655440000", "name": "Nubank",
             "credit_limit": 5000, "used": 100, "due_date": 10, "closing_date": 3},
            {"id": "not-a-uuid", "name": "Broken",
             "credit_limit": 5000, "used": 100, "due_date": 10, "closing_date": 3},
            {"id": "550e8400-e29b-41d4-a716-446655440001", "name": "Inter",
             "credit_limit": 1000, "used": 0, "due_date": 45, "closing_date": 3}
        ]);
        std::fs::write(&path, rows.to_string()).unwrap();

        let table: RecordTable<CreditCard> = RecordTable::new(path);
        let report = table.load().unwrap();
        assert_eq!(report, LoadReport { loaded: 1, rejected: 2 });
        assert_eq!(table.get_all().unwrap()[0].name, "Nubank");
    }

    #[test]
    fn test_find_by_short_id_and_ambiguity() {
        let temp_dir = TempDir::new().unwrap();
        let table: RecordTable<Transaction> = RecordTable::new(temp_dir.path().join("t.json"));
        let a = txn(1, "A");
        table.upsert(a.clone()).unwrap();

        assert_eq!(table.find(&a.id.short()).unwrap().map(|t| t.id), Some(a.id));
        assert_eq!(table.find(&a.id.to_string()).unwrap().map(|t| t.id), Some(a.id));
        assert!(table.find("txn-zzzzzzzz").unwrap().is_none());
    }
}
