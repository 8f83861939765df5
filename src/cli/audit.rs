//! CLI command for reading the audit log

use crate::audit::EntityType;
use crate::error::{FinboardError, FinboardResult};
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(
    storage: &Storage,
    limit: usize,
    entity: Option<String>,
) -> FinboardResult<()> {
    let entity = entity
        .as_deref()
        .map(|name| {
            EntityType::parse(name).ok_or_else(|| {
                FinboardError::Validation(format!(
                    "Unknown record kind: '{}'. Use transaction, payable or credit_card",
                    name
                ))
            })
        })
        .transpose()?;

    let entries = storage.audit().read_recent(limit, entity)?;
    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!();
    println!(
        "Showing {} of {} entries ({})",
        entries.len(),
        storage.audit().entry_count()?,
        storage.audit().path().display()
    );

    Ok(())
}
