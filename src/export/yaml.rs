//! YAML export of a whole profile

use std::io::Write;

use crate::error::{FinboardError, FinboardResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Same content as the JSON export, with a short comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FinboardResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# finboard export of profile '{}'", export.profile)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinboardError::Export(e.to_string()))?;

    Ok(())
}
