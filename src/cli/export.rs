//! CLI command for data export
//!
//! Writes to a file when `--output` is given, otherwise to stdout so the
//! export can be piped.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use tracing::debug;

use crate::error::{FinboardError, FinboardResult};
use crate::export::{export_full_json, export_full_yaml, export_transactions_csv};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Full profile as JSON
    Json,
    /// Transactions only, as CSV
    Csv,
    /// Full profile as YAML
    Yaml,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> FinboardResult<()> {
    match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinboardError::Export(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, format, &mut writer, pretty)?;
            writer.flush()?;

            debug!(path = %path.display(), ?format, "export written");
            match format {
                ExportFormat::Csv => {
                    println!("Transactions exported to: {}", path.display());
                    println!("Note: CSV format exports transactions only. Use JSON or YAML for everything.");
                }
                ExportFormat::Json | ExportFormat::Yaml => {
                    println!(
                        "Profile '{}' exported to: {}",
                        storage.paths().profile(),
                        path.display()
                    );
                }
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, format, &mut writer, pretty)?;
            if format == ExportFormat::Json {
                writeln!(writer)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    format: ExportFormat,
    writer: &mut W,
    pretty: bool,
) -> FinboardResult<()> {
    match format {
        ExportFormat::Json => export_full_json(storage, writer, pretty),
        ExportFormat::Csv => export_transactions_csv(storage, writer),
        ExportFormat::Yaml => export_full_yaml(storage, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinboardPaths;
    use crate::models::{CreditCard, Money};
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(FinboardPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage
            .credit_cards
            .upsert(CreditCard::new("Nubank", Money::from_units(5000), 10, 3))
            .unwrap();

        let path = temp_dir.path().join("out.yaml");
        handle_export_command(&storage, ExportFormat::Yaml, Some(path.clone()), false).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("name: Nubank"));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(FinboardPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let path = temp_dir.path().join("missing").join("out.json");
        let err = handle_export_command(&storage, ExportFormat::Json, Some(path), true).unwrap_err();
        assert!(matches!(err, FinboardError::Export(_)));
    }
}
