//! List document entries command.

use std::fmt::Write as _;
use std::path::Path;

use arcview_core::archive::{ArchiveReader, ZipArchiveReader};
use arcview_core::content::ContentKind;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{escape_csv_field, human_size};
use crate::util::{load_config, record_recent};

/// List entries command handler
pub fn cmd_list(
    config_path: Option<&Path>,
    document: &Path,
    format: OutputFormat,
    filter: Option<&str>,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    let mut reader =
        ZipArchiveReader::open(document).map_err(|e| CliError::Document(e.to_string()))?;
    record_recent(&config, reader.identity(), document);

    let mut rows = Vec::new();
    for key in reader.entries() {
        if let Some(prefix) = filter {
            if !key.starts_with(prefix) {
                continue;
            }
        }

        // A member whose size cannot be read should not sink the listing
        let size = match reader.entry_size(&key) {
            Ok(size) => Some(size),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "entry size unavailable");
                None
            }
        };

        rows.push(EntryOutput {
            kind: ContentKind::detect(&key).to_string(),
            key,
            size,
        });
    }

    match format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_csv(&rows),
    }

    Ok(())
}

/// Print entries as a formatted table
fn print_table(rows: &[EntryOutput]) {
    println!("{}", format_table(rows));
}

/// Format entries as a table string
#[must_use]
pub fn format_table(rows: &[EntryOutput]) -> String {
    if rows.is_empty() {
        return "No entries found.".to_string();
    }

    let mut output = String::new();

    // Calculate column widths
    let key_width = rows.iter().map(|r| r.key.len()).max().unwrap_or(3).max(3);
    let kind_width = 9;
    let size_width = 9;

    // Print header
    let _ = writeln!(
        output,
        "{:<key_width$}  {:<kind_width$}  {:>size_width$}",
        "KEY", "KIND", "SIZE"
    );
    let _ = writeln!(
        output,
        "{:-<key_width$}  {:-<kind_width$}  {:-<size_width$}",
        "", "", ""
    );

    // Print rows
    for row in rows {
        let size = row.size.map_or_else(|| "-".to_string(), human_size);
        let _ = writeln!(
            output,
            "{:<key_width$}  {:<kind_width$}  {:>size_width$}",
            row.key, row.kind, size
        );
    }

    output.trim_end().to_string()
}

/// Print entries as JSON
fn print_json(rows: &[EntryOutput]) -> Result<(), CliError> {
    let json = format_json(rows)?;
    println!("{json}");
    Ok(())
}

/// Format entries as JSON string
///
/// # Errors
///
/// Returns `CliError::Document` if JSON serialization fails.
pub fn format_json(rows: &[EntryOutput]) -> Result<String, CliError> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| CliError::Document(format!("Failed to serialize to JSON: {e}")))
}

/// Print entries as CSV
fn print_csv(rows: &[EntryOutput]) {
    println!("{}", format_csv(rows));
}

/// Format entries as CSV string
#[must_use]
pub fn format_csv(rows: &[EntryOutput]) -> String {
    let mut output = String::new();

    // Print header
    output.push_str("key,kind,size\n");

    // Print rows
    for row in rows {
        let key = escape_csv_field(&row.key);
        let size = row.size.map_or_else(String::new, |size| size.to_string());
        let _ = writeln!(output, "{},{},{}", key, row.kind, size);
    }

    output.trim_end().to_string()
}

/// One entry row for CLI output
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EntryOutput {
    pub key: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}
