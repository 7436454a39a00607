//! Persistent cache inspection command.

use std::fmt::Write as _;
use std::path::Path;

use arcview_core::content::{ContentStore, FileStore};

use crate::error::CliError;
use crate::format::human_size;
use crate::util::{document_identity, load_config};

/// Cache command handler
pub fn cmd_cache(config_path: Option<&Path>, document: &str, clear: bool) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let identity = document_identity(document);
    let store = FileStore::new(config.store_dir());

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Store(format!("Failed to create async runtime: {e}")))?;

    if clear {
        let removed = runtime.block_on(async {
            let keys = store.keys(&identity).await?;
            store.clear_document(&identity).await?;
            Ok::<usize, CliError>(keys.len())
        })?;
        tracing::info!(document = %identity, removed, "cache cleared");
        println!("Cleared {removed} cached entries for '{identity}'");
        return Ok(());
    }

    let rows = runtime.block_on(async {
        let keys = store.keys(&identity).await?;
        let mut rows = Vec::with_capacity(keys.len());
        for key in keys {
            let size = store
                .load(&identity, &key)
                .await?
                .map_or(0, |text| text.len() as u64);
            rows.push((key, size));
        }
        Ok::<Vec<(String, u64)>, CliError>(rows)
    })?;

    println!("{}", format_cache_table(&identity, &rows));
    Ok(())
}

/// Formats cached entries as a table string
#[must_use]
pub fn format_cache_table(identity: &str, rows: &[(String, u64)]) -> String {
    if rows.is_empty() {
        return format!("No cached entries for '{identity}'.");
    }

    let mut output = String::new();

    let key_width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(3).max(3);
    let size_width = 9;

    let _ = writeln!(output, "Cached entries for '{identity}':");
    let _ = writeln!(output, "{:<key_width$}  {:>size_width$}", "KEY", "SIZE");
    let _ = writeln!(output, "{:-<key_width$}  {:-<size_width$}", "", "");

    for (key, size) in rows {
        let _ = writeln!(
            output,
            "{:<key_width$}  {:>size_width$}",
            key,
            human_size(*size)
        );
    }

    output.trim_end().to_string()
}
