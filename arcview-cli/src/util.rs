//! Shared utility functions used across command modules.

use std::path::Path;

use arcview_core::config::WorkbenchConfig;
use arcview_core::recent::RecentDocuments;

use crate::error::CliError;

/// Loads the workbench configuration, using the optional custom config file
/// from CLI args.
pub fn load_config(config_path: Option<&Path>) -> Result<WorkbenchConfig, CliError> {
    let result = match config_path {
        Some(path) => WorkbenchConfig::load(path),
        None => WorkbenchConfig::load_default(),
    };
    result.map_err(|e| CliError::Config(format!("Failed to load config: {e}")))
}

/// Records a document open in the recent list. Persistence failures are
/// logged by the list itself, never surfaced here.
pub fn record_recent(config: &WorkbenchConfig, identity: &str, path: &Path) {
    let mut recent = RecentDocuments::load(&config.recent_file(), config.recent_capacity);
    recent.record(identity, path);
}

/// Returns a document's identity: the final path component of the argument.
///
/// Accepts either a file path (`reports/q3.docx`) or a bare identity
/// (`q3.docx`).
#[must_use]
pub fn document_identity(document: &str) -> String {
    Path::new(document)
        .file_name()
        .map_or_else(|| document.to_string(), |name| name.to_string_lossy().into_owned())
}

/// Resolves a user-supplied key against a document's entry paths.
///
/// Tries, in order: exact match, case-insensitive match, match by path
/// suffix (so `document.xml` finds `word/document.xml`), then substring
/// match. Partial keys matching more than one entry list the candidates.
pub fn find_entry(entries: &[String], key: &str) -> Result<String, CliError> {
    // First try an exact match
    if entries.iter().any(|entry| entry == key) {
        return Ok(key.to_string());
    }

    // Try case-insensitive match
    if let Some(entry) = entries.iter().find(|entry| entry.eq_ignore_ascii_case(key)) {
        return Ok(entry.clone());
    }

    // Try matching the tail of the path on a component boundary
    let tail = format!("/{key}");
    let suffix_matches: Vec<&String> = entries
        .iter()
        .filter(|entry| entry.ends_with(&tail))
        .collect();
    if let [entry] = suffix_matches.as_slice() {
        return Ok((*entry).clone());
    }

    // Fall back to substring match
    let matches: Vec<&String> = if suffix_matches.is_empty() {
        let key_lower = key.to_lowercase();
        entries
            .iter()
            .filter(|entry| entry.to_lowercase().contains(&key_lower))
            .collect()
    } else {
        suffix_matches
    };

    match matches.as_slice() {
        [] => Err(CliError::EntryNotFound(key.to_string())),
        [entry] => Ok((*entry).clone()),
        _ => {
            let names: Vec<_> = matches.iter().map(|entry| entry.as_str()).collect();
            Err(CliError::Resolve(format!(
                "Ambiguous entry '{}'. Matches: {}",
                key,
                names.join(", ")
            )))
        }
    }
}
