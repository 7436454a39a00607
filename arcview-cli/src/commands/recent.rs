//! Recent documents command.

use std::fmt::Write as _;
use std::path::Path;

use arcview_core::recent::{RecentDocuments, RecentEntry};

use crate::error::CliError;
use crate::util::load_config;

/// Recent documents command handler
pub fn cmd_recent(config_path: Option<&Path>, limit: Option<usize>) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let recent = RecentDocuments::load(&config.recent_file(), config.recent_capacity);

    let shown = limit.unwrap_or(recent.len());
    println!("{}", format_recent_table(&recent.entries()[..shown.min(recent.len())]));
    Ok(())
}

/// Formats recent documents as a table string
#[must_use]
pub fn format_recent_table(entries: &[RecentEntry]) -> String {
    if entries.is_empty() {
        return "No recent documents.".to_string();
    }

    let mut output = String::new();

    let name_width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let opened_width = 16;

    let _ = writeln!(
        output,
        "{:<name_width$}  {:<opened_width$}  PATH",
        "NAME", "OPENED"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<opened_width$}  {:-<4}",
        "", "", ""
    );

    for entry in entries {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<opened_width$}  {}",
            entry.name,
            entry.opened_at.format("%Y-%m-%d %H:%M"),
            entry.path.display()
        );
    }

    output.trim_end().to_string()
}
