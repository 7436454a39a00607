//! Entry tree command.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use arcview_core::archive::{ArchiveReader, ZipArchiveReader};

use crate::error::CliError;
use crate::util::{load_config, record_recent};

/// Tree command handler
pub fn cmd_tree(config_path: Option<&Path>, document: &Path, no_color: bool) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    let reader = ZipArchiveReader::open(document)?;
    record_recent(&config, reader.identity(), document);

    let entries = reader.entries();
    println!("{}", format_tree(reader.identity(), &entries, !no_color));
    Ok(())
}

/// One level of the entry tree: child directories and the files directly
/// below it, both sorted by name.
#[derive(Debug, Default)]
struct TreeNode {
    directories: BTreeMap<String, TreeNode>,
    files: Vec<String>,
}

impl TreeNode {
    fn insert(&mut self, path: &str) {
        match path.split_once('/') {
            Some((directory, rest)) => {
                self.directories
                    .entry(directory.to_string())
                    .or_default()
                    .insert(rest);
            }
            None => self.files.push(path.to_string()),
        }
    }

    fn render(&self, output: &mut String, depth: usize, colors: bool) {
        const BOLD: &str = "\x1b[1m";
        const RESET: &str = "\x1b[0m";

        let indent = "  ".repeat(depth);
        for (name, child) in &self.directories {
            if colors {
                let _ = writeln!(output, "{indent}{BOLD}{name}/{RESET}");
            } else {
                let _ = writeln!(output, "{indent}{name}/");
            }
            child.render(output, depth + 1, colors);
        }

        let mut files: Vec<&str> = self.files.iter().map(String::as_str).collect();
        files.sort_unstable();
        for name in files {
            let _ = writeln!(output, "{indent}{name}");
        }
    }
}

/// Formats entry paths as an indented tree rooted at the document name.
#[must_use]
pub fn format_tree(identity: &str, entries: &[String], colors: bool) -> String {
    let mut root = TreeNode::default();
    for entry in entries {
        root.insert(entry);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{identity}");
    root.render(&mut output, 1, colors);
    output.trim_end().to_string()
}
