//! Command handler modules for the CLI.

mod cache;
mod completions;
mod list;
mod manpage;
mod recent;
mod show;
mod tree;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(
    config_path: Option<&Path>,
    no_color: bool,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::List {
            document,
            format,
            filter,
        } => list::cmd_list(config_path, &document, format, filter.as_deref()),
        Commands::Show { document, key, raw } => {
            show::cmd_show(config_path, &document, &key, raw)
        }
        Commands::Tree { document } => tree::cmd_tree(config_path, &document, no_color),
        Commands::Cache { document, clear } => cache::cmd_cache(config_path, &document, clear),
        Commands::Recent { limit } => recent::cmd_recent(config_path, limit),
        Commands::Completions { shell } => completions::cmd_completions(shell),
        Commands::Manpage => manpage::cmd_manpage(),
    }
}
