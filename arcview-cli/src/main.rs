//! Arcview CLI - Command-line interface for the arcview document workbench
//!
//! Provides commands for listing and showing archive entries, browsing a
//! document's entry tree, inspecting and clearing the persistent content
//! cache, and reviewing recently opened documents.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use arcview_core::tracing::{TracingConfig, TracingLevel, init_tracing};
use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    if !cli.quiet {
        let level = match cli.verbose {
            0 => TracingLevel::Warn,
            1 => TracingLevel::Info,
            2 => TracingLevel::Debug,
            _ => TracingLevel::Trace,
        };
        let tracing_config = TracingConfig::production().with_level(level);
        if let Err(e) = init_tracing(&tracing_config) {
            eprintln!("Warning: tracing not initialized: {e}");
        }
    }

    let result = commands::dispatch(config_path, cli.no_color, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
