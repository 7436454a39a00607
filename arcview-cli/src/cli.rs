//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Arcview command-line interface for inspecting archive-based documents
#[derive(Parser)]
#[command(name = "arcview-cli")]
#[command(author, version, about = "Arcview command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List document entries
    #[command(about = "List the entries of a document with sizes and kinds")]
    List {
        /// Path to the document file (.docx, .xlsx, .odt, .zip, ...)
        document: PathBuf,

        /// Output format for the entry list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Only list entries whose path starts with this prefix
        #[arg(long, value_name = "PREFIX")]
        filter: Option<String>,
    },

    /// Show one entry's content
    #[command(about = "Resolve an entry through the content pipeline and print it")]
    Show {
        /// Path to the document file
        document: PathBuf,

        /// Entry path inside the document (partial paths match by suffix)
        key: String,

        /// Print the raw entry text without formatting or caching
        #[arg(long)]
        raw: bool,
    },

    /// Show document entries as a tree
    #[command(about = "Show a document's entries as an indented tree")]
    Tree {
        /// Path to the document file
        document: PathBuf,
    },

    /// Inspect the persistent content cache
    #[command(about = "Show or clear the persistent cache for a document")]
    Cache {
        /// Document file or identity (the file name)
        document: String,

        /// Remove every cached entry for the document
        #[arg(long)]
        clear: bool,
    },

    /// Show recently opened documents
    #[command(about = "Show recently opened documents")]
    Recent {
        /// Maximum number of documents to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate a man page
    #[command(about = "Generate a man page and write it to stdout")]
    Manpage,
}

/// Output format for the list command
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
    /// Output as CSV
    Csv,
}
