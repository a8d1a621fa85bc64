//! CLI command definitions.

use clap::{Parser, Subcommand};
use folio::{ExportFormat, FieldName};
use std::path::PathBuf;

/// Folio - stream generated content into book records
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Stream generated content into book records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store the bearer token used for authenticated calls
    Login {
        /// Opaque bearer token
        #[arg(long)]
        token: String,
    },

    /// Forget the stored bearer token
    Logout,

    /// Show a book, or one of its fields
    Show {
        /// Book id
        id: String,

        /// Field to print (toc, mdBody, summary, usage)
        #[arg(long)]
        field: Option<FieldName>,
    },

    /// Create a book
    New {
        /// Book title
        #[arg(long)]
        title: String,

        /// Initial table of contents
        #[arg(long)]
        toc: Option<String>,
    },

    /// Delete a book
    Delete {
        /// Book id
        id: String,
    },

    /// Stream a generation into a field; Ctrl-C asks the server to stop
    Generate {
        /// Book id
        id: String,

        /// Field to generate (toc, mdBody, summary, usage)
        #[arg(long)]
        field: FieldName,

        /// Model override
        #[arg(long)]
        model: Option<String>,

        /// Save the field when generation ends
        #[arg(long)]
        save: bool,
    },

    /// Generate a short field in one request
    GenerateOnce {
        /// Book id
        id: String,

        /// Field to generate (toc, mdBody, summary, usage)
        #[arg(long)]
        field: FieldName,

        /// Model override
        #[arg(long)]
        model: Option<String>,

        /// Save the field afterwards
        #[arg(long)]
        save: bool,
    },

    /// Print a book as Markdown or HTML
    Export {
        /// Book id
        id: String,

        /// Output format (md, html)
        #[arg(long, default_value = "md")]
        format: ExportFormat,
    },
}
