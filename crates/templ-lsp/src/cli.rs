//! CLI definitions for templ-lsp.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "templ-lsp",
    version,
    about = "Language server and reindenter for templ templates",
    after_help = "Examples:\n  templ-lsp                          # serve LSP over stdio\n  templ-lsp format views/page.templ  # reindent in place\n  templ-lsp format --check *.templ   # report files that would change"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the language server over stdio (default).
    Serve,
    /// Reindent templ files in place.
    Format {
        /// Report files that would change without writing them.
        #[arg(long, action = ArgAction::SetTrue)]
        check: bool,
        /// Indentation width in spaces.
        #[arg(long)]
        tab_size: Option<u32>,
        /// Indent with tab characters.
        #[arg(long, action = ArgAction::SetTrue)]
        use_tabs: bool,
        /// Files to reindent.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
