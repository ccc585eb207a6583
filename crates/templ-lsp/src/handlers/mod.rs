//! LSP request handlers.
//!
//! This module wires handler submodules together.

mod commands;
mod features;
mod formatting;
mod lsp_utils;
mod sync;
mod workspace;

pub use commands::{execute_command, SHOW_INFO_COMMAND, STATUS_COMMAND};
pub use features::{completion, hover};
pub use formatting::{formatting, range_formatting};
pub use sync::{did_change, did_close, did_open, did_save};
pub use workspace::{
    did_change_configuration, did_change_watched_files, load_workspace_configs,
    register_file_watchers, set_workspace_folders,
};
